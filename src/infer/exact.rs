use super::deal::Deal;
use super::marginals::Marginals;
use crate::error::Error;
use crate::tiles::subsets::Subsets;
use std::time::Instant;

/// exhaustive backtracking enumeration of the feasible configuration set.
///
/// hands are assigned seat by seat in a tightest-first order; the third
/// hand is forced by the partition, so only two levels branch. counts
/// accumulate per (seat, tile) across accepted leaves and normalize into
/// exact marginals. enumeration must run to completion to be exact, so a
/// deadline expiry aborts with Timeout rather than returning partials.
pub struct Enumerator<'a> {
    deal: &'a Deal,
    deadline: Option<Instant>,
}

impl<'a> Enumerator<'a> {
    pub fn new(deal: &'a Deal, deadline: Option<Instant>) -> Self {
        Self { deal, deadline }
    }

    pub fn marginals(&self) -> Result<Marginals, Error> {
        self.marginals_in(self.deal.order())
    }

    /// enumeration in an explicit seat order. marginals are independent
    /// of the order; the heuristic only affects the visit count.
    pub fn marginals_in(&self, order: [usize; 3]) -> Result<Marginals, Error> {
        let [p1, p2, p3] = order;
        let deal = self.deal;
        let mut sums = [[0.0f64; 28]; 3];
        let mut total = 0.0f64;
        for first in Subsets::from((deal.candidates[p1], deal.quota[p1] as usize)) {
            if let Some(deadline) = self.deadline {
                if Instant::now() > deadline {
                    return Err(Error::Timeout);
                }
            }
            let rest = deal.unknown.minus(first);
            let second_pool = deal.candidates[p2].common(rest);
            let third_pool = deal.candidates[p3].common(rest);
            // Hall-style pruning: the rest must still be coverable
            if second_pool.size() < deal.quota[p2] as usize {
                continue;
            }
            if third_pool.size() < deal.quota[p3] as usize {
                continue;
            }
            if !second_pool.union(third_pool).covers(rest) {
                continue;
            }
            for second in Subsets::from((second_pool, deal.quota[p2] as usize)) {
                let third = rest.minus(second);
                if third_pool.covers(third) {
                    total += 1.0;
                    for (p, hand) in [(p1, first), (p2, second), (p3, third)] {
                        for tile in hand {
                            sums[p][u8::from(tile) as usize] += 1.0;
                        }
                    }
                }
            }
        }
        if total == 0.0 {
            return Err(Error::Inconsistent(
                "no configuration satisfies the constraints".to_string(),
            ));
        }
        log::debug!("enumerated {} configurations", total);
        Ok(Marginals::from_sums(deal.unknown, &sums, total))
    }
}
