use super::deal::Deal;
use super::marginals::Marginals;
use crate::error::Error;
use crate::game::seat::Seat;
use crate::tiles::subsets::choose;
use crate::tiles::tile::Tile;
use crate::tiles::tiles::Tiles;
use crate::Probability;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;

/// the outcome of a sampling run
#[derive(Debug, Clone)]
pub struct Estimate {
    pub marginals: Marginals,
    pub accepted: usize,
    pub attempts: usize,
    pub ess: f64,
}

impl Estimate {
    /// fraction of attempts that produced a valid configuration
    pub fn rate(&self) -> Probability {
        self.accepted as Probability / self.attempts.max(1) as Probability
    }
    /// binomial standard error of one marginal cell
    pub fn stderr(&self, seat: Seat, tile: Tile) -> Probability {
        let p = self.marginals.get(seat, tile);
        (p * (1.0 - p) / self.ess.max(1.0)).sqrt()
    }
}

/// per-worker accumulator; merges by summation.
/// rejection and chain samples carry unit weight, so the generalized
/// effective sample size (Σw)²/Σw² collapses to the accepted count.
#[derive(Debug, Clone)]
struct Tally {
    sums: [[f64; 28]; 3],
    weight: f64,
    squares: f64,
    accepted: usize,
    attempts: usize,
}

impl Tally {
    fn new() -> Self {
        Self {
            sums: [[0.0; 28]; 3],
            weight: 0.0,
            squares: 0.0,
            accepted: 0,
            attempts: 0,
        }
    }
    fn absorb(&mut self, hands: &[Tiles; 3], weight: f64) {
        for p in 0..3 {
            for tile in hands[p] {
                self.sums[p][u8::from(tile) as usize] += weight;
            }
        }
        self.weight += weight;
        self.squares += weight * weight;
        self.accepted += 1;
    }
    fn merge(mut self, other: Self) -> Self {
        for p in 0..3 {
            for i in 0..28 {
                self.sums[p][i] += other.sums[p][i];
            }
        }
        self.weight += other.weight;
        self.squares += other.squares;
        self.accepted += other.accepted;
        self.attempts += other.attempts;
        self
    }
}

/// Monte Carlo estimation of the posterior marginals over a Deal.
///
/// three generators share the machinery: uniform rejection, constrained
/// generation with importance-weight correction, and a symmetric swap
/// chain for states where rejection starves. work fans out over rayon
/// workers, each with a generator stream derived from the master seed,
/// and merges by summation in worker order so equal seeds reproduce
/// equal tables.
pub struct Sampler<'a> {
    deal: &'a Deal,
    seed: u64,
    deadline: Option<Instant>,
}

impl<'a> Sampler<'a> {
    pub fn new(deal: &'a Deal, seed: u64, deadline: Option<Instant>) -> Self {
        Self {
            deal,
            seed,
            deadline,
        }
    }

    /// uniform rejection sampling: shuffle, cut, test
    pub fn rejection(&self, target: usize) -> Result<Estimate, Error> {
        self.estimate(self.fan(target, |rng, quota| self.reject(rng, quota)))
    }

    /// constrained generation corrected by importance weights
    pub fn weighted(&self, target: usize) -> Result<Estimate, Error> {
        self.estimate(self.fan(target, |rng, quota| self.weigh(rng, quota)))
    }

    /// swap-chain MCMC, one independent chain per worker
    pub fn chain(&self, target: usize, burnin: usize) -> Result<Estimate, Error> {
        self.estimate(self.fan(target, |rng, quota| self.walk(rng, quota, burnin)))
    }

    /// acceptance-rate probe for the dispatcher: k shuffled cuts, no counts
    pub fn pilot(&self, k: usize) -> Probability {
        let ref mut rng = self.stream(u64::MAX);
        let ref mut pool = Vec::<Tile>::from(self.deal.unknown);
        let mut hits = 0usize;
        for _ in 0..k {
            pool.shuffle(rng);
            if self.cut(pool).is_some() {
                hits += 1;
            }
        }
        hits as Probability / k.max(1) as Probability
    }

    //  generator plumbing
    //  generator plumbing
    //  generator plumbing

    fn stream(&self, worker: u64) -> SmallRng {
        SmallRng::seed_from_u64(self.seed ^ worker.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    fn expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() > deadline)
    }

    fn fan<F>(&self, target: usize, run: F) -> Tally
    where
        F: Fn(SmallRng, usize) -> Tally + Sync,
    {
        let workers = rayon::current_num_threads().max(1);
        let quota = target.div_ceil(workers);
        (0..workers as u64)
            .into_par_iter()
            .map(|worker| run(self.stream(worker), quota))
            .collect::<Vec<_>>()
            .into_iter()
            .fold(Tally::new(), Tally::merge)
    }

    fn estimate(&self, tally: Tally) -> Result<Estimate, Error> {
        if tally.accepted == 0 {
            if self.expired() {
                Err(Error::Timeout)
            } else {
                Err(Error::Inconsistent(
                    "no valid configuration was ever sampled".to_string(),
                ))
            }
        } else {
            let ess = tally.weight * tally.weight / tally.squares;
            log::debug!(
                "accepted {} of {} attempts, effective sample size {:.0}",
                tally.accepted,
                tally.attempts,
                ess,
            );
            Ok(Estimate {
                marginals: Marginals::from_sums(self.deal.unknown, &tally.sums, tally.weight),
                accepted: tally.accepted,
                attempts: tally.attempts,
                ess,
            })
        }
    }

    //  rejection generator
    //  rejection generator
    //  rejection generator

    fn reject(&self, mut rng: SmallRng, quota: usize) -> Tally {
        let mut tally = Tally::new();
        let ref mut pool = Vec::<Tile>::from(self.deal.unknown);
        let patience = quota.saturating_mul(crate::SAMPLER_PATIENCE);
        while tally.accepted < quota && tally.attempts < patience {
            if tally.attempts & 0xFF == 0 && self.expired() {
                break;
            }
            tally.attempts += 1;
            pool.shuffle(&mut rng);
            if let Some(hands) = self.cut(pool) {
                tally.absorb(&hands, 1.0);
            }
        }
        tally
    }

    /// cut the shuffled pool into quota-sized blocks and test candidacy
    fn cut(&self, pool: &[Tile]) -> Option<[Tiles; 3]> {
        let mut hands = [Tiles::empty(); 3];
        let mut from = 0;
        for p in 0..3 {
            let till = from + self.deal.quota[p] as usize;
            for tile in &pool[from..till] {
                if !self.deal.candidates[p].contains(*tile) {
                    return None;
                }
                hands[p].insert(*tile);
            }
            from = till;
        }
        Some(hands)
    }

    //  constrained generator
    //  constrained generator
    //  constrained generator

    fn weigh(&self, mut rng: SmallRng, quota: usize) -> Tally {
        let mut tally = Tally::new();
        let patience = quota.saturating_mul(crate::SAMPLER_PATIENCE);
        while tally.accepted < quota && tally.attempts < patience {
            if tally.attempts & 0xFF == 0 && self.expired() {
                break;
            }
            tally.attempts += 1;
            if let Some((hands, weight)) = self.constrained(&mut rng) {
                tally.absorb(&hands, weight);
            }
        }
        tally
    }

    /// draw each hand from its candidate pool without replacement.
    /// the draw reaches a given configuration with probability
    /// ∏ 1/choose(|pool|, need) along the path, so the uniform-target
    /// importance weight is the product of the path binomials.
    fn constrained(&self, rng: &mut SmallRng) -> Option<([Tiles; 3], f64)> {
        let mut remaining = self.deal.unknown;
        let mut hands = [Tiles::empty(); 3];
        let mut weight = 1.0f64;
        for p in 0..3 {
            let mut pool = self.deal.candidates[p].common(remaining);
            let need = self.deal.quota[p] as usize;
            if pool.size() < need {
                return None;
            }
            weight *= choose(pool.size(), need) as f64;
            for _ in 0..need {
                let tile = pool.draw(rng).expect("pool checked above");
                pool.remove(tile);
                remaining.remove(tile);
                hands[p].insert(tile);
            }
        }
        Some((hands, weight))
    }

    //  swap chain
    //  swap chain
    //  swap chain

    fn walk(&self, mut rng: SmallRng, quota: usize, burnin: usize) -> Tally {
        let mut tally = Tally::new();
        let patience = quota.saturating_mul(crate::SAMPLER_PATIENCE);
        // seed the chain with any valid configuration
        let mut hands = loop {
            if tally.attempts >= patience {
                return tally;
            }
            if tally.attempts & 0xFF == 0 && self.expired() {
                return tally;
            }
            tally.attempts += 1;
            if let Some((hands, _)) = self.constrained(&mut rng) {
                debug_assert!(self.deal.feasible(&hands));
                break hands;
            }
        };
        // a couple of sweeps of proposals between recorded samples keeps
        // successive samples loosely coupled without throwing work away
        let sweep = 2 * self.deal.unknown.size().max(1);
        for _ in 0..burnin {
            for _ in 0..sweep {
                self.swap(&mut hands, &mut rng);
            }
        }
        while tally.accepted < quota {
            if self.expired() {
                break;
            }
            for _ in 0..sweep {
                self.swap(&mut hands, &mut rng);
            }
            tally.absorb(&hands, 1.0);
        }
        tally
    }

    /// propose one symmetric tile swap between two hands; accept iff
    /// both tiles are candidate-legal at their destinations
    fn swap(&self, hands: &mut [Tiles; 3], rng: &mut SmallRng) {
        let p = rng.random_range(0..3);
        let q = (p + 1 + rng.random_range(0..2)) % 3;
        if hands[p].is_empty() || hands[q].is_empty() {
            return;
        }
        let a = hands[p].draw(rng).expect("nonempty hand");
        let b = hands[q].draw(rng).expect("nonempty hand");
        if self.deal.candidates[q].contains(a) && self.deal.candidates[p].contains(b) {
            hands[p].remove(a);
            hands[p].insert(b);
            hands[q].remove(b);
            hands[q].insert(a);
        }
    }
}
