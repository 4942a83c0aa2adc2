use crate::constraint::store::Constraints;
use crate::game::state::State;
use crate::tiles::subsets::choose;
use crate::tiles::tiles::Tiles;
use crate::Count;

/// the distilled partition problem: which unknown tiles may sit in which
/// hidden hand, and how many tiles each hand still needs.
///
/// both inference backends consume a Deal and nothing else, so the same
/// machinery runs against a live session or a synthetic position.
#[derive(Debug, Clone, Copy)]
pub struct Deal {
    pub unknown: Tiles,
    pub quota: [u8; 3],
    pub candidates: [Tiles; 3],
}

impl From<(&State, &Constraints)> for Deal {
    fn from((state, constraints): (&State, &Constraints)) -> Self {
        Self {
            unknown: state.unknown(),
            quota: state.quotas(),
            candidates: constraints.sets(),
        }
    }
}

impl Deal {
    /// slots ordered for enumeration: tightest candidate set first,
    /// smallest quota as the tie break
    pub fn order(&self) -> [usize; 3] {
        let mut order = [0, 1, 2];
        order.sort_by_key(|p| (self.candidates[*p].size(), self.quota[*p]));
        order
    }

    /// conservative upper bound on enumeration leaves: the product of the
    /// first two branching factors, saturating on overflow so that an
    /// enormous bound routes to the sampler instead of wrapping
    pub fn workload(&self) -> Count {
        let [p1, p2, _] = self.order();
        let first = choose(self.candidates[p1].size(), self.quota[p1] as usize);
        let second = choose(self.candidates[p2].size(), self.quota[p2] as usize);
        first.saturating_mul(second)
    }

    /// is this assignment of hands a member of the feasible set
    pub fn feasible(&self, hands: &[Tiles; 3]) -> bool {
        let mut union = Tiles::empty();
        let mut total = 0;
        for p in 0..3 {
            if !self.candidates[p].covers(hands[p]) {
                return false;
            }
            if hands[p].size() != self.quota[p] as usize {
                return false;
            }
            union = union.union(hands[p]);
            total += hands[p].size();
        }
        union == self.unknown && total == self.unknown.size()
    }
}
