use crate::error::Error;
use crate::game::observation::Observation;
use crate::game::seat::Seat;
use crate::game::state::State;
use crate::tiles::tiles::Tiles;

/// per-seat candidate sets plus the ledger of revealed tiles.
///
/// a candidate set holds every unknown tile the seat could still be
/// holding under the accumulated evidence. the revealed ledger records
/// which seat actually played which tile; those are historical facts,
/// not candidates.
#[derive(Debug, Clone)]
pub struct Constraints {
    candidates: [Tiles; 3],
    revealed: [Tiles; 3],
}

impl Constraints {
    pub fn new(unknown: Tiles) -> Self {
        Self {
            candidates: [unknown; 3],
            revealed: [Tiles::empty(); 3],
        }
    }

    pub fn candidates(&self, seat: Seat) -> Tiles {
        self.candidates[seat.slot()]
    }
    pub fn revealed(&self, seat: Seat) -> Tiles {
        self.revealed[seat.slot()]
    }
    pub fn sets(&self) -> [Tiles; 3] {
        self.candidates
    }
    pub fn ledger(&self) -> [Tiles; 3] {
        self.revealed
    }

    /// fold one observation into the store.
    /// a play strips the tile from every candidate set; a pass strips
    /// the block of the recorded ends from the passing seat.
    pub fn observe(&mut self, obs: &Observation) {
        match obs {
            Observation::Play { player, tile, .. } => {
                for candidates in self.candidates.iter_mut() {
                    candidates.remove(*tile);
                }
                if !player.is_observer() {
                    self.revealed[player.slot()].insert(*tile);
                }
            }
            Observation::Pass { player, ends } => {
                let slot = player.slot();
                let block = Tiles::block(ends.0, ends.1);
                self.candidates[slot] = self.candidates[slot].minus(block);
            }
        }
    }

    /// iterate the derived rules to a fixed point, verifying consistency
    /// on every pass. each pass either strictly shrinks the candidate
    /// sets or exits, so termination is bounded by the total candidate
    /// population.
    pub fn propagate(&mut self, state: &State) -> Result<(), Error> {
        loop {
            self.verify(state)?;
            if !self.reduce(state) {
                return Ok(());
            }
        }
    }

    /// one pass of the derived rules; true if anything shrank
    fn reduce(&mut self, state: &State) -> bool {
        let quota = state.quotas();
        let mut changed = false;
        // saturated hand: a seat whose candidates exactly fill its quota
        // owns them, so nobody else may hold any of them
        for p in 0..3 {
            if self.candidates[p].size() == quota[p] as usize {
                for q in 0..3 {
                    if q == p {
                        continue;
                    }
                    let cut = self.candidates[q].minus(self.candidates[p]);
                    if cut != self.candidates[q] {
                        log::trace!(
                            "saturated {} strips {} to {} candidates",
                            Seat::from_slot(p),
                            Seat::from_slot(q),
                            cut.size(),
                        );
                        self.candidates[q] = cut;
                        changed = true;
                    }
                }
            }
        }
        // pairwise Hall: a pair whose joint candidates exactly fill their
        // joint quota owns the union, so the third seat may not touch it
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            let third = 3 - p - q;
            let joint = self.candidates[p].union(self.candidates[q]);
            if joint.size() == (quota[p] + quota[q]) as usize {
                let cut = self.candidates[third].minus(joint);
                if cut != self.candidates[third] {
                    log::trace!(
                        "tight pair {}{} strips {} to {} candidates",
                        Seat::from_slot(p),
                        Seat::from_slot(q),
                        Seat::from_slot(third),
                        cut.size(),
                    );
                    self.candidates[third] = cut;
                    changed = true;
                }
            }
        }
        changed
    }

    /// the structural invariants that must hold between passes:
    /// containment, capacity, coverage, total capacity, pairwise Hall
    fn verify(&mut self, state: &State) -> Result<(), Error> {
        let unknown = state.unknown();
        let quota = state.quotas();
        for candidates in self.candidates.iter_mut() {
            *candidates = candidates.common(unknown);
        }
        for p in 0..3 {
            if self.candidates[p].size() < quota[p] as usize {
                return Err(Error::Inconsistent(format!(
                    "{} must hold {} tiles but only {} remain possible",
                    Seat::from_slot(p),
                    quota[p],
                    self.candidates[p].size(),
                )));
            }
        }
        let covered = self.candidates[0]
            .union(self.candidates[1])
            .union(self.candidates[2]);
        if covered != unknown {
            let orphan = unknown.minus(covered).next().expect("nonempty difference");
            return Err(Error::Inconsistent(format!(
                "{} has no possible holder",
                orphan
            )));
        }
        if quota.iter().map(|q| *q as usize).sum::<usize>() != unknown.size() {
            return Err(Error::Inconsistent(format!(
                "{} unknown tiles cannot fill {} hand slots",
                unknown.size(),
                quota.iter().map(|q| *q as usize).sum::<usize>(),
            )));
        }
        for (p, q) in [(0, 1), (0, 2), (1, 2)] {
            let joint = self.candidates[p].union(self.candidates[q]);
            if joint.size() < (quota[p] + quota[q]) as usize {
                return Err(Error::Inconsistent(format!(
                    "{} and {} must hold {} tiles but share only {} candidates",
                    Seat::from_slot(p),
                    Seat::from_slot(q),
                    quota[p] + quota[q],
                    joint.size(),
                )));
            }
        }
        Ok(())
    }
}

/// synthetic stores for tests and ad-hoc analysis
impl From<[Tiles; 3]> for Constraints {
    fn from(candidates: [Tiles; 3]) -> Self {
        Self {
            candidates,
            revealed: [Tiles::empty(); 3],
        }
    }
}
