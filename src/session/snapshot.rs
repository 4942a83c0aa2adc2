use super::session::Session;
use crate::game::ends::Ends;
use crate::game::observation::Observation;
use crate::infer::deal::Deal;
use crate::tiles::tiles::Tiles;

/// an immutable value-type copy of a live session.
///
/// everything here is owned, so a snapshot can cross threads and outlive
/// the session it was taken from; marginal queries against it see a
/// frozen state no matter what the session does next.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub hand: Tiles,
    pub unknown: Tiles,
    pub quota: [u8; 3],
    pub candidates: [Tiles; 3],
    pub revealed: [Tiles; 3],
    pub ends: Ends,
    pub history: Vec<Observation>,
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            hand: session.state().observer(),
            unknown: session.state().unknown(),
            quota: session.state().quotas(),
            candidates: session.constraints().sets(),
            revealed: session.constraints().ledger(),
            ends: session.state().ends(),
            history: session.state().history().to_vec(),
        }
    }
}

impl Snapshot {
    /// the combinatorial problem frozen at snapshot time
    pub fn deal(&self) -> Deal {
        Deal {
            unknown: self.unknown,
            quota: self.quota,
            candidates: self.candidates,
        }
    }
}
