use super::config::Config;
use super::snapshot::Snapshot;
use crate::constraint::store::Constraints;
use crate::error::Error;
use crate::game::observation::Observation;
use crate::game::state::State;
use crate::infer::dispatch;
use crate::infer::marginals::Marginals;
use crate::tiles::tiles::Tiles;

/// one observed game.
///
/// the session owns the ledger and the constraint store and is the only
/// thing external callers drive: observations go in through apply,
/// posteriors come out through marginals, and snapshot hands back a
/// frozen copy for concurrent or historical queries.
///
/// an InvalidObservation bounces off and leaves the session usable; an
/// Inconsistent propagation kills it for good, since the evidence it
/// accumulated can no longer describe any deal of the tiles.
pub struct Session {
    state: State,
    constraints: Constraints,
    config: Config,
    poisoned: bool,
}

impl Session {
    pub fn new(hand: Tiles, config: Config) -> Result<Self, Error> {
        let state = State::new(hand)?;
        let constraints = Constraints::new(state.unknown());
        log::debug!("new session, observer holds {}", hand);
        Ok(Self {
            state,
            constraints,
            config,
            poisoned: false,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// the single mutator. observations take effect in application order;
    /// each one is validated, folded into the constraint store, and
    /// propagated to the fixed point before the call returns.
    pub fn apply(&mut self, obs: Observation) -> Result<(), Error> {
        if self.poisoned {
            return Err(Error::Inconsistent(
                "session died on an earlier contradiction".to_string(),
            ));
        }
        self.state.apply(obs)?;
        self.constraints.observe(&obs);
        let propagated = self.constraints.propagate(&self.state);
        if propagated.is_err() {
            self.poisoned = true;
        }
        propagated
    }

    /// the posterior over every (hidden seat, unknown tile) pair,
    /// recomputed from the current state by whichever backend the
    /// dispatcher selects
    pub fn marginals(&self) -> Result<Marginals, Error> {
        if self.poisoned {
            return Err(Error::Inconsistent(
                "session died on an earlier contradiction".to_string(),
            ));
        }
        dispatch::posterior(&self.state, &self.constraints, &self.config)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::seat::Seat;
    use crate::game::side::Side;
    use crate::tiles::pip::Pip;
    use crate::tiles::tile::Tile;

    fn hand() -> Tiles {
        vec![(0, 1), (1, 3), (2, 5), (3, 3), (4, 6), (5, 5), (6, 6)]
            .into_iter()
            .map(Tile::from)
            .collect()
    }

    fn session() -> Session {
        Session::new(hand(), Config::default()).unwrap()
    }

    fn play(player: Seat, tile: (u8, u8), side: Side) -> Observation {
        Observation::Play {
            player,
            tile: Tile::from(tile),
            side,
        }
    }

    fn pass(player: Seat, ends: (u8, u8)) -> Observation {
        Observation::Pass {
            player,
            ends: (Pip::from(ends.0), Pip::from(ends.1)),
        }
    }

    #[test]
    fn initialization() {
        let session = session();
        assert_eq!(session.state().unknown().size(), 21);
        for seat in Seat::hidden() {
            assert_eq!(session.constraints().candidates(*seat), session.state().unknown());
        }
        let marginals = session.marginals().unwrap();
        for (_, _, p) in marginals.triples() {
            assert!((p - 1.0 / 3.0).abs() < 0.025);
        }
    }

    #[test]
    fn first_pass() {
        let mut session = session();
        session.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        session.apply(pass(Seat::West, (3, 3))).unwrap();
        assert_eq!(session.state().unknown().size(), 21);
        assert_eq!(session.constraints().candidates(Seat::West).size(), 16);
        assert_eq!(session.constraints().candidates(Seat::North).size(), 21);
        assert_eq!(session.constraints().candidates(Seat::East).size(), 21);
        let marginals = session.marginals().unwrap();
        for tile in [(0, 3), (2, 3), (3, 4), (3, 5), (3, 6)] {
            assert_eq!(marginals.get(Seat::West, Tile::from(tile)), 0.0);
        }
    }

    #[test]
    fn play_removes_tile() {
        let mut session = session();
        session.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        session.apply(pass(Seat::West, (3, 3))).unwrap();
        session.apply(play(Seat::North, (3, 6), Side::Left)).unwrap();
        assert_eq!(session.state().unknown().size(), 20);
        assert_eq!(session.state().quota(Seat::North), 6);
        assert_eq!(session.state().ends().pair(), Some((Pip::Three, Pip::Six)));
        let tile = Tile::from((3, 6));
        for seat in Seat::hidden() {
            assert!(!session.constraints().candidates(*seat).contains(tile));
        }
    }

    #[test]
    fn saturated_hand_via_cascade() {
        // three passes by West at shifting ends whittle its candidates
        // down to exactly its seven remaining tiles
        let mut session = session();
        session.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        session.apply(pass(Seat::West, (3, 3))).unwrap();
        session.apply(play(Seat::North, (3, 6), Side::Left)).unwrap();
        session.apply(pass(Seat::West, (6, 3))).unwrap();
        session.apply(play(Seat::East, (3, 4), Side::Right)).unwrap();
        session.apply(pass(Seat::West, (6, 4))).unwrap();
        let west = session.constraints().candidates(Seat::West);
        assert_eq!(west.size(), 7);
        // saturation cascades: nobody else may hold West's tiles
        assert_eq!(session.constraints().candidates(Seat::North).size(), 12);
        assert_eq!(session.constraints().candidates(Seat::East).size(), 12);
        let marginals = session.marginals().unwrap();
        for tile in west {
            assert_eq!(marginals.get(Seat::West, tile), 1.0);
            assert_eq!(marginals.get(Seat::North, tile), 0.0);
            assert_eq!(marginals.get(Seat::East, tile), 0.0);
        }
        for tile in session.state().unknown().minus(west) {
            assert_eq!(marginals.get(Seat::West, tile), 0.0);
            assert_eq!(marginals.get(Seat::North, tile), 0.5);
            assert_eq!(marginals.get(Seat::East, tile), 0.5);
        }
    }

    #[test]
    fn invalid_observation_bounces() {
        let mut session = session();
        session.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        // wrong ends on a pass
        assert!(session.apply(pass(Seat::West, (2, 3))).is_err());
        // session remains usable
        session.apply(pass(Seat::West, (3, 3))).unwrap();
        // replaying a consumed tile fails
        let obs = play(Seat::North, (3, 6), Side::Left);
        session.apply(obs).unwrap();
        assert!(session.apply(obs).is_err());
    }

    #[test]
    fn observations_arrive_over_the_wire() {
        let mut session = session();
        let first: Observation = serde_json::from_str(
            r#"{"kind":"play","player":"S","tile":[3,3],"side":"start"}"#,
        )
        .unwrap();
        let second: Observation =
            serde_json::from_str(r#"{"kind":"pass","player":"W","ends":[3,3]}"#).unwrap();
        session.apply(first).unwrap();
        session.apply(second).unwrap();
        assert_eq!(session.constraints().candidates(Seat::West).size(), 16);
    }

    #[test]
    fn snapshot_freezes_the_position() {
        let mut session = session();
        session.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        session.apply(pass(Seat::West, (3, 3))).unwrap();
        let snapshot = session.snapshot();
        session.apply(play(Seat::North, (3, 6), Side::Left)).unwrap();
        assert_eq!(snapshot.unknown.size(), 21);
        assert_eq!(snapshot.quota, [7, 7, 7]);
        assert_eq!(snapshot.candidates[Seat::West.slot()].size(), 16);
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.deal().unknown, snapshot.unknown);
        assert_eq!(session.state().unknown().size(), 20);
    }
}
