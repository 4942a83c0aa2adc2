use super::ends::Ends;
use super::observation::Observation;
use super::seat::Seat;
use crate::error::Error;
use crate::tiles::tiles::Tiles;

/// the mutable ledger of everything the observer has seen.
///
/// the unknown set shrinks monotonically as hidden seats play; the
/// observer's own plays move the ends and its hand bookkeeping only.
/// apply is check-then-commit, so a rejected observation leaves the
/// state untouched.
#[derive(Debug, Clone)]
pub struct State {
    observer: Tiles,
    unknown: Tiles,
    quota: [u8; 3],
    ends: Ends,
    history: Vec<Observation>,
}

impl State {
    pub fn new(hand: Tiles) -> Result<Self, Error> {
        if hand.size() != 7 {
            return Err(Error::InvalidObservation(format!(
                "observer hand must hold 7 tiles, got {}",
                hand.size()
            )));
        }
        Ok(Self {
            observer: hand,
            unknown: hand.complement(),
            quota: [7; 3],
            ends: Ends::Empty,
            history: Vec::new(),
        })
    }

    pub fn observer(&self) -> Tiles {
        self.observer
    }
    pub fn unknown(&self) -> Tiles {
        self.unknown
    }
    pub fn quota(&self, seat: Seat) -> u8 {
        self.quota[seat.slot()]
    }
    pub fn quotas(&self) -> [u8; 3] {
        self.quota
    }
    pub fn ends(&self) -> Ends {
        self.ends
    }
    pub fn history(&self) -> &[Observation] {
        &self.history
    }

    /// validate an observation against the current state without mutating
    pub fn check(&self, obs: &Observation) -> Result<(), Error> {
        match obs {
            Observation::Play { player, tile, side } if player.is_observer() => {
                if !self.observer.contains(*tile) {
                    return Err(Error::InvalidObservation(format!(
                        "observer does not hold {}",
                        tile
                    )));
                }
                self.ends.place(*tile, *side).map(|_| ())
            }
            Observation::Play { player, tile, side } => {
                if self.quota[player.slot()] == 0 {
                    return Err(Error::InvalidObservation(format!(
                        "{} has no tiles left to play",
                        player
                    )));
                }
                if !self.unknown.contains(*tile) {
                    return Err(Error::InvalidObservation(format!(
                        "{} is already accounted for",
                        tile
                    )));
                }
                self.ends.place(*tile, *side).map(|_| ())
            }
            Observation::Pass { player, .. } if player.is_observer() => Err(
                Error::InvalidObservation("observer passes are never observed".to_string()),
            ),
            Observation::Pass { player, ends } => {
                let (a, b) = *ends;
                let claimed = (a.min(b), a.max(b));
                match self.ends.pair() {
                    None => Err(Error::InvalidObservation(format!(
                        "{} cannot pass before the first play",
                        player
                    ))),
                    Some(current) if current == claimed => Ok(()),
                    Some((l, r)) => Err(Error::InvalidObservation(format!(
                        "pass records ends {}:{} but the chain shows {}:{}",
                        a, b, l, r
                    ))),
                }
            }
        }
    }

    /// the single mutator. observations take effect in application order.
    pub fn apply(&mut self, obs: Observation) -> Result<(), Error> {
        self.check(&obs)?;
        if let Observation::Play { player, tile, side } = obs {
            self.ends = self.ends.place(tile, side).expect("checked above");
            if player.is_observer() {
                self.observer.remove(tile);
            } else {
                self.unknown.remove(tile);
                self.quota[player.slot()] -= 1;
            }
        }
        self.history.push(obs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::side::Side;
    use crate::tiles::pip::Pip;
    use crate::tiles::tile::Tile;

    fn hand() -> Tiles {
        vec![(0, 1), (1, 3), (2, 5), (3, 3), (4, 6), (5, 5), (6, 6)]
            .into_iter()
            .map(Tile::from)
            .collect()
    }

    fn play(player: Seat, tile: (u8, u8), side: Side) -> Observation {
        Observation::Play {
            player,
            tile: Tile::from(tile),
            side,
        }
    }

    #[test]
    fn fresh_ledger() {
        let state = State::new(hand()).unwrap();
        assert_eq!(state.unknown().size(), 21);
        assert_eq!(state.quotas(), [7, 7, 7]);
        assert_eq!(state.ends(), Ends::Empty);
        assert!(state.history().is_empty());
    }

    #[test]
    fn short_hand_rejected() {
        assert!(State::new(Tiles::from(0b_111u32)).is_err());
    }

    #[test]
    fn observer_play_keeps_unknown() {
        let mut state = State::new(hand()).unwrap();
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        assert_eq!(state.unknown().size(), 21);
        assert_eq!(state.observer().size(), 6);
        assert_eq!(state.quotas(), [7, 7, 7]);
        assert!(state.ends().pair() == Some((Pip::Three, Pip::Three)));
    }

    #[test]
    fn hidden_play_shrinks_unknown() {
        let mut state = State::new(hand()).unwrap();
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        state.apply(play(Seat::North, (3, 6), Side::Left)).unwrap();
        assert_eq!(state.unknown().size(), 20);
        assert_eq!(state.quota(Seat::North), 6);
        assert!(!state.unknown().contains(Tile::from((3, 6))));
    }

    #[test]
    fn replay_rejected() {
        let mut state = State::new(hand()).unwrap();
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        let obs = play(Seat::North, (3, 6), Side::Left);
        state.apply(obs).unwrap();
        assert!(state.apply(obs).is_err());
    }

    #[test]
    fn observer_cannot_play_foreign_tile() {
        let mut state = State::new(hand()).unwrap();
        assert!(state.apply(play(Seat::South, (0, 2), Side::Start)).is_err());
    }

    #[test]
    fn pass_must_match_ends() {
        let mut state = State::new(hand()).unwrap();
        let early = Observation::Pass {
            player: Seat::West,
            ends: (Pip::Three, Pip::Three),
        };
        assert!(state.apply(early).is_err());
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        assert!(state.apply(early).is_ok());
        let wrong = Observation::Pass {
            player: Seat::West,
            ends: (Pip::Two, Pip::Three),
        };
        assert!(state.apply(wrong).is_err());
    }

    #[test]
    fn observer_pass_rejected() {
        let mut state = State::new(hand()).unwrap();
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        let obs = Observation::Pass {
            player: Seat::South,
            ends: (Pip::Three, Pip::Three),
        };
        assert!(state.apply(obs).is_err());
    }

    #[test]
    fn rejection_leaves_state_untouched() {
        let mut state = State::new(hand()).unwrap();
        state.apply(play(Seat::South, (3, 3), Side::Start)).unwrap();
        let before = state.clone();
        let bad = play(Seat::West, (0, 2), Side::Right);
        assert!(state.apply(bad).is_err());
        assert_eq!(state.unknown(), before.unknown());
        assert_eq!(state.quotas(), before.quotas());
        assert_eq!(state.ends(), before.ends());
        assert_eq!(state.history().len(), before.history().len());
    }
}
