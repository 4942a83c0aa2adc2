use super::seat::Seat;
use super::side::Side;
use crate::tiles::pip::Pip;
use crate::tiles::tile::Tile;
use colored::*;

/// one event in the observation stream.
///
/// a Play by the observer is a legitimate observation: it moves the open
/// ends and the observer's own bookkeeping, never the unknown set.
/// a Pass carries the open ends the passing player faced at the time,
/// which is exactly the evidence the constraint store consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Observation {
    Play { player: Seat, tile: Tile, side: Side },
    Pass { player: Seat, ends: (Pip, Pip) },
}

impl std::fmt::Display for Observation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Play { player, tile, side } => {
                write!(f, "{} {}", player, format!("PLAY {} {}", tile, side).green())
            }
            Self::Pass { player, ends } => {
                write!(f, "{} {}", player, format!("PASS {}:{}", ends.0, ends.1).red())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_wire_form() {
        let obs = Observation::Play {
            player: Seat::West,
            tile: Tile::from((3, 5)),
            side: Side::Left,
        };
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"play","player":"W","tile":[3,5],"side":"left"}"#
        );
        assert_eq!(serde_json::from_str::<Observation>(&json).unwrap(), obs);
    }

    #[test]
    fn pass_wire_form() {
        let obs = Observation::Pass {
            player: Seat::East,
            ends: (Pip::Two, Pip::Six),
        };
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"kind":"pass","player":"E","ends":[2,6]}"#);
        assert_eq!(serde_json::from_str::<Observation>(&json).unwrap(), obs);
    }

    #[test]
    fn malformed_rejected() {
        assert!(serde_json::from_str::<Observation>(
            r#"{"kind":"play","player":"W","tile":[3,9],"side":"left"}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Observation>(
            r#"{"kind":"sit","player":"W"}"#
        )
        .is_err());
    }
}
