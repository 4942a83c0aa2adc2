use super::side::Side;
use crate::error::Error;
use crate::tiles::pip::Pip;
use crate::tiles::tile::Tile;
use crate::tiles::tiles::Tiles;

/// the open ends of the domino chain.
/// Empty is the sentinel before the first play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ends {
    Empty,
    Open(Pip, Pip),
}

impl Ends {
    /// tiles placeable right now
    pub fn playable(&self) -> Tiles {
        match self {
            Self::Empty => Tiles::full(),
            Self::Open(l, r) => Tiles::block(*l, *r),
        }
    }
    /// normalized unordered pair, for pass validation
    pub fn pair(&self) -> Option<(Pip, Pip)> {
        match self {
            Self::Empty => None,
            Self::Open(l, r) => Some((*l.min(r), *l.max(r))),
        }
    }
    /// the ends after placing `tile` on `side`. the matched end is
    /// replaced by the tile's other value; a matching double leaves
    /// the end unchanged. the first play establishes both ends.
    pub fn place(self, tile: Tile, side: Side) -> Result<Self, Error> {
        match (self, side) {
            (Self::Empty, Side::Start) => {
                let (lo, hi) = tile.pips();
                Ok(Self::Open(lo, hi))
            }
            (Self::Empty, side) => Err(Error::InvalidObservation(format!(
                "chain is empty but {} was played on side {}",
                tile, side
            ))),
            (Self::Open(..), Side::Start) => Err(Error::InvalidObservation(format!(
                "chain is already open but {} was played on side start",
                tile
            ))),
            (Self::Open(l, r), Side::Left) if tile.has(l) => Ok(Self::Open(tile.other(l), r)),
            (Self::Open(l, r), Side::Right) if tile.has(r) => Ok(Self::Open(l, tile.other(r))),
            (Self::Open(l, r), side) => Err(Error::InvalidObservation(format!(
                "{} does not match the {} end of {}:{}",
                tile, side, l, r
            ))),
        }
    }
}

impl std::fmt::Display for Ends {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "-:-"),
            Self::Open(l, r) => write!(f, "{}:{}", l, r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_play() {
        let ends = Ends::Empty.place(Tile::from((2, 5)), Side::Start).unwrap();
        assert_eq!(ends, Ends::Open(Pip::Two, Pip::Five));
        assert!(Ends::Empty.place(Tile::from((2, 5)), Side::Left).is_err());
    }

    #[test]
    fn first_double() {
        let ends = Ends::Empty.place(Tile::from((3, 3)), Side::Start).unwrap();
        assert_eq!(ends, Ends::Open(Pip::Three, Pip::Three));
    }

    #[test]
    fn match_replaces_end() {
        let ends = Ends::Open(Pip::Three, Pip::Five);
        assert_eq!(
            ends.place(Tile::from((3, 6)), Side::Left).unwrap(),
            Ends::Open(Pip::Six, Pip::Five),
        );
        assert_eq!(
            ends.place(Tile::from((5, 0)), Side::Right).unwrap(),
            Ends::Open(Pip::Three, Pip::Zero),
        );
    }

    #[test]
    fn double_keeps_end() {
        let ends = Ends::Open(Pip::Three, Pip::Five);
        assert_eq!(
            ends.place(Tile::from((3, 3)), Side::Left).unwrap(),
            Ends::Open(Pip::Three, Pip::Five),
        );
    }

    #[test]
    fn mismatch_rejected() {
        let ends = Ends::Open(Pip::Three, Pip::Five);
        assert!(ends.place(Tile::from((2, 6)), Side::Left).is_err());
        assert!(ends.place(Tile::from((3, 6)), Side::Right).is_err());
        assert!(ends.place(Tile::from((3, 6)), Side::Start).is_err());
    }

    #[test]
    fn playable_is_block() {
        assert_eq!(Ends::Empty.playable(), Tiles::full());
        assert_eq!(
            Ends::Open(Pip::Two, Pip::Five).playable(),
            Tiles::block(Pip::Two, Pip::Five),
        );
    }
}
