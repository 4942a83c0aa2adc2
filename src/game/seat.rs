/// one of the four positions in clockwise turn order.
/// South is the observer; West, North, East are the hidden universe.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Seat {
    #[serde(rename = "S")]
    South,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "N")]
    North,
    #[serde(rename = "E")]
    East,
}

impl Seat {
    pub const fn hidden() -> &'static [Self; 3] {
        &[Self::West, Self::North, Self::East]
    }
    pub const fn next(&self) -> Self {
        match self {
            Self::South => Self::West,
            Self::West => Self::North,
            Self::North => Self::East,
            Self::East => Self::South,
        }
    }
    pub const fn is_observer(&self) -> bool {
        matches!(self, Self::South)
    }
    /// dense index into per-hidden-seat tables
    pub fn slot(&self) -> usize {
        match self {
            Self::West => 0,
            Self::North => 1,
            Self::East => 2,
            Self::South => panic!("observer has no slot"),
        }
    }
    pub fn from_slot(n: usize) -> Self {
        match n {
            0 => Self::West,
            1 => Self::North,
            2 => Self::East,
            _ => panic!("no other slots"),
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::South => write!(f, "S"),
            Self::West => write!(f, "W"),
            Self::North => write!(f, "N"),
            Self::East => write!(f, "E"),
        }
    }
}

impl crate::Arbitrary for Seat {
    fn random() -> Self {
        use rand::Rng;
        match rand::rng().random_range(0..4) {
            0 => Self::South,
            1 => Self::West,
            2 => Self::North,
            _ => Self::East,
        }
    }
}
