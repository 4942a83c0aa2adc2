use super::pip::Pip;

/// an unordered pair of pips stored canonically with hi >= lo.
/// equality and hashing are structural on the canonical form.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tile {
    hi: Pip,
    lo: Pip,
}

impl Tile {
    pub const COUNT: usize = 28;

    pub fn hi(&self) -> Pip {
        self.hi
    }
    pub fn lo(&self) -> Pip {
        self.lo
    }
    /// both pip values, ascending
    pub fn pips(&self) -> (Pip, Pip) {
        (self.lo, self.hi)
    }
    pub fn has(&self, pip: Pip) -> bool {
        self.hi == pip || self.lo == pip
    }
    /// the value left exposed when this tile is matched on `pip`.
    /// for a double the exposed value is the same pip.
    pub fn other(&self, pip: Pip) -> Pip {
        if self.lo == pip {
            self.hi
        } else if self.hi == pip {
            self.lo
        } else {
            panic!("{} is not on {}", pip, self)
        }
    }
    pub fn is_double(&self) -> bool {
        self.hi == self.lo
    }
}

/// u8 isomorphism over the dense triangular indexing
impl From<Tile> for u8 {
    fn from(tile: Tile) -> Self {
        let hi = tile.hi as u8;
        let lo = tile.lo as u8;
        hi * (hi + 1) / 2 + lo
    }
}
impl From<u8> for Tile {
    fn from(n: u8) -> Self {
        let mut hi = 0u8;
        while (hi + 1) * (hi + 2) / 2 <= n {
            hi += 1;
        }
        let lo = n - hi * (hi + 1) / 2;
        Self {
            hi: Pip::from(hi),
            lo: Pip::from(lo),
        }
    }
}

/// u32 isomorphism onto the one-hot set representation
impl From<Tile> for u32 {
    fn from(tile: Tile) -> Self {
        1 << u8::from(tile)
    }
}

/// pips in either order; canonicalized on entry
impl From<(u8, u8)> for Tile {
    fn from((a, b): (u8, u8)) -> Self {
        Self {
            hi: Pip::from(a.max(b)),
            lo: Pip::from(a.min(b)),
        }
    }
}
impl From<(Pip, Pip)> for Tile {
    fn from((a, b): (Pip, Pip)) -> Self {
        Self::from((u8::from(a), u8::from(b)))
    }
}

/// wire form is the ascending array [lo, hi]
impl serde::Serialize for Tile {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.lo as u8, self.hi as u8).serialize(serializer)
    }
}
impl<'de> serde::Deserialize<'de> for Tile {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let (a, b) = <(u8, u8)>::deserialize(deserializer)?;
        if a > 6 || b > 6 {
            Err(serde::de::Error::custom(format!(
                "pip out of range: [{}, {}]",
                a, b
            )))
        } else {
            Ok(Self::from((a, b)))
        }
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{}|{}]", self.lo, self.hi)
    }
}

impl crate::Arbitrary for Tile {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::rng().random_range(0..Self::COUNT) as u8)
    }
}
