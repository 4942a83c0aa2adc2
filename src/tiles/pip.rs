/// one of the seven pip values on a double-six tile
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Pip {
    Zero = 0,
    One = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
}

impl Pip {
    pub const fn all() -> &'static [Self; 7] {
        &[
            Self::Zero,
            Self::One,
            Self::Two,
            Self::Three,
            Self::Four,
            Self::Five,
            Self::Six,
        ]
    }
    /// the 7 tiles that carry this pip value
    pub fn suit(self) -> Tiles {
        Tiles::from(SUITS[self as usize])
    }
}

/// suit masks over the dense 0..28 tile indexing, built at compile time.
/// the tile (hi, lo) sits at bit hi * (hi + 1) / 2 + lo.
const SUITS: [u32; 7] = suits();
const fn suits() -> [u32; 7] {
    let mut suits = [0u32; 7];
    let mut hi = 0;
    while hi < 7 {
        let mut lo = 0;
        while lo <= hi {
            let index = hi * (hi + 1) / 2 + lo;
            suits[hi] |= 1 << index;
            suits[lo] |= 1 << index;
            lo += 1;
        }
        hi += 1;
    }
    suits
}

/// u8 isomorphism
impl From<u8> for Pip {
    fn from(n: u8) -> Self {
        match n {
            0 => Self::Zero,
            1 => Self::One,
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5 => Self::Five,
            6 => Self::Six,
            _ => panic!("no other pips"),
        }
    }
}
impl From<Pip> for u8 {
    fn from(pip: Pip) -> Self {
        pip as u8
    }
}

impl serde::Serialize for Pip {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}
impl<'de> serde::Deserialize<'de> for Pip {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        match n {
            0..=6 => Ok(Self::from(n)),
            n => Err(serde::de::Error::custom(format!("pip out of range: {}", n))),
        }
    }
}

impl std::fmt::Display for Pip {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

impl crate::Arbitrary for Pip {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::rng().random_range(0..7) as u8)
    }
}

use super::tiles::Tiles;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn u8_bijection() {
        for n in 0..7u8 {
            assert_eq!(u8::from(Pip::from(n)), n);
        }
    }

    #[test]
    fn suit_size() {
        for pip in Pip::all() {
            assert_eq!(pip.suit().size(), 7);
        }
    }

    #[test]
    fn suits_partition_doubles() {
        // a non-double sits in two suits, a double in one
        let total = Pip::all().iter().map(|p| p.suit().size()).sum::<usize>();
        assert_eq!(total, 21 * 2 + 7);
    }

    #[test]
    #[should_panic]
    fn seven_pips_only() {
        let _ = Pip::from(7u8);
    }
}
