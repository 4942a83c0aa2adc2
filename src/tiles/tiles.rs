use super::pip::Pip;
use super::tile::Tile;

/// Tiles is a bitstring of 28 bits stored as a u32,
/// each bit one tile in the (unordered) set.
/// all set algebra is branch-free on the mask.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Tiles(u32);

impl Tiles {
    pub const MASK: u32 = (1 << Tile::COUNT) - 1;

    pub const fn empty() -> Self {
        Self(0)
    }
    pub const fn full() -> Self {
        Self(Self::MASK)
    }
    /// tiles carrying a or b, i.e. everything placeable on open ends (a, b)
    pub fn block(a: Pip, b: Pip) -> Self {
        a.suit().union(b.suit())
    }

    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
    pub fn contains(&self, tile: Tile) -> bool {
        self.0 & u32::from(tile) != 0
    }
    /// superset test
    pub fn covers(&self, other: Self) -> bool {
        other.0 & !self.0 == 0
    }

    pub fn insert(&mut self, tile: Tile) {
        self.0 |= u32::from(tile);
    }
    pub fn remove(&mut self, tile: Tile) {
        self.0 &= !u32::from(tile);
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
    pub fn common(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
    pub fn minus(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
    pub fn complement(self) -> Self {
        Self(!self.0 & Self::MASK)
    }

    /// uniform draw of one member
    pub fn draw(&self, rng: &mut impl rand::Rng) -> Option<Tile> {
        if self.is_empty() {
            None
        } else {
            let mut bits = self.0;
            let nth = rng.random_range(0..self.size());
            for _ in 0..nth {
                bits &= bits - 1;
            }
            Some(Tile::from(bits.trailing_zeros() as u8))
        }
    }
}

/// iteration plucks the lowest set bit until none remain
impl Iterator for Tiles {
    type Item = Tile;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let index = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(Tile::from(index))
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size(), Some(self.size()))
    }
}

/// u32 isomorphism
impl From<u32> for Tiles {
    fn from(n: u32) -> Self {
        Self(n & Self::MASK)
    }
}
impl From<Tiles> for u32 {
    fn from(tiles: Tiles) -> Self {
        tiles.0
    }
}

/// Vec<Tile> isomorphism
impl From<Vec<Tile>> for Tiles {
    fn from(tiles: Vec<Tile>) -> Self {
        tiles.into_iter().collect()
    }
}
impl From<Tiles> for Vec<Tile> {
    fn from(tiles: Tiles) -> Self {
        tiles.collect()
    }
}
impl FromIterator<Tile> for Tiles {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |mut tiles, tile| {
                tiles.insert(tile);
                tiles
            })
    }
}

impl std::fmt::Display for Tiles {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for tile in *self {
            write!(f, "{} ", tile)?;
        }
        Ok(())
    }
}

impl crate::Arbitrary for Tiles {
    fn random() -> Self {
        use rand::Rng;
        Self::from(rand::rng().random_range(0..=Self::MASK))
    }
}
