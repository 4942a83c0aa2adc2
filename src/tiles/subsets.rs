use super::tile::Tile;
use super::tiles::Tiles;
use crate::Count;

/// n choose k with saturating arithmetic.
/// the running product (n-0)(n-1)../1·2.. stays integral at every step;
/// once it saturates the result is only an "enormous" signal, which is
/// all the workload bound needs.
pub fn choose(n: usize, k: usize) -> Count {
    if k > n {
        0
    } else {
        (0..k).fold(1 as Count, |acc, i| {
            acc.saturating_mul((n - i) as Count) / (i + 1) as Count
        })
    }
}

/// iterator over all k-subsets of a fixed domain of tiles.
///
/// the walk is the classic next-bit-permutation over a dense k-of-n word,
/// with word bits mapped through the domain's member list, so sparse
/// candidate sets iterate without wasted positions.
/// https://graphics.stanford.edu/~seander/bithacks.html#NextBitPermutation
pub struct Subsets {
    domain: Vec<Tile>,
    next: u32,
    k: usize,
    live: bool,
}

impl From<(Tiles, usize)> for Subsets {
    fn from((domain, k): (Tiles, usize)) -> Self {
        let n = domain.size();
        Self {
            domain: Vec::<Tile>::from(domain),
            next: if k == 0 { 0 } else { (1u32 << k) - 1 },
            k,
            live: k <= n,
        }
    }
}

impl Subsets {
    /// how many subsets this iterator will yield in total
    pub fn combinations(&self) -> Count {
        choose(self.domain.len(), self.k)
    }
    fn permute(x: u32) -> u32 {
        let  a = /* 000_111 <- 000_100 || 000_011 */ x | (x - 1);
        let  b = /* 001_000 <-                    */ a + 1;
        let  c = /* 111_000 <-                    */ !   a;
        let  d = /* 001_000 <- 111_000 && 001_000 */ c & b;
        let  e = /* 000_111 <-                    */ d - 1;
        let  f = /*         >> xxx                */ 1 + x.trailing_zeros();
        let  g = /* 000_000 <-                    */ e >> f;
        b | g
    }
    fn expand(&self, word: u32) -> Tiles {
        let mut word = word;
        let mut tiles = Tiles::empty();
        while word != 0 {
            let position = word.trailing_zeros() as usize;
            word &= word - 1;
            tiles.insert(self.domain[position]);
        }
        tiles
    }
}

impl Iterator for Subsets {
    type Item = Tiles;
    fn next(&mut self) -> Option<Self::Item> {
        if !self.live {
            None
        } else if self.k == 0 {
            self.live = false;
            Some(Tiles::empty())
        } else if self.next >= 1 << self.domain.len() {
            self.live = false;
            None
        } else {
            let word = self.next;
            self.next = Self::permute(word);
            Some(self.expand(word))
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let combos = self.combinations() as usize;
        (combos, Some(combos))
    }
}
