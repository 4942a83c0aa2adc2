use super::deal::Deal;
use crate::error::Error;
use crate::game::seat::Seat;
use crate::tiles::tile::Tile;
use crate::tiles::tiles::Tiles;
use crate::Probability;
use crate::EPSILON;

/// the posterior marginal table over (hidden seat, unknown tile).
///
/// rows are hidden seats, columns the dense tile indexing; the support
/// set pins down which columns are meaningful. tables are derived, never
/// stored: every query recomputes them from the live constraints.
#[derive(Debug, Clone)]
pub struct Marginals {
    support: Tiles,
    table: [[Probability; 28]; 3],
}

impl Marginals {
    /// normalize accumulated (weighted) assignment mass into probabilities
    pub fn from_sums(support: Tiles, sums: &[[f64; 28]; 3], total: f64) -> Self {
        let mut table = [[0.0; 28]; 3];
        for p in 0..3 {
            for tile in support {
                let i = u8::from(tile) as usize;
                table[p][i] = sums[p][i] / total;
            }
        }
        Self { support, table }
    }

    pub fn support(&self) -> Tiles {
        self.support
    }

    /// P(seat holds tile); zero for tiles outside the support
    pub fn get(&self, seat: Seat, tile: Tile) -> Probability {
        self.table[seat.slot()][u8::from(tile) as usize]
    }

    /// the wire shape: exactly (hidden seats) x (unknown tiles)
    pub fn triples(&self) -> Vec<(Seat, Tile, Probability)> {
        Seat::hidden()
            .iter()
            .flat_map(|seat| {
                self.support
                    .map(move |tile| (*seat, tile, self.get(*seat, tile)))
            })
            .collect()
    }

    /// every invariant a correct posterior satisfies, within tolerance:
    /// unit column sums, quota row sums, probability range, zero mass
    /// outside the candidate sets, certainty for unique holders
    pub fn audit(&self, deal: &Deal) -> Result<(), Error> {
        for (seat, tile, p) in self.triples() {
            if !(0.0..=1.0 + EPSILON).contains(&p) {
                return Err(Error::Internal(format!(
                    "P({}, {}) = {} is out of range",
                    seat, tile, p
                )));
            }
            if !deal.candidates[seat.slot()].contains(tile) && p > EPSILON {
                return Err(Error::Internal(format!(
                    "{} is not a candidate of {} yet P = {}",
                    tile, seat, p
                )));
            }
        }
        for tile in self.support {
            let mass = Seat::hidden()
                .iter()
                .map(|seat| self.get(*seat, tile))
                .sum::<Probability>();
            if (mass - 1.0).abs() > EPSILON {
                return Err(Error::Internal(format!(
                    "{} is held with total probability {}",
                    tile, mass
                )));
            }
            let holders = (0..3)
                .filter(|p| deal.candidates[*p].contains(tile))
                .collect::<Vec<_>>();
            if let [only] = holders[..] {
                if (self.get(Seat::from_slot(only), tile) - 1.0).abs() > EPSILON {
                    return Err(Error::Internal(format!(
                        "{} is the unique holder of {} yet P < 1",
                        Seat::from_slot(only),
                        tile
                    )));
                }
            }
        }
        for seat in Seat::hidden() {
            let mass = self
                .support
                .map(|tile| self.get(*seat, tile))
                .sum::<Probability>();
            let quota = deal.quota[seat.slot()] as Probability;
            if (mass - quota).abs() > EPSILON * quota.max(1.0) {
                return Err(Error::Internal(format!(
                    "{} holds {} tiles in expectation but must hold {}",
                    seat, mass, quota
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform() -> (Deal, Marginals) {
        let unknown = Tiles::full().take(6).collect::<Tiles>();
        let deal = Deal {
            unknown,
            quota: [2, 2, 2],
            candidates: [unknown; 3],
        };
        let mut sums = [[0.0; 28]; 3];
        for p in 0..3 {
            for tile in unknown {
                sums[p][u8::from(tile) as usize] = 1.0;
            }
        }
        (deal, Marginals::from_sums(unknown, &sums, 3.0))
    }

    #[test]
    fn uniform_audits_clean() {
        let (deal, marginals) = uniform();
        assert!(marginals.audit(&deal).is_ok());
    }

    #[test]
    fn triples_cover_support() {
        let (_, marginals) = uniform();
        assert_eq!(marginals.triples().len(), 3 * 6);
        let json = serde_json::to_string(&marginals.triples()).unwrap();
        assert!(json.starts_with(r#"[["W",[0,0],"#));
    }

    #[test]
    fn lost_mass_is_flagged() {
        let (deal, marginals) = uniform();
        let mut sums = [[0.0; 28]; 3];
        sums[0] = marginals.table[0].map(|p| p * 3.0);
        let broken = Marginals::from_sums(marginals.support, &sums, 3.0);
        assert!(matches!(broken.audit(&deal), Err(Error::Internal(_))));
    }

    #[test]
    fn outside_candidates_is_flagged() {
        let (deal, marginals) = uniform();
        let mut narrow = deal;
        narrow.candidates[0] = Tiles::empty();
        assert!(matches!(marginals.audit(&narrow), Err(Error::Internal(_))));
    }
}
