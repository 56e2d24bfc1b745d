use serde::Deserialize;

use crate::geometry::Dimensions;

/// Sums the three edge lengths; the size proxy used to pick the largest or smallest entry.
pub const fn dimension_score(dims: Dimensions) -> i64 {
    dims.sum()
}

/// Ranks bins when looking for the smallest one that holds every item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinScore {
    /// `2 * w + d`.
    #[default]
    Linear,
    /// `w * h * d`.
    Volume,
}

impl BinScore {
    pub const fn score(&self, dims: Dimensions) -> i64 {
        match self {
            BinScore::Linear => dims.w.saturating_mul(2).saturating_add(dims.d),
            BinScore::Volume => dims.volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_score_ignores_shape() {
        assert_eq!(dimension_score(Dimensions::new(1, 2, 9)), 12);
        assert_eq!(dimension_score(Dimensions::new(4, 4, 4)), 12);
    }

    #[test]
    fn linear_score_skips_height() {
        let tall = Dimensions::new(5, 100, 5);
        let flat = Dimensions::new(6, 1, 6);
        assert_eq!(BinScore::Linear.score(tall), 15);
        assert!(BinScore::Linear.score(tall) < BinScore::Linear.score(flat));
        assert!(BinScore::Volume.score(tall) > BinScore::Volume.score(flat));
    }

    #[test]
    fn huge_bins_rank_last() {
        let huge = Dimensions::new(3_000_000, 3_000_000, 3_000_000);
        let small = Dimensions::new(2, 2, 2);
        assert!(BinScore::Volume.score(small) < BinScore::Volume.score(huge));
        assert_eq!(BinScore::Linear.score(Dimensions::new(i64::MAX, 1, 1)), i64::MAX);
    }
}
