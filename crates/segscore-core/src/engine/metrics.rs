use crate::core::models::structure::Structure;
use std::ops::{Index, IndexMut};

/// True/false-positive/negative accumulators for one structure.
///
/// Each term is an *area* in square pixels of overlap (or miss) between
/// the truth and solution regions, not a count.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AreaTally {
    pub true_positive: f64,
    pub false_positive: f64,
    pub false_negative: f64,
}

impl AreaTally {
    /// Harmonic mean of precision and recall.
    ///
    /// Returns 0.0 whenever nothing was ever detected correctly (TP is
    /// zero), even if FP and FN are individually zero as well.
    pub fn f_score(&self) -> f64 {
        if self.true_positive > 0.0 {
            let precision = self.true_positive / (self.true_positive + self.false_positive);
            let recall = self.true_positive / (self.true_positive + self.false_negative);
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        }
    }

    /// Adds another tally into this one, term by term.
    pub fn accumulate(&mut self, other: &AreaTally) {
        self.true_positive += other.true_positive;
        self.false_positive += other.false_positive;
        self.false_negative += other.false_negative;
    }

    /// Whether every term is zero (no signal for this structure).
    pub fn is_zero(&self) -> bool {
        self.true_positive == 0.0 && self.false_positive == 0.0 && self.false_negative == 0.0
    }
}

/// One [`AreaTally`] per catalog structure, indexed by [`Structure`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StructureTallies {
    tallies: [AreaTally; Structure::COUNT],
}

impl StructureTallies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds another tally set into this one, structure by structure.
    pub fn accumulate(&mut self, other: &StructureTallies) {
        for structure in Structure::ALL {
            self[structure].accumulate(&other[structure]);
        }
    }

    /// Tallies in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Structure, &AreaTally)> {
        Structure::ALL
            .into_iter()
            .map(|structure| (structure, &self.tallies[structure.index()]))
    }
}

impl Index<Structure> for StructureTallies {
    type Output = AreaTally;

    fn index(&self, structure: Structure) -> &AreaTally {
        &self.tallies[structure.index()]
    }
}

impl IndexMut<Structure> for StructureTallies {
    fn index_mut(&mut self, structure: Structure) -> &mut AreaTally {
        &mut self.tallies[structure.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_overlap_scores_one() {
        let tally = AreaTally {
            true_positive: 100.0,
            false_positive: 0.0,
            false_negative: 0.0,
        };
        assert_relative_eq!(tally.f_score(), 1.0);
    }

    #[test]
    fn half_precision_and_recall_scores_half() {
        let tally = AreaTally {
            true_positive: 50.0,
            false_positive: 50.0,
            false_negative: 50.0,
        };
        assert_relative_eq!(tally.f_score(), 0.5);
    }

    #[test]
    fn zero_true_positive_scores_zero_even_without_errors() {
        assert_eq!(AreaTally::default().f_score(), 0.0);

        let missed = AreaTally {
            true_positive: 0.0,
            false_positive: 12.5,
            false_negative: 40.0,
        };
        assert_eq!(missed.f_score(), 0.0);
    }

    #[test]
    fn accumulate_sums_term_by_term() {
        let mut total = StructureTallies::new();
        let mut slice = StructureTallies::new();
        slice[Structure::Tumor] = AreaTally {
            true_positive: 10.0,
            false_positive: 2.0,
            false_negative: 1.0,
        };
        total.accumulate(&slice);
        total.accumulate(&slice);

        assert_relative_eq!(total[Structure::Tumor].true_positive, 20.0);
        assert_relative_eq!(total[Structure::Tumor].false_positive, 4.0);
        assert!(total[Structure::Aorta].is_zero());
    }
}
