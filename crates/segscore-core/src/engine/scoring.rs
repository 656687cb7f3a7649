use super::error::EngineError;
use super::metrics::StructureTallies;
use crate::core::geometry::{GeometryError, Region};
use crate::core::models::registry::ScanRegistry;
use crate::core::models::scan::Scan;
use crate::core::models::slice::{ContourSource, Slice};
use crate::core::models::structure::Structure;
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("geometry failure on slice {slice}, structure '{structure}': {source}")]
    Geometry {
        slice: usize,
        structure: Structure,
        #[source]
        source: GeometryError,
    },
}

/// Metrics for one scan: the tally of every slice and their per-structure
/// sums.
#[derive(Debug, Clone)]
pub struct ScanMetrics {
    /// Per-slice tallies; index `i` holds slice ordinal `i + 1`.
    pub per_slice: Vec<StructureTallies>,
    /// Per-structure sums over all slices.
    pub totals: StructureTallies,
}

impl ScanMetrics {
    /// Per-structure F-scores for this scan, in catalog order.
    pub fn f_scores(&self) -> [f64; Structure::COUNT] {
        Structure::ALL.map(|structure| self.totals[structure].f_score())
    }
}

/// Corpus-level aggregation over every scan in the registry.
#[derive(Debug, Clone)]
pub struct CorpusMetrics {
    /// Per-scan metrics in registry (sorted scan id) order.
    pub per_scan: Vec<(String, ScanMetrics)>,
    /// Per-scan F-scores averaged over the scan count, in catalog order.
    pub structure_means: [f64; Structure::COUNT],
    /// Weighted mean of the structure means, scaled x100.
    pub overall: f64,
}

/// Scores one slice: per catalog structure, the TP/FP/FN overlap areas
/// between the truth and solution regions.
///
/// Truth and solution polygon lists are unioned first, so overlapping
/// contours on the same side are never double-counted. A structure absent
/// from both sides contributes nothing. When truth is absent but a
/// solution was submitted, the false alarm is charged (as FP area) only to
/// the primary target; for every other structure the case is ignored.
pub fn score_slice(slice: &Slice) -> Result<StructureTallies, ScoringError> {
    let mut tallies = StructureTallies::new();
    for structure in Structure::ALL {
        let geometry_failure = |source: GeometryError| ScoringError::Geometry {
            slice: slice.ordinal(),
            structure,
            source,
        };
        let truth = Region::union(slice.contours(ContourSource::Truth, structure))
            .map_err(geometry_failure)?;
        let solution = Region::union(slice.contours(ContourSource::Solution, structure))
            .map_err(geometry_failure)?;
        let area_truth = truth.area();
        let area_solution = solution.area();

        let tally = &mut tallies[structure];
        if area_truth == 0.0 {
            if area_solution > 0.0 && structure == Structure::PRIMARY {
                tally.false_positive = area_solution;
            }
        } else if area_solution == 0.0 {
            tally.false_negative = area_truth;
        } else {
            let overlap = truth.intersect(&solution).area();
            tally.true_positive = overlap;
            tally.false_positive = area_solution - overlap;
            tally.false_negative = area_truth - overlap;
        }
    }
    Ok(tallies)
}

/// Scores every slice of a scan and sums the per-structure tallies.
pub fn score_scan(scan: &Scan) -> Result<ScanMetrics, ScoringError> {
    let mut per_slice = Vec::with_capacity(scan.slice_count());
    let mut totals = StructureTallies::new();
    for slice in scan.slices() {
        let tallies = score_slice(slice)?;
        totals.accumulate(&tallies);
        per_slice.push(tallies);
    }
    Ok(ScanMetrics { per_slice, totals })
}

/// Scores the whole corpus and aggregates to the single overall score.
///
/// Scans are independent and scored in parallel; results are collected in
/// registry (sorted scan id) order and reduced sequentially, so the
/// floating-point summation order and the reported score are
/// deterministic.
pub fn score_corpus(registry: &ScanRegistry) -> Result<CorpusMetrics, EngineError> {
    if registry.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }

    let scans: Vec<&Scan> = registry.iter().collect();
    let per_scan: Vec<(String, ScanMetrics)> = scans
        .into_par_iter()
        .map(|scan| {
            score_scan(scan)
                .map(|metrics| (scan.id().to_string(), metrics))
                .map_err(|source| EngineError::Scoring {
                    scan: scan.id().to_string(),
                    source,
                })
        })
        .collect::<Result<_, _>>()?;

    let scan_count = per_scan.len() as f64;
    let mut structure_means = [0.0; Structure::COUNT];
    for (_, metrics) in &per_scan {
        for structure in Structure::ALL {
            structure_means[structure.index()] += metrics.totals[structure].f_score();
        }
    }
    for mean in &mut structure_means {
        *mean /= scan_count;
    }

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for structure in Structure::ALL {
        weighted += structure.weight() * structure_means[structure.index()];
        total_weight += structure.weight();
    }
    let overall = weighted / total_weight * 100.0;
    debug!(overall, scans = per_scan.len(), "corpus aggregated");

    Ok(CorpusMetrics {
        per_scan,
        structure_means,
        overall,
    })
}
