use super::evaluate::Evaluation;
use crate::core::models::structure::Structure;
use crate::engine::error::EngineError;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use tracing::info;

/// File receiving the single numeric score.
pub const RESULT_FILE: &str = "result.txt";

/// File receiving the diagnostic trace.
pub const INFO_FILE: &str = "info.txt";

/// Sentinel score written when a run aborts.
pub const SENTINEL_SCORE: f64 = -1.0;

/// Writes the result and diagnostic files for a completed evaluation.
///
/// A write failure is fatal to the run; nothing is retried.
pub fn write_report(out_dir: &Path, evaluation: &Evaluation) -> io::Result<()> {
    write_score(out_dir, evaluation.overall_score())?;
    fs::write(out_dir.join(INFO_FILE), diagnostic_trace(evaluation))?;
    info!(score = evaluation.overall_score(), dir = %out_dir.display(), "Report written.");
    Ok(())
}

/// Writes the sentinel score and the failure diagnostic for an aborted
/// run.
pub fn write_failure(out_dir: &Path, error: &EngineError) -> io::Result<()> {
    write_score(out_dir, SENTINEL_SCORE)?;
    fs::write(out_dir.join(INFO_FILE), format!("{error}\n"))
}

fn write_score(out_dir: &Path, score: f64) -> io::Result<()> {
    fs::write(out_dir.join(RESULT_FILE), format!("{score}\n"))
}

/// Plain-text trace: overall and per-structure means, per-scan tallies,
/// and the per-slice breakdown for the primary target on slices carrying
/// any signal.
fn diagnostic_trace(evaluation: &Evaluation) -> String {
    let corpus = &evaluation.corpus;
    let mut out = String::new();
    let _ = writeln!(out, "Phase: {}", evaluation.phase);
    let _ = writeln!(out, "Overall score: {:.6}", corpus.overall);
    for structure in Structure::ALL {
        let _ = writeln!(
            out,
            "  {}:\t{:.6}",
            structure,
            corpus.structure_means[structure.index()]
        );
    }

    for (id, metrics) in &corpus.per_scan {
        let _ = writeln!(out, "Scan {id}");
        for (structure, tally) in metrics.totals.iter() {
            let _ = writeln!(out, "  {structure}");
            let _ = writeln!(out, "    tp    : {:.3}", tally.true_positive);
            let _ = writeln!(out, "    fp    : {:.3}", tally.false_positive);
            let _ = writeln!(out, "    fn    : {:.3}", tally.false_negative);
            let _ = writeln!(out, "    score : {:.6}", tally.f_score());
        }
        for (index, tallies) in metrics.per_slice.iter().enumerate() {
            let tally = &tallies[Structure::PRIMARY];
            if !tally.is_zero() {
                let _ = writeln!(
                    out,
                    "    #{}:\t{:.0}\t{:.0}\t{:.0}\t{:.3}",
                    index + 1,
                    tally.true_positive,
                    tally.false_positive,
                    tally.false_negative,
                    tally.f_score()
                );
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::config::Phase;
    use crate::engine::metrics::{AreaTally, StructureTallies};
    use crate::engine::scoring::{CorpusMetrics, ScanMetrics};

    fn sample_evaluation() -> Evaluation {
        let mut totals = StructureTallies::new();
        totals[Structure::Tumor] = AreaTally {
            true_positive: 50.0,
            false_positive: 50.0,
            false_negative: 50.0,
        };
        let metrics = ScanMetrics {
            per_slice: vec![totals.clone(), StructureTallies::new()],
            totals,
        };
        Evaluation {
            phase: Phase::Final,
            corpus: CorpusMetrics {
                per_scan: vec![("Scan_1".to_string(), metrics)],
                structure_means: [0.5, 0.0, 0.0, 0.0],
                overall: 35.0,
            },
        }
    }

    #[test]
    fn report_writes_score_and_trace_files() {
        let dir = tempfile::tempdir().unwrap();
        write_report(dir.path(), &sample_evaluation()).unwrap();

        let result = fs::read_to_string(dir.path().join(RESULT_FILE)).unwrap();
        assert_eq!(result, "35\n");

        let info = fs::read_to_string(dir.path().join(INFO_FILE)).unwrap();
        assert!(info.contains("Overall score: 35.000000"));
        assert!(info.contains("Scan Scan_1"));
        assert!(info.contains("tumor"));
        assert!(info.contains("score : 0.500000"));
        // Slice 1 carries signal for the primary target, slice 2 does not.
        assert!(info.contains("#1:"));
        assert!(!info.contains("#2:"));
    }

    #[test]
    fn failure_writes_the_sentinel_score() {
        let dir = tempfile::tempdir().unwrap();
        write_failure(dir.path(), &EngineError::EmptyCorpus).unwrap();

        let result = fs::read_to_string(dir.path().join(RESULT_FILE)).unwrap();
        assert_eq!(result, "-1\n");

        let info = fs::read_to_string(dir.path().join(INFO_FILE)).unwrap();
        assert!(info.contains("No scans were loaded"));
    }

    #[test]
    fn write_failure_into_a_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(write_failure(&missing, &EngineError::EmptyCorpus).is_err());
    }
}
