use crate::core::io::records;
use crate::core::models::registry::ScanRegistry;
use crate::engine::config::{EvaluationConfig, Phase};
use crate::engine::error::EngineError;
use crate::engine::scoring::{self, CorpusMetrics};
use std::fs::File;
use std::io::BufReader;
use tracing::{info, instrument};

/// The complete outcome of one scoring run.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub phase: Phase,
    pub corpus: CorpusMetrics,
}

impl Evaluation {
    /// The single corpus-level score, already scaled x100.
    pub fn overall_score(&self) -> f64 {
        self.corpus.overall
    }
}

/// Runs a complete evaluation: load truth, load solution, score, and
/// aggregate. The computation is a pure batch transform; it either
/// completes with an [`Evaluation`] or aborts with the first error.
#[instrument(skip_all, name = "evaluation_workflow")]
pub fn run(config: &EvaluationConfig) -> Result<Evaluation, EngineError> {
    // === Phase 1: Load the truth corpus ===
    info!(
        phase = %config.phase,
        path = %config.truth_path.display(),
        "Loading truth contours."
    );
    let truth = File::open(&config.truth_path)
        .map_err(|e| EngineError::TruthLoad { source: e.into() })?;
    let mut registry = ScanRegistry::new();
    records::load_truth(BufReader::new(truth), &mut registry)
        .map_err(|source| EngineError::TruthLoad { source })?;
    if registry.is_empty() {
        return Err(EngineError::EmptyCorpus);
    }
    info!(scans = registry.len(), "Truth corpus loaded.");

    // === Phase 2: Load the solution corpus ===
    if !config.solution_path.exists() {
        return Err(EngineError::SolutionMissing {
            path: config.solution_path.clone(),
        });
    }
    let solution = File::open(&config.solution_path)
        .map_err(|e| EngineError::SolutionLoad { source: e.into() })?;
    records::load_solution(BufReader::new(solution), &mut registry)
        .map_err(|source| EngineError::SolutionLoad { source })?;

    // === Phase 3: Score and aggregate ===
    let corpus = scoring::score_corpus(&registry)?;
    info!(score = corpus.overall, "Evaluation complete.");

    Ok(Evaluation {
        phase: config.phase,
        corpus,
    })
}
