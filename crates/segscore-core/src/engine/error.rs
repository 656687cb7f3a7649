use super::scoring::ScoringError;
use crate::core::io::records::RecordError;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level failure of an evaluation run.
///
/// Every variant aborts the whole run: there is no partial scoring and no
/// recovery. Callers write the sentinel score and map the variant to the
/// process exit code.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to load truth data: {source}")]
    TruthLoad {
        #[source]
        source: RecordError,
    },

    #[error("Solution file not found: {}", path.display())]
    SolutionMissing { path: PathBuf },

    #[error("Failed to load solution data: {source}")]
    SolutionLoad {
        #[source]
        source: RecordError,
    },

    #[error("Scoring failed for scan '{scan}': {source}")]
    Scoring {
        scan: String,
        #[source]
        source: ScoringError,
    },

    #[error("No scans were loaded from the truth file")]
    EmptyCorpus,
}
