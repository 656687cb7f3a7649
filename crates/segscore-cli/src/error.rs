use segscore::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Failed to write report to '{}': {source}", path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    Argument(String),
}

impl CliError {
    /// Process exit code contract: 1 for an unreadable truth file (and
    /// any other internal failure), 2 for a missing solution file, 3 for
    /// a malformed solution.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(EngineError::SolutionMissing { .. }) => 2,
            CliError::Engine(EngineError::SolutionLoad { .. } | EngineError::Scoring { .. }) => 3,
            _ => 1,
        }
    }
}
