mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::{CliError, Result};
use clap::Parser;
use segscore::engine::config::{EvaluationConfig, Phase};
use segscore::workflows::{evaluate, report};
use tracing::{debug, error, info};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    match run(&cli) {
        Ok(score) => {
            println!("Score: {score}");
        }
        Err(e) => {
            error!("Evaluation failed: {e}");
            eprintln!("Error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

fn run(cli: &Cli) -> Result<f64> {
    info!("segscore v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", cli);

    if let Some(num_threads) = cli.threads {
        info!("Setting Rayon global thread pool to {num_threads} threads.");
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| CliError::Argument(format!("failed to build thread pool: {e}")))?;
    }

    std::fs::create_dir_all(&cli.out_dir)?;

    let config = EvaluationConfig {
        phase: Phase::from_tag(&cli.phase),
        truth_path: cli.truth.clone(),
        solution_path: cli.solution.clone(),
    };

    match evaluate::run(&config) {
        Ok(evaluation) => {
            report::write_report(&cli.out_dir, &evaluation).map_err(|source| {
                CliError::Report {
                    path: cli.out_dir.clone(),
                    source,
                }
            })?;
            Ok(evaluation.overall_score())
        }
        Err(engine_error) => {
            // Fail-fast contract: the sentinel score and the diagnostic
            // still land in the output directory before the non-zero exit.
            if let Err(write_error) = report::write_failure(&cli.out_dir, &engine_error) {
                error!("Failed to write sentinel score: {write_error}");
            }
            Err(engine_error.into())
        }
    }
}
