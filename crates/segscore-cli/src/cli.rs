use clap::Parser;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

/// Command-line surface of the batch scorer.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "segscore - scores submitted CT segmentation contours against expert \
             ground truth and reports a single weighted F-score.",
    help_template = HELP_TEMPLATE,
)]
pub struct Cli {
    /// Evaluation phase tag ('provisional' or 'final'); informational only.
    #[arg(value_name = "PHASE")]
    pub phase: String,

    /// Path to the ground-truth contour file.
    #[arg(value_name = "TRUTH")]
    pub truth: PathBuf,

    /// Path to the submitted solution contour file.
    #[arg(value_name = "SOLUTION")]
    pub solution: PathBuf,

    /// Directory receiving result.txt and info.txt.
    #[arg(value_name = "OUT_DIR")]
    pub out_dir: PathBuf,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel scoring.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_the_four_positional_arguments_in_order() {
        let cli = Cli::parse_from([
            "segscore",
            "provisional",
            "truth.csv",
            "solution.csv",
            "out",
        ]);
        assert_eq!(cli.phase, "provisional");
        assert_eq!(cli.truth, PathBuf::from("truth.csv"));
        assert_eq!(cli.solution, PathBuf::from("solution.csv"));
        assert_eq!(cli.out_dir, PathBuf::from("out"));
        assert_eq!(cli.verbose, 0);
        assert!(!cli.quiet);
    }

    #[test]
    fn rejects_missing_positional_arguments() {
        assert!(Cli::try_parse_from(["segscore", "final", "truth.csv"]).is_err());
    }
}
