use chained_hashmap::detector::{self, DetectorError};
use chained_hashmap::logger::initialize_logger;
use chained_hashmap::TableError;
use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: spam-detector <database path> <message path> <threshold>";
const INVALID_INPUT: &str = "Invalid input";
const ALLOC_FAILED: &str = "Memory allocation failed";

/// Scores a message against a phrase-weight database and prints SPAM or
/// NOT_SPAM.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about,
    long_about = None,
    allow_negative_numbers = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    /// File of `phrase,weight` records, one per line.
    database: PathBuf,

    /// Message to score.
    message: PathBuf,

    /// Score at or above which the message is spam (positive integer).
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    threshold: u64,
}

fn run(args: &Args) -> Result<detector::Verdict, DetectorError> {
    let db = detector::load_database_file(&args.database)?;
    let score = detector::score_file(&args.message, &db)?;
    debug!("score {} against threshold {}", score, args.threshold);
    Ok(detector::classify(score, args.threshold))
}

fn main() -> ExitCode {
    initialize_logger();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::InvalidValue | ErrorKind::ValueValidation => {
                debug!("{e}");
                eprintln!("{INVALID_INPUT}");
                return ExitCode::FAILURE;
            }
            _ => {
                debug!("{e}");
                eprintln!("{USAGE}");
                return ExitCode::FAILURE;
            }
        },
    };

    match run(&args) {
        Ok(verdict) => {
            println!("{verdict}");
            ExitCode::SUCCESS
        }
        Err(DetectorError::Table(TableError::AllocationFailure { .. })) => {
            eprintln!("{ALLOC_FAILED}");
            ExitCode::FAILURE
        }
        Err(e) => {
            debug!("{e}");
            eprintln!("{INVALID_INPUT}");
            ExitCode::FAILURE
        }
    }
}
