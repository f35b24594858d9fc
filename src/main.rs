//! Downloads the lap and weather data of every race of a season and writes it
//! to `data/races_<YEAR>.parquet`.
//!
//! ```text
//! f1data 2023
//! ```

use chrono::Utc;
use clap::Parser;
use f1data::{run_pipeline, F1DataError, OpenF1Provider, DEFAULT_BASE_URL, DEFAULT_OUTPUT_DIR};
use log::info;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "f1data")]
#[command(version, about = "Download a season of Formula 1 race laps joined with weather", long_about = None)]
struct Cli {
    /// Season to download, e.g. 2023
    #[arg(value_name = "YEAR")]
    year: i32,

    /// Directory the parquet file is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Directory for cached session data (defaults to the system cache directory)
    #[arg(long)]
    cache_dir: Option<PathBuf>,

    /// Do not read or write cached session data
    #[arg(long)]
    no_cache: bool,

    /// OpenF1 API root
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
}

async fn run(cli: Cli) -> Result<PathBuf, F1DataError> {
    let provider = OpenF1Provider::builder()
        .base_url(cli.base_url)
        .maybe_cache_dir(cli.cache_dir)
        .use_cache(!cli.no_cache)
        .build()?;
    run_pipeline(&provider, cli.year, Utc::now(), &cli.output_dir).await
}

/// Exit status and the lines printed to stderr for the outcome of a run.
fn report(result: &Result<PathBuf, F1DataError>) -> (u8, Vec<String>) {
    match result {
        Ok(_) => (0, Vec::new()),
        Err(F1DataError::InvalidSession { .. }) => {
            (1, vec!["Invalid YEAR or ROUND_NUMBER provided".to_string()])
        }
        Err(e) => {
            let mut lines = vec![format!("Error: {}", e)];
            let mut source = e.source();
            while let Some(cause) = source {
                lines.push(format!("  caused by: {}", cause));
                source = cause.source();
            }
            (1, lines)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // RUST_LOG overrides the default level.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let result = run(cli).await;
    if let Ok(path) = &result {
        info!("Done: {}", path.display());
    }
    let (status, lines) = report(&result);
    for line in lines {
        eprintln!("{}", line);
    }
    ExitCode::from(status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_single_year_argument() {
        let cli = Cli::try_parse_from(["f1data", "2023"]).unwrap();
        assert_eq!(cli.year, 2023);
        assert_eq!(cli.output_dir, PathBuf::from("data"));
        assert_eq!(cli.base_url, DEFAULT_BASE_URL);
        assert!(!cli.no_cache);
        assert!(cli.cache_dir.is_none());
    }

    #[test]
    fn test_missing_year_is_rejected() {
        let err = Cli::try_parse_from(["f1data"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_extra_argument_is_rejected() {
        let err = Cli::try_parse_from(["f1data", "2023", "5"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_non_integer_year_is_rejected() {
        let err = Cli::try_parse_from(["f1data", "twenty"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "f1data",
            "2024",
            "--output-dir",
            "out",
            "--cache-dir",
            "/tmp/f1",
            "--no-cache",
        ])
        .unwrap();
        assert_eq!(cli.output_dir, PathBuf::from("out"));
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/f1")));
        assert!(cli.no_cache);
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_report_success() {
        assert_eq!(report(&Ok(PathBuf::from("data/races_2023.parquet"))), (0, Vec::new()));
    }

    #[test]
    fn test_report_invalid_session() {
        let (status, lines) = report(&Err(F1DataError::InvalidSession {
            season: 2023,
            round: 30,
        }));
        assert_eq!(status, 1);
        assert_eq!(lines, vec!["Invalid YEAR or ROUND_NUMBER provided"]);
    }

    #[test]
    fn test_report_prints_cause_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file system");
        let (status, lines) = report(&Err(F1DataError::OutputDirCreation(PathBuf::from("data"), io)));
        assert_eq!(status, 1);
        assert_eq!(
            lines,
            vec![
                "Error: Failed to create output directory 'data'",
                "  caused by: read-only file system",
            ]
        );

        let (status, lines) = report(&Err(F1DataError::NoRounds(2021)));
        assert_eq!(status, 1);
        assert_eq!(lines, vec!["Error: No rounds with results available for season 2021"]);
    }
}
