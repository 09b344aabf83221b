use std::io;
use std::path::Path;
use std::process::ExitCode;

use tracing::info;
use tracing_subscriber::EnvFilter;
use ziptar::cli::{self, FLAGS};
use ziptar::{Outcome, UsageError};

/// Usage errors exit with 2, everything else with 1.
const USAGE_EXIT: u8 = 2;

fn main() -> ExitCode {
    init_tracing();

    if let Err(err) = cli::validate_table(FLAGS) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let plan = match cli::utf8_args(std::env::args_os().skip(1))
        .and_then(cli::parse)
        .and_then(|(options, rest)| ziptar::plan(&options, rest))
    {
        Ok(plan) => plan,
        Err(err) => return usage_failure(&err),
    };
    info!(
        action = %plan.action,
        archive = %plan.archive,
        stream = ?plan.stream,
        "resolved"
    );

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    match ziptar::execute(&plan, Path::new("."), stdin, stdout) {
        Ok(Outcome::Done(_)) => ExitCode::SUCCESS,
        Ok(Outcome::Unsupported { action, archive }) => {
            eprintln!("error: {action} is not yet implemented for {archive} archives");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn usage_failure(err: &UsageError) -> ExitCode {
    eprintln!("error: {err}");
    if err.shows_usage() {
        eprint!("{}", cli::usage());
    }
    ExitCode::from(USAGE_EXIT)
}

/// Diagnostics go to stderr; stdout may carry archive bytes.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
