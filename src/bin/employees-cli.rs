//! Employees CLI entry point
//!
//! Exit codes follow `cli::utils::exit_codes`; errors go to stderr.

mod cli;

use employees_db::logging::{init_from_config, init_logging, LoggingConfig};
use tracing::{error, Level};

#[tokio::main]
async fn main() {
    let matches = cli::build_cli().get_matches();

    let global = cli::GlobalOptions::for_invocation(&matches);
    match global.verbose {
        0 => init_from_config(&LoggingConfig::from_env()),
        1 => init_logging(Level::INFO, false),
        _ => init_logging(Level::DEBUG, false),
    }

    if let Err(e) = cli::run(matches).await {
        error!(category = e.category(), "{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
