//! Employees CLI
//!
//! One subcommand per operation. Each also answers to its mode number, so
//! `employees-cli 5` is the same as `employees-cli bench`.
//!
//! # Output Formats
//!
//! - `text` (default): Human-readable output with formatting
//! - `json`: Machine-readable JSON output for scripting and automation
//!
//! Use `--quiet` or `-q` to suppress informational messages and
//! `--verbose` or `-v` to log progress to stderr.

pub mod commands;
pub mod utils;

use clap::{Arg, ArgMatches, Command};
use employees_db::{ConnectionConfig, PostgresStore, WorkloadConfig};

use crate::cli::utils::{CliError, CliResult};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Invalid output format: {}. Use 'text' or 'json'.", s)),
        }
    }
}

/// Global CLI options that apply to all commands
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: u8,
}

impl GlobalOptions {
    /// Extract global options from argument matches
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let output_format = matches
            .get_one::<String>("format")
            .map(|s| s.parse().unwrap_or_default())
            .unwrap_or_default();

        GlobalOptions {
            output_format,
            quiet: matches.get_flag("quiet"),
            verbose: matches.get_count("verbose"),
        }
    }

    /// Global options as seen by the invoked subcommand
    pub fn for_invocation(matches: &ArgMatches) -> Self {
        match matches.subcommand() {
            Some((_, sub)) => Self::from_matches(sub),
            None => Self::from_matches(matches),
        }
    }

    /// Check if output should be JSON
    pub fn is_json(&self) -> bool {
        self.output_format == OutputFormat::Json
    }

    /// Whether human-readable informational output should be printed
    pub fn chatty(&self) -> bool {
        !self.is_json() && !self.quiet
    }
}

/// Everything a command needs besides its own arguments
pub struct Context {
    pub global: GlobalOptions,
    pub connection: ConnectionConfig,
    pub workload: WorkloadConfig,
}

impl Context {
    pub fn from_env(global: GlobalOptions) -> CliResult<Self> {
        Ok(Self {
            global,
            connection: ConnectionConfig::from_env()?,
            workload: WorkloadConfig::from_env()?,
        })
    }

    /// Open the single connection an operation runs on
    pub async fn open_store(&self) -> CliResult<PostgresStore> {
        Ok(PostgresStore::connect(&self.connection).await?)
    }
}

/// Build the CLI command structure
pub fn build_cli() -> Command {
    Command::new("employees-cli")
        .about("Employee directory: bulk loading and query benchmarking on PostgreSQL")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        // Global options
        .arg(
            Arg::new("format")
                .help("Output format: text (default) or json")
                .short('o')
                .long("format")
                .global(true)
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            Arg::new("quiet")
                .help("Suppress informational output (errors still shown)")
                .short('q')
                .long("quiet")
                .global(true)
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .help("Log to stderr (-v info, -vv debug)")
                .short('v')
                .long("verbose")
                .global(true)
                .action(clap::ArgAction::Count),
        )
        .subcommand(commands::schema::create_schema_command())
        .subcommand(commands::records::insert_command())
        .subcommand(commands::records::list_command())
        .subcommand(commands::generate::generate_command())
        .subcommand(commands::bench::bench_command())
        .subcommand(commands::optimize::optimize_command())
}

/// Dispatch to appropriate command handler
pub async fn run(matches: ArgMatches) -> CliResult<()> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| CliError::Usage("No command given".to_string()))?;
    let ctx = Context::from_env(GlobalOptions::from_matches(sub))?;

    match name {
        "create-schema" => commands::schema::run_create_schema(&ctx, sub).await,
        "insert" => commands::records::run_insert(&ctx, sub).await,
        "list" => commands::records::run_list(&ctx, sub).await,
        "generate" => commands::generate::run_generate(&ctx, sub).await,
        "bench" => commands::bench::run_bench(&ctx, sub).await,
        "optimize" => commands::optimize::run_optimize(&ctx, sub).await,
        _ => Err(CliError::Usage(format!("Unknown command '{}'", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_mode_numbers_are_aliases() {
        let matches = build_cli().try_get_matches_from(["employees-cli", "5"]).unwrap();
        assert_eq!(matches.subcommand_name(), Some("bench"));

        let matches = build_cli()
            .try_get_matches_from(["employees-cli", "2", "Ivanov Petr Sergeevich", "2009-07-12", "Male"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "insert");
        assert_eq!(sub.get_one::<String>("full-name").unwrap(), "Ivanov Petr Sergeevich");
    }

    #[test]
    fn test_global_options() {
        let matches = build_cli()
            .try_get_matches_from(["employees-cli", "list", "--format", "json", "-vv"])
            .unwrap();
        let global = GlobalOptions::for_invocation(&matches);
        assert!(global.is_json());
        assert!(!global.chatty());
        assert_eq!(global.verbose, 2);
    }

    #[test]
    fn test_insert_requires_all_arguments() {
        assert!(build_cli()
            .try_get_matches_from(["employees-cli", "insert", "Ivanov Petr"])
            .is_err());
    }
}
