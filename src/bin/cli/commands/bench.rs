//! Timed selective query command

use chrono::Local;
use clap::{Arg, ArgMatches, Command};
use employees_db::{BenchmarkReport, Gender, QueryEngine, QueryPredicate};

use crate::cli::utils::{
    employee_json, format_duration, format_employee_row, parse_number, print_warning,
    validate_preview, CliError, CliResult, JsonOutput,
};
use crate::cli::Context;

/// Build the 'bench' subcommand (mode 5)
pub fn bench_command() -> Command {
    Command::new("bench")
        .visible_alias("5")
        .about("Time the query: gender = Male AND surname starts with 'F'")
        .arg(
            Arg::new("preview")
                .help("Matching rows to print (default: EMPLOYEES_PREVIEW_LIMIT or 20)")
                .long("preview"),
        )
        .args(predicate_args())
}

/// Options overriding the benchmark predicate, shared with 'optimize'
pub fn predicate_args() -> [Arg; 2] {
    [
        Arg::new("gender")
            .help("Gender to match instead of Male")
            .long("gender"),
        Arg::new("prefix")
            .help("Surname prefix to match instead of F")
            .long("prefix"),
    ]
}

/// Predicate from the optional --gender/--prefix overrides
pub fn predicate_from_matches(matches: &ArgMatches) -> CliResult<QueryPredicate> {
    let mut predicate = QueryPredicate::default();
    if let Some(gender) = matches.get_one::<String>("gender") {
        predicate.gender = gender.parse::<Gender>().map_err(CliError::Validation)?;
    }
    if let Some(prefix) = matches.get_one::<String>("prefix") {
        if prefix.is_empty() {
            return Err(CliError::Validation("prefix cannot be empty".to_string()));
        }
        predicate.surname_prefix = prefix.clone();
    }
    Ok(predicate)
}

/// Execute the 'bench' command
pub async fn run_bench(ctx: &Context, matches: &ArgMatches) -> CliResult<()> {
    let preview = match matches.get_one::<String>("preview") {
        Some(v) => parse_number("preview", v)?,
        None => ctx.workload.preview_limit,
    };
    validate_preview(preview)?;
    let predicate = predicate_from_matches(matches)?;

    let mut store = ctx.open_store().await?;
    let report = QueryEngine::new(preview).run(&mut store, &predicate).await?;
    store.close().await?;

    print_report(ctx, &report);
    Ok(())
}

/// Print one benchmark result in the selected output format
pub fn print_report(ctx: &Context, report: &BenchmarkReport) {
    let today = Local::now().date_naive();

    if ctx.global.is_json() {
        let preview = report.preview.iter().map(|e| employee_json(e, today)).collect();
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_str("gender", report.predicate.gender.as_str());
        output.add_str("surname_prefix", &report.predicate.surname_prefix);
        output.add_uint("total_matches", report.total_matches);
        output.add_float("elapsed_secs", report.elapsed_secs());
        output.add_uint("elapsed_us", report.elapsed.as_micros() as u64);
        output.add_value("preview", serde_json::Value::Array(preview));
        output.print();
        return;
    }

    println!(
        "Query: gender = '{}' AND surname LIKE '{}%'",
        report.predicate.gender, report.predicate.surname_prefix
    );
    println!("Matches: {}", report.total_matches);
    println!(
        "Elapsed: {:.6} s ({})",
        report.elapsed_secs(),
        format_duration(report.elapsed)
    );
    if ctx.global.quiet {
        return;
    }
    if report.total_matches == 0 {
        print_warning("No matching rows. Run 'generate' first.");
        return;
    }

    println!();
    for employee in &report.preview {
        println!("{}", format_employee_row(employee, today));
    }
    let hidden = report.total_matches.saturating_sub(report.preview.len() as u64);
    if hidden > 0 {
        println!("... and {} more", hidden);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_for(args: &[&str]) -> ArgMatches {
        let mut argv = vec!["bench"];
        argv.extend_from_slice(args);
        bench_command().try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_default_predicate() {
        let predicate = predicate_from_matches(&matches_for(&[])).unwrap();
        assert_eq!(predicate, QueryPredicate::default());
    }

    #[test]
    fn test_predicate_overrides() {
        let predicate =
            predicate_from_matches(&matches_for(&["--gender", "f", "--prefix", "Iv"])).unwrap();
        assert_eq!(predicate.gender, Gender::Female);
        assert_eq!(predicate.surname_prefix, "Iv");

        assert!(predicate_from_matches(&matches_for(&["--gender", "x"])).is_err());
        assert!(predicate_from_matches(&matches_for(&["--prefix", ""])).is_err());
    }
}
