//! Synthetic bulk load command

use clap::{Arg, ArgMatches, Command};
use employees_db::{BatchLoader, BulkPlan, EmployeeGenerator, LoadProgress, NameCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::cli::utils::{
    complete_progress, format_duration, parse_number, print_info, print_progress, print_success,
    validate_generate_params, CliResult, JsonOutput,
};
use crate::cli::Context;

/// Build the 'generate' subcommand (mode 4)
pub fn generate_command() -> Command {
    Command::new("generate")
        .visible_alias("4")
        .about("Generate random employees plus a subset matching the benchmark query")
        .arg(
            Arg::new("total")
                .help("Number of general records (default: EMPLOYEES_BULK_TOTAL or 1000000)")
                .long("total"),
        )
        .arg(
            Arg::new("special")
                .help("Number of records matching the benchmark query (default: 100)")
                .long("special"),
        )
        .arg(
            Arg::new("batch-size")
                .help("Rows per committed chunk (default: EMPLOYEES_BATCH_SIZE or 10000)")
                .long("batch-size"),
        )
        .arg(
            Arg::new("seed")
                .help("Seed the random generator for a reproducible data set")
                .long("seed"),
        )
}

/// Execute the 'generate' command
pub async fn run_generate(ctx: &Context, matches: &ArgMatches) -> CliResult<()> {
    let workload = &ctx.workload;
    let total = match matches.get_one::<String>("total") {
        Some(v) => parse_number("total", v)?,
        None => workload.bulk_total,
    };
    let special = match matches.get_one::<String>("special") {
        Some(v) => parse_number("special", v)?,
        None => workload.special_count,
    };
    let batch_size = match matches.get_one::<String>("batch-size") {
        Some(v) => parse_number("batch-size", v)?,
        None => workload.batch_size,
    };
    let seed: Option<u64> = matches
        .get_one::<String>("seed")
        .map(|v| parse_number("seed", v))
        .transpose()?;

    validate_generate_params(total, special)?;
    let loader = BatchLoader::new(batch_size)?;
    let plan = BulkPlan::new(total, special);

    let chatty = ctx.global.chatty();
    if chatty {
        print_info(&format!(
            "Generating {} records ({} general, {} matching '{}' / {}), {} per chunk",
            plan.records_len(),
            total,
            special,
            plan.target.surname_prefix,
            plan.target.gender,
            loader.batch_size()
        ));
    }

    let catalog = NameCatalog::default();
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let records = EmployeeGenerator::today(&catalog, rng).into_bulk(plan);

    let mut store = ctx.open_store().await?;
    let report = loader
        .load(&mut store, records, |progress: &LoadProgress| {
            if chatty {
                let expected = progress.expected_total.unwrap_or(progress.attempted);
                print_progress(&format!("Inserted {} / {}", progress.attempted, expected));
            }
        })
        .await;
    if chatty {
        complete_progress();
    }
    let report = report?;
    store.close().await?;

    if ctx.global.is_json() {
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_uint("attempted", report.attempted);
        output.add_uint("inserted", report.inserted);
        output.add_uint("skipped", report.skipped());
        output.add_uint("batches", report.batches);
        output.add_float("elapsed_secs", report.elapsed.as_secs_f64());
        output.add_float("rows_per_sec", report.rows_per_sec());
        output.print();
    } else if !ctx.global.quiet {
        print_success(&format!(
            "Generated {} records in {} ({:.0} rows/sec)",
            report.attempted,
            format_duration(report.elapsed),
            report.rows_per_sec()
        ));
        println!("  Inserted: {}", report.inserted);
        println!("  Skipped:  {} (already present)", report.skipped());
        println!("  Chunks:   {}", report.batches);
    }
    Ok(())
}
