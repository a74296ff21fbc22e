//! Index creation command

use clap::{Arg, ArgMatches, Command};
use employees_db::{BenchmarkComparison, IndexAdvisor, IndexStatus, QueryEngine};

use crate::cli::commands::bench::{predicate_args, predicate_from_matches, print_report};
use crate::cli::utils::{format_duration, print_success, print_warning, CliResult, JsonOutput};
use crate::cli::Context;

/// Build the 'optimize' subcommand (mode 6)
pub fn optimize_command() -> Command {
    Command::new("optimize")
        .visible_alias("6")
        .about("Create the indexes serving the benchmark query")
        .arg(
            Arg::new("compare")
                .help("Run the benchmark query before and after creating indexes")
                .long("compare")
                .action(clap::ArgAction::SetTrue),
        )
        .args(predicate_args())
}

/// Execute the 'optimize' command
///
/// Index failures are reported as warnings; the command itself still
/// succeeds so that later steps can run.
pub async fn run_optimize(ctx: &Context, matches: &ArgMatches) -> CliResult<()> {
    let compare = matches.get_flag("compare");
    let advisor = IndexAdvisor::default();
    let engine = QueryEngine::new(ctx.workload.preview_limit);
    let predicate = predicate_from_matches(matches)?;

    let mut store = ctx.open_store().await?;
    let before = if compare {
        Some(engine.run(&mut store, &predicate).await?)
    } else {
        None
    };
    let outcomes = advisor.apply(&mut store).await;
    let comparison = match before {
        Some(before) => {
            let after = engine.run(&mut store, &predicate).await?;
            Some(BenchmarkComparison { before, after })
        }
        None => None,
    };
    store.close().await?;

    if ctx.global.is_json() {
        let indexes = outcomes
            .iter()
            .map(|o| {
                serde_json::json!({
                    "name": o.name,
                    "ok": o.status.is_ok(),
                    "status": o.status.to_string(),
                })
            })
            .collect();
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_bool("all_succeeded", IndexAdvisor::all_succeeded(&outcomes));
        output.add_value("indexes", serde_json::Value::Array(indexes));
        if let Some(cmp) = &comparison {
            output.add_float("before_secs", cmp.before.elapsed_secs());
            output.add_float("after_secs", cmp.after.elapsed_secs());
            output.add_float("speedup", cmp.speedup());
            output.add_bool("same_result", cmp.same_result());
        }
        output.print();
        return Ok(());
    }

    if ctx.global.quiet {
        for outcome in outcomes.iter().filter(|o| !o.status.is_ok()) {
            print_warning(&format!("Index {} {}", outcome.name, outcome.status));
        }
        return Ok(());
    }

    for outcome in &outcomes {
        match &outcome.status {
            IndexStatus::Failed(_) => {
                print_warning(&format!("Index {} {}", outcome.name, outcome.status))
            }
            status => print_success(&format!("Index {} {}", outcome.name, status)),
        }
    }

    if let Some(cmp) = &comparison {
        println!();
        println!("Before:");
        print_report(ctx, &cmp.before);
        println!();
        println!("After:");
        print_report(ctx, &cmp.after);
        println!();
        println!(
            "Speedup: {:.2}x ({} -> {})",
            cmp.speedup(),
            format_duration(cmp.before.elapsed),
            format_duration(cmp.after.elapsed)
        );
        if !cmp.same_result() {
            print_warning("Match counts differ between runs");
        }
    }
    Ok(())
}
