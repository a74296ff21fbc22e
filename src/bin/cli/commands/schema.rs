//! Schema bootstrap command

use clap::{ArgMatches, Command};
use employees_db::EmployeeStore;

use crate::cli::utils::{print_success, CliResult, JsonOutput};
use crate::cli::Context;

/// Build the 'create-schema' subcommand (mode 1)
pub fn create_schema_command() -> Command {
    Command::new("create-schema")
        .visible_alias("1")
        .about("Create the employees table if it does not exist")
}

/// Execute the 'create-schema' command
pub async fn run_create_schema(ctx: &Context, _matches: &ArgMatches) -> CliResult<()> {
    let mut store = ctx.open_store().await?;
    store.create_schema().await?;
    store.close().await?;

    if ctx.global.is_json() {
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_str("operation", "create-schema");
        output.add_str("database", &ctx.connection.to_string());
        output.print();
    } else if !ctx.global.quiet {
        print_success("Table 'employees' created (or already exists)");
    }
    Ok(())
}
