//! Single-record commands: insert one employee, list all of them

use chrono::Local;
use clap::{Arg, ArgMatches, Command};
use employees_db::{parse_birth_date, parse_full_name, save_employee, Employee, EmployeeStore};
use tracing::debug;

use crate::cli::utils::{
    employee_json, format_employee_row, print_info, print_success, validate_gender, CliResult,
    JsonOutput,
};
use crate::cli::Context;

/// Build the 'insert' subcommand (mode 2)
pub fn insert_command() -> Command {
    Command::new("insert")
        .visible_alias("2")
        .about("Insert one employee; an existing identical record is left untouched")
        .arg(
            Arg::new("full-name")
                .help("Full name: \"Surname Given [Patronymic]\"")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("date")
                .help("Date of birth, YYYY-MM-DD")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("gender")
                .help("Gender, stored as given")
                .required(true)
                .index(3),
        )
}

/// Execute the 'insert' command
pub async fn run_insert(ctx: &Context, matches: &ArgMatches) -> CliResult<()> {
    let full_name = matches
        .get_one::<String>("full-name")
        .ok_or("full-name argument is required")?;
    let date = matches
        .get_one::<String>("date")
        .ok_or("date argument is required")?;
    let gender = matches
        .get_one::<String>("gender")
        .ok_or("gender argument is required")?;

    // Reject bad input before touching the database
    let name = parse_full_name(full_name)?;
    let date_of_birth = parse_birth_date(date)?;
    validate_gender(gender)?;
    let employee = Employee::from_full_name(name, date_of_birth, gender.trim());

    let mut store = ctx.open_store().await?;
    let inserted = save_employee(&mut store, &employee).await?;
    store.close().await?;
    debug!(inserted, "Insert finished");

    if ctx.global.is_json() {
        let today = Local::now().date_naive();
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_bool("inserted", inserted);
        output.add_value("employee", employee_json(&employee, today));
        output.print();
    } else if !ctx.global.quiet {
        if inserted {
            print_success(&format!("Inserted: {}", employee));
        } else {
            print_info(&format!("Already present, nothing inserted: {}", employee));
        }
    }
    Ok(())
}

/// Build the 'list' subcommand (mode 3)
pub fn list_command() -> Command {
    Command::new("list")
        .visible_alias("3")
        .about("List distinct employees ordered by full name, with age")
}

/// Execute the 'list' command
pub async fn run_list(ctx: &Context, _matches: &ArgMatches) -> CliResult<()> {
    let mut store = ctx.open_store().await?;
    let employees = store.list_distinct().await?;
    store.close().await?;

    let today = Local::now().date_naive();
    if ctx.global.is_json() {
        let rows = employees.iter().map(|e| employee_json(e, today)).collect();
        let mut output = JsonOutput::new();
        output.status(true);
        output.add_uint("count", employees.len() as u64);
        output.add_value("employees", serde_json::Value::Array(rows));
        output.print();
        return Ok(());
    }

    for employee in &employees {
        println!("{}", format_employee_row(employee, today));
    }
    if !ctx.global.quiet {
        println!();
        println!("Total: {}", employees.len());
    }
    Ok(())
}
