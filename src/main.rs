//! Command line front end for the ledger.
//!
//! Thin display glue over the library: every subcommand maps onto one store
//! operation and prints the result as JSON. All validation and consistency
//! rules live in the library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rusqlite::Connection;
use time::{Date, OffsetDateTime, macros::format_description};
use tracing_subscriber::EnvFilter;

use centsible::{
    Error,
    models::{DatabaseID, NewCategory, NewTransaction, TransactionType},
    stores::{CategoryStore, ReportStore, TransactionStore, sqlite::create_ledger},
};

#[derive(Parser)]
#[command(name = "centsible", version, about = "A local personal finance ledger")]
struct Cli {
    /// Path to the ledger database file. Created on first use.
    #[arg(long, default_value = "centsible.db")]
    db_path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Record an income or expense transaction.
    Add {
        /// The amount of money, always positive.
        amount: f64,
        /// Whether the transaction is income or an expense.
        #[arg(long = "type")]
        transaction_type: TransactionType,
        /// The category name the transaction belongs to.
        #[arg(long)]
        category: String,
        /// The transaction date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Free-text note.
        #[arg(long)]
        note: Option<String>,
    },
    /// List transactions, most recent first.
    List {
        /// Start of an inclusive date range as YYYY-MM-DD.
        #[arg(long, requires = "to")]
        from: Option<String>,
        /// End of an inclusive date range as YYYY-MM-DD.
        #[arg(long, requires = "from")]
        to: Option<String>,
    },
    /// Delete a transaction by its id.
    Delete {
        /// The id of the transaction to delete.
        id: DatabaseID,
    },
    /// Manage transaction categories.
    #[command(subcommand)]
    Categories(CategoryCommand),
    /// Aggregated reports over the ledger.
    #[command(subcommand)]
    Report(ReportCommand),
    /// Destroy all data and reseed the default categories.
    Reset {
        /// Confirm that all transactions and categories should be destroyed.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CategoryCommand {
    /// List categories, optionally restricted to one type.
    List {
        /// Only list categories of this type.
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,
    },
    /// Add a new category.
    Add {
        /// The display name of the category.
        name: String,
        /// Whether the category is for income or expenses.
        #[arg(long = "type")]
        transaction_type: TransactionType,
        /// Symbolic icon name, resolved by the presentation layer.
        #[arg(long)]
        icon: String,
        /// Display color, e.g. #FF7675.
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category by its id. Transactions keep the category name.
    Delete {
        /// The id of the category to delete.
        id: DatabaseID,
    },
}

#[derive(Subcommand)]
enum ReportCommand {
    /// Income and expense totals per month of a year.
    Monthly {
        /// The calendar year to report on.
        year: i32,
    },
    /// Summed amounts per category within an inclusive date range.
    Categories {
        /// Start date as YYYY-MM-DD.
        from: String,
        /// End date as YYYY-MM-DD.
        to: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Cli::parse();

    if let Err(error) = run(args) {
        tracing::error!("{error}");
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let connection = Connection::open(&args.db_path)
        .map_err(|error| Error::Initialization(error.to_string()))?;
    let mut ledger = create_ledger(connection)?;

    match args.command {
        Command::Add {
            amount,
            transaction_type,
            category,
            date,
            note,
        } => {
            let date = match date {
                Some(text) => parse_date(&text)?,
                None => OffsetDateTime::now_utc().date(),
            };
            let transaction = ledger.transactions.create(NewTransaction::new(
                amount,
                transaction_type,
                &category,
                date,
                note,
            )?)?;
            print_json(&transaction)?;
        }
        Command::List { from, to } => {
            let transactions = match (from, to) {
                (Some(from), Some(to)) => {
                    let range = parse_date(&from)?..=parse_date(&to)?;
                    ledger.transactions.get_in_range(range)?
                }
                _ => ledger.transactions.get_all()?,
            };
            print_json(&transactions)?;
        }
        Command::Delete { id } => {
            ledger.transactions.delete(id)?;
        }
        Command::Categories(command) => match command {
            CategoryCommand::List { transaction_type } => {
                let categories = ledger.categories.get_all(transaction_type)?;
                print_json(&categories)?;
            }
            CategoryCommand::Add {
                name,
                transaction_type,
                icon,
                color,
            } => {
                let category = ledger.categories.create(NewCategory::new(
                    &name,
                    transaction_type,
                    &icon,
                    color,
                )?)?;
                print_json(&category)?;
            }
            CategoryCommand::Delete { id } => {
                ledger.categories.delete(id)?;
            }
        },
        Command::Report(command) => match command {
            ReportCommand::Monthly { year } => {
                let totals = ledger.reports.monthly_totals(year)?;
                print_json(&totals)?;
            }
            ReportCommand::Categories { from, to } => {
                let range = parse_date(&from)?..=parse_date(&to)?;
                let totals = ledger.reports.category_totals(range)?;
                print_json(&totals)?;
            }
        },
        Command::Reset { yes } => {
            if !yes {
                eprintln!("reset destroys all transactions and categories, pass --yes to confirm");
                std::process::exit(2);
            }
            ledger.reset()?;
        }
    }

    Ok(())
}

fn parse_date(text: &str) -> Result<Date, time::error::Parse> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
