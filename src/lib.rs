//! Centsible is a local-first personal finance ledger.
//!
//! This library implements the transaction ledger and its aggregation query
//! layer: a SQLite store holding income/expense transactions and the
//! categories they reference, plus the queries used to build monthly and
//! per-category reports.
//!
//! Categories and transactions are joined by the category *name*, not by a
//! foreign key. Deleting a category leaves the transactions that reference it
//! in place; such orphaned transactions still total correctly in reports but
//! no longer resolve an icon or color.
//!
//! The entry point is [create_ledger](stores::sqlite::create_ledger), which
//! opens (or creates) the schema, seeds the default categories on first use,
//! and returns a [Ledger] bundling the individual stores.

#![warn(missing_docs)]

mod db;
mod ledger;
pub mod models;
pub mod stores;

pub use db::{DEFAULT_CATEGORIES, initialize};
pub use ledger::Ledger;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The backing database could not be opened or its schema could not be
    /// created.
    ///
    /// Callers should treat this as fatal to the session and surface it
    /// rather than retry silently.
    #[error("could not initialize the ledger database: {0}")]
    Initialization(String),

    /// A zero, negative, or non-finite amount was used to create a
    /// transaction.
    ///
    /// Amounts are stored as positive magnitudes; whether money came in or
    /// went out is carried by the transaction type.
    #[error("{0} is not a valid amount, amounts must be positive")]
    NonPositiveAmount(f64),

    /// An empty string was used as a transaction's category.
    #[error("transaction category cannot be empty")]
    EmptyCategory,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used as a category's icon.
    #[error("category icon cannot be empty")]
    EmptyIcon,

    /// A transaction type string was neither `income` nor `expense`.
    #[error("\"{0}\" is not a valid transaction type")]
    InvalidTransactionType(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    /// Note that deleting a row that does not exist is a no-op by design and
    /// does not raise this error.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
