//! This module defines the domain data types.

pub use category::{Category, CategoryName, NewCategory};
pub use report::{CategoryTotal, MonthlyTotal};
pub use transaction::{NewTransaction, Transaction, TransactionType};

mod category;
mod report;
mod transaction;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
