//! Contains traits and implementations for objects that store the ledger's
//! [models](crate::models).

mod category;
mod report;
mod transaction;

pub mod sqlite;

pub use category::CategoryStore;
pub use report::ReportStore;
pub use transaction::TransactionStore;
