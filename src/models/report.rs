//! Defines the result types of the ledger's aggregation queries.

use serde::{Deserialize, Serialize};

use crate::models::TransactionType;

/// Income and expense sums for one calendar month.
///
/// Produced by [ReportStore::monthly_totals](crate::stores::ReportStore::monthly_totals).
/// Months without any transactions are not reported, so a caller must treat a
/// missing month as zero rather than expect a dense twelve-entry list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// The calendar month, 1 through 12.
    pub month: u8,
    /// The sum of income amounts in the month.
    pub income: f64,
    /// The sum of expense amounts in the month.
    pub expense: f64,
}

/// The summed amounts of one `(type, category)` group over a date range.
///
/// Produced by [ReportStore::category_totals](crate::stores::ReportStore::category_totals).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    /// Whether the group covers income or expense transactions.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The category name the transactions reference.
    ///
    /// This is the name stored on the transactions, which may no longer match
    /// any category row.
    pub category: String,
    /// The color of the matching category, `None` if the group is orphaned.
    pub color: Option<String>,
    /// The sum of amounts in the group.
    pub total: f64,
}
