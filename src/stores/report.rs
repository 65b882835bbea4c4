//! Defines the trait for the ledger's aggregation queries.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{CategoryTotal, MonthlyTotal},
};

/// Aggregation queries over the recorded transactions.
pub trait ReportStore {
    /// The income and expense totals per calendar month of `year`.
    ///
    /// Only months with at least one transaction are reported, in ascending
    /// month order. The grouping key is the month component of the
    /// transaction date, independent of the day.
    fn monthly_totals(&self, year: i32) -> Result<Vec<MonthlyTotal>, Error>;

    /// The summed amounts per `(type, category)` group for transactions dated
    /// within `date_range` (inclusive at both ends).
    ///
    /// Groups are ordered by type, then by total descending within each type,
    /// so the largest income/spend comes first. Transactions whose category
    /// no longer exists still contribute a group, with no color.
    fn category_totals(
        &self,
        date_range: RangeInclusive<Date>,
    ) -> Result<Vec<CategoryTotal>, Error>;
}
