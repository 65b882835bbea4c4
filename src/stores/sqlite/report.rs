//! Implements the ledger's aggregation queries against a SQLite database.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    models::{CategoryTotal, MonthlyTotal, TransactionType},
    stores::ReportStore,
};

/// Computes monthly and per-category totals from a SQLite database.
///
/// The grouping and ordering are done by SQLite itself; the store only maps
/// the result rows. Transaction dates are stored as ISO-8601 text, which is
/// what makes the `strftime` grouping and the lexicographic `BETWEEN` range
/// filter work.
#[derive(Debug, Clone)]
pub struct SQLiteReportStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteReportStore {
    /// Create a new report store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_monthly_row(row: &Row) -> Result<MonthlyTotal, rusqlite::Error> {
        Ok(MonthlyTotal {
            month: row.get(0)?,
            income: row.get(1)?,
            expense: row.get(2)?,
        })
    }

    fn map_category_row(row: &Row) -> Result<CategoryTotal, rusqlite::Error> {
        let raw_type: String = row.get(0)?;
        let transaction_type = raw_type.parse::<TransactionType>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("invalid transaction type \"{raw_type}\"").into(),
            )
        })?;

        Ok(CategoryTotal {
            transaction_type,
            category: row.get(1)?,
            color: row.get(2)?,
            total: row.get(3)?,
        })
    }
}

impl ReportStore for SQLiteReportStore {
    /// The income and expense totals per calendar month of `year`.
    ///
    /// Months without any transactions are omitted from the result.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn monthly_totals(&self, year: i32) -> Result<Vec<MonthlyTotal>, Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT CAST(strftime('%m', date) AS INTEGER) AS month,
                        SUM(CASE WHEN type = 'income' THEN amount ELSE 0 END) AS income,
                        SUM(CASE WHEN type = 'expense' THEN amount ELSE 0 END) AS expense
                 FROM transactions
                 WHERE strftime('%Y', date) = :year
                 GROUP BY month
                 ORDER BY month",
            )?
            // Dates are stored with four-digit years, so the parameter must be
            // zero-padded to match.
            .query_map(&[(":year", &format!("{year:04}"))], Self::map_monthly_row)?
            .map(|maybe_total| maybe_total.map_err(|error| error.into()))
            .collect()
    }

    /// The summed amounts per `(type, category)` group within `date_range`.
    ///
    /// Ordered by type, then by total descending within each type. Groups
    /// whose category row no longer exists are still reported, with a `None`
    /// color.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn category_totals(
        &self,
        date_range: RangeInclusive<Date>,
    ) -> Result<Vec<CategoryTotal>, Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT t.type, t.category, c.color, SUM(t.amount) AS total
                 FROM transactions t
                 LEFT JOIN categories c ON t.category = c.name
                 WHERE t.date BETWEEN :start AND :end
                 GROUP BY t.type, t.category
                 ORDER BY t.type, total DESC",
            )?
            .query_map(
                &[(":start", date_range.start()), (":end", date_range.end())],
                Self::map_category_row,
            )?
            .map(|maybe_total| maybe_total.map_err(|error| error.into()))
            .collect()
    }
}

#[cfg(test)]
mod sqlite_report_store_tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        models::{MonthlyTotal, NewCategory, NewTransaction, TransactionType},
        stores::{
            CategoryStore, ReportStore, TransactionStore,
            sqlite::{SQLiteLedger, create_ledger},
        },
    };

    fn get_test_ledger() -> SQLiteLedger {
        let connection = Connection::open_in_memory().unwrap();
        create_ledger(connection).unwrap()
    }

    fn record(
        ledger: &mut SQLiteLedger,
        amount: f64,
        transaction_type: TransactionType,
        category: &str,
        date: time::Date,
    ) {
        ledger
            .transactions
            .create(NewTransaction::new(amount, transaction_type, category, date, None).unwrap())
            .unwrap();
    }

    #[test]
    fn monthly_totals_groups_by_month_and_splits_by_type() {
        let mut ledger = get_test_ledger();
        record(
            &mut ledger,
            100.0,
            TransactionType::Income,
            "Salary",
            date!(2024 - 01 - 15),
        );
        record(
            &mut ledger,
            30.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 01 - 20),
        );
        record(
            &mut ledger,
            50.0,
            TransactionType::Income,
            "Salary",
            date!(2024 - 03 - 05),
        );

        let totals = ledger.reports.monthly_totals(2024).unwrap();

        assert_eq!(
            totals,
            vec![
                MonthlyTotal {
                    month: 1,
                    income: 100.0,
                    expense: 30.0
                },
                MonthlyTotal {
                    month: 3,
                    income: 50.0,
                    expense: 0.0
                },
            ]
        );
    }

    #[test]
    fn monthly_totals_ignores_other_years() {
        let mut ledger = get_test_ledger();
        record(
            &mut ledger,
            100.0,
            TransactionType::Income,
            "Salary",
            date!(2023 - 12 - 31),
        );
        record(
            &mut ledger,
            25.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 01 - 01),
        );

        let totals = ledger.reports.monthly_totals(2024).unwrap();

        assert_eq!(
            totals,
            vec![MonthlyTotal {
                month: 1,
                income: 0.0,
                expense: 25.0
            }]
        );
    }

    #[test]
    fn monthly_totals_of_empty_year_is_empty() {
        let ledger = get_test_ledger();

        let totals = ledger.reports.monthly_totals(2024).unwrap();

        assert_eq!(totals, vec![]);
    }

    #[test]
    fn category_totals_orders_largest_total_first_within_type() {
        let mut ledger = get_test_ledger();
        for (amount, category) in [(120.0, "Food"), (45.0, "Transport"), (300.0, "Shopping")] {
            record(
                &mut ledger,
                amount,
                TransactionType::Expense,
                category,
                date!(2024 - 05 - 10),
            );
        }

        let totals = ledger
            .reports
            .category_totals(date!(2024 - 05 - 01)..=date!(2024 - 05 - 31))
            .unwrap();

        let expenses: Vec<_> = totals
            .iter()
            .filter(|total| total.transaction_type == TransactionType::Expense)
            .map(|total| (total.category.as_str(), total.total))
            .collect();
        assert_eq!(
            expenses,
            vec![("Shopping", 300.0), ("Food", 120.0), ("Transport", 45.0)]
        );
    }

    #[test]
    fn category_totals_groups_by_type_before_category() {
        let mut ledger = get_test_ledger();
        record(
            &mut ledger,
            200.0,
            TransactionType::Income,
            "Salary",
            date!(2024 - 05 - 01),
        );
        record(
            &mut ledger,
            80.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 05 - 02),
        );

        let totals = ledger
            .reports
            .category_totals(date!(2024 - 05 - 01)..=date!(2024 - 05 - 31))
            .unwrap();

        let types: Vec<_> = totals
            .iter()
            .map(|total| total.transaction_type)
            .collect();
        assert_eq!(
            types,
            vec![TransactionType::Expense, TransactionType::Income],
            "expense sorts before income alphabetically"
        );
    }

    #[test]
    fn category_totals_includes_orphaned_groups_without_color() {
        let mut ledger = get_test_ledger();
        let category = ledger
            .categories
            .create(
                NewCategory::new(
                    "Gifts",
                    TransactionType::Income,
                    "gift",
                    Some("#000".to_string()),
                )
                .unwrap(),
            )
            .unwrap();
        record(
            &mut ledger,
            50.0,
            TransactionType::Income,
            "Gifts",
            date!(2024 - 05 - 10),
        );
        ledger.categories.delete(category.id).unwrap();

        let totals = ledger
            .reports
            .category_totals(date!(2024 - 05 - 01)..=date!(2024 - 05 - 31))
            .unwrap();

        let gifts = totals
            .iter()
            .find(|total| total.category == "Gifts")
            .expect("orphaned category should still be totalled");
        assert_eq!(gifts.transaction_type, TransactionType::Income);
        assert_eq!(gifts.total, 50.0);
        assert_eq!(gifts.color, None);
    }

    #[test]
    fn category_totals_respects_range_boundaries() {
        let mut ledger = get_test_ledger();
        record(
            &mut ledger,
            10.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 05 - 01),
        );
        record(
            &mut ledger,
            20.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 05 - 31),
        );
        // Outside the queried range.
        record(
            &mut ledger,
            40.0,
            TransactionType::Expense,
            "Food",
            date!(2024 - 06 - 01),
        );

        let totals = ledger
            .reports
            .category_totals(date!(2024 - 05 - 01)..=date!(2024 - 05 - 31))
            .unwrap();

        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, 30.0);
    }
}
