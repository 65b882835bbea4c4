//! Contains the convenience type alias and constructor for a [Ledger] that
//! uses the SQLite backend.

pub mod category;
pub mod report;
pub mod transaction;

pub use category::SQLiteCategoryStore;
pub use report::SQLiteReportStore;
pub use transaction::SQLiteTransactionStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, Ledger, db::initialize};

/// An alias for a [Ledger] that uses SQLite for the backend.
pub type SQLiteLedger = Ledger<SQLiteTransactionStore, SQLiteCategoryStore, SQLiteReportStore>;

/// Creates a [Ledger] over `db_connection`.
///
/// This function will modify the database: on the first open it creates the
/// ledger schema and seeds the default categories. Reopening an existing
/// database only reconfirms the schema.
///
/// # Errors
/// This function will return an [Error::Initialization] if the schema could
/// not be created or seeded.
pub fn create_ledger(db_connection: Connection) -> Result<SQLiteLedger, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(Ledger::new(
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteReportStore::new(connection.clone()),
        connection,
    ))
}

#[cfg(test)]
mod create_ledger_tests {
    use rusqlite::Connection;

    use crate::{DEFAULT_CATEGORIES, stores::CategoryStore};

    use super::create_ledger;

    #[test]
    fn reopening_a_database_does_not_reseed() {
        let directory = tempfile::tempdir().unwrap();
        let db_path = directory.path().join("ledger.db");

        {
            let ledger = create_ledger(Connection::open(&db_path).unwrap()).unwrap();
            let categories = ledger.categories.get_all(None).unwrap();
            assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        }

        let ledger = create_ledger(Connection::open(&db_path).unwrap()).unwrap();

        let categories = ledger.categories.get_all(None).unwrap();
        assert_eq!(
            categories.len(),
            DEFAULT_CATEGORIES.len(),
            "want {} categories after reopening, got {}",
            DEFAULT_CATEGORIES.len(),
            categories.len()
        );
    }
}
