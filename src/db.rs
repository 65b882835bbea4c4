/*! Schema creation, default data seeding, and maintenance for the ledger
database. */

use rusqlite::{Connection, Row, Transaction as SqlTransaction, TransactionBehavior};

use crate::{
    Error,
    stores::sqlite::{SQLiteCategoryStore, SQLiteTransactionStore},
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create the table for the model if it does not exist yet.
    ///
    /// # Errors
    /// Returns an error if there is an SQL error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type that rows are converted into.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// **Note:** This function expects that the row object contains all the
    /// table columns in the order they were defined.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, reading from the column at
    /// `offset`.
    ///
    /// This is useful in cases where tables have been joined and you want to
    /// construct two different types from the one query.
    ///
    /// # Errors
    /// Returns an error if a row item cannot be converted into the
    /// corresponding rust type, or if an invalid column index was used.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// The categories inserted the first time the ledger is opened, as
/// `(name, type, icon, color)` tuples.
///
/// Insertion order is fixed so a fresh install always lists the same rows.
pub const DEFAULT_CATEGORIES: [(&str, &str, &str, &str); 8] = [
    ("Salary", "income", "briefcase", "#00B894"),
    ("Freelance", "income", "laptop", "#00CEC9"),
    ("Investments", "income", "trending-up", "#6C5CE7"),
    ("Food", "expense", "coffee", "#FF7675"),
    ("Transport", "expense", "car", "#FAB1A0"),
    ("Shopping", "expense", "shopping-bag", "#FD79A8"),
    ("Bills", "expense", "file-text", "#636E72"),
    ("Entertainment", "expense", "film", "#E84393"),
];

/// Create the ledger schema and seed the default categories.
///
/// Safe to call any number of times: tables are created with `IF NOT EXISTS`
/// and the seed rows are only inserted while the category table is empty.
/// The whole routine runs in a single exclusive transaction, so two
/// connections racing on first open cannot both seed.
///
/// # Errors
/// Returns an [Error::Initialization] if the schema could not be created or
/// the seed data could not be inserted.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    initialize_inner(connection).map_err(|error| Error::Initialization(error.to_string()))
}

fn initialize_inner(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    SQLiteTransactionStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()
}

/// Insert [DEFAULT_CATEGORIES] if and only if the category table is empty.
fn seed_default_categories(connection: &Connection) -> Result<(), rusqlite::Error> {
    let count: i64 =
        connection.query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))?;

    if count > 0 {
        return Ok(());
    }

    let mut statement = connection
        .prepare("INSERT INTO categories (name, type, icon, color) VALUES (?1, ?2, ?3, ?4)")?;

    for (name, category_type, icon, color) in DEFAULT_CATEGORIES {
        statement.execute((name, category_type, icon, color))?;
    }

    tracing::info!("seeded {} default categories", DEFAULT_CATEGORIES.len());

    Ok(())
}

/// Drop both ledger tables, recreate them, and reseed the default categories.
///
/// Destructive and irreversible. Runs in a single exclusive transaction, so a
/// failure part-way leaves the previous contents untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails.
pub fn reset(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    transaction.execute("DROP TABLE IF EXISTS transactions", ())?;
    transaction.execute("DROP TABLE IF EXISTS categories", ())?;

    SQLiteTransactionStore::create_table(&transaction)?;
    SQLiteCategoryStore::create_table(&transaction)?;
    seed_default_categories(&transaction)?;

    transaction.commit()?;

    tracing::info!("ledger database reset");

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::{DEFAULT_CATEGORIES, initialize};

    #[test]
    fn creates_both_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();

        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('transactions', 'categories')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 2);
    }

    #[test]
    fn seeds_default_categories_once() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).unwrap();
        initialize(&connection).unwrap();

        let category_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .unwrap();

        assert_eq!(category_count, DEFAULT_CATEGORIES.len() as i64);
    }

    #[test]
    fn does_not_seed_when_categories_exist() {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();
        connection
            .execute("DELETE FROM categories WHERE name != 'Food'", ())
            .unwrap();

        initialize(&connection).unwrap();

        let category_count: i64 = connection
            .query_row("SELECT COUNT(*) FROM categories", [], |row| row.get(0))
            .unwrap();

        assert_eq!(category_count, 1, "a non-empty category table must not be reseeded");
    }
}
