//! Implements a SQLite backed transaction store.

use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{DatabaseID, NewTransaction, Transaction, TransactionType},
    stores::TransactionStore,
};

/// Stores transactions in a SQLite database.
///
/// Transactions reference categories by name with no foreign key, so the
/// category table does not need to contain a matching row. Rows are read back
/// left-joined against the category table to resolve the icon and color of
/// the named category when it still exists.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Record a new transaction in the database.
    ///
    /// The returned transaction carries the generated ID and the icon/color
    /// of the category it names, resolved at insert time.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let connection = self
            .connection
            .lock()
            .expect("Could not acquire database lock");

        connection.execute(
            "INSERT INTO transactions (amount, type, category, date, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            (
                new_transaction.amount,
                new_transaction.transaction_type.as_str(),
                &new_transaction.category,
                new_transaction.date,
                &new_transaction.note,
            ),
        )?;

        let id = connection.last_insert_rowid();

        let transaction = connection
            .prepare(
                "SELECT t.id, t.amount, t.type, t.category, t.date, t.note, c.icon, c.color
                 FROM transactions t
                 LEFT JOIN categories c ON t.category = c.name
                 WHERE t.id = :id",
            )?
            .query_row(&[(":id", &id)], Self::map_row)?;

        Ok(transaction)
    }

    /// Retrieve every transaction in the database, most recent first.
    ///
    /// Ties on the date are broken by descending ID so the order is stable
    /// within a query.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT t.id, t.amount, t.type, t.category, t.date, t.note, c.icon, c.color
                 FROM transactions t
                 LEFT JOIN categories c ON t.category = c.name
                 ORDER BY t.date DESC, t.id DESC",
            )?
            .query_map([], Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Retrieve the transactions dated within `date_range` (both ends
    /// inclusive), most recent first.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_in_range(&self, date_range: RangeInclusive<Date>) -> Result<Vec<Transaction>, Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT t.id, t.amount, t.type, t.category, t.date, t.note, c.icon, c.color
                 FROM transactions t
                 LEFT JOIN categories c ON t.category = c.name
                 WHERE t.date BETWEEN :start AND :end
                 ORDER BY t.date DESC, t.id DESC",
            )?
            .query_map(
                &[(":start", date_range.start()), (":end", date_range.end())],
                Self::map_row,
            )?
            .map(|maybe_transaction| maybe_transaction.map_err(|error| error.into()))
            .collect()
    }

    /// Delete the transaction with `id` from the database.
    ///
    /// Deleting an id that is not in the database is a no-op, not an error.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .execute("DELETE FROM transactions WHERE id = ?1", (id,))?;

        Ok(())
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount DECIMAL NOT NULL,
                type TEXT NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                note TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let amount = row.get(offset + 1)?;

        let raw_type: String = row.get(offset + 2)?;
        let transaction_type = raw_type.parse::<TransactionType>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 2,
                rusqlite::types::Type::Text,
                format!("invalid transaction type \"{raw_type}\"").into(),
            )
        })?;

        let category = row.get(offset + 3)?;
        let date = row.get(offset + 4)?;
        let note = row.get(offset + 5)?;
        let icon = row.get(offset + 6)?;
        let color = row.get(offset + 7)?;

        Ok(Transaction {
            id,
            amount,
            transaction_type,
            category,
            date,
            note,
            icon,
            color,
        })
    }
}
