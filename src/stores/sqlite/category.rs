//! Implements a SQLite backed category store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Category, CategoryName, DatabaseID, NewCategory, TransactionType},
    stores::CategoryStore,
};

/// Creates and retrieves transaction categories to/from a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteCategoryStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteCategoryStore {
    /// Create a new category store with a SQLite database.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl CategoryStore for SQLiteCategoryStore {
    /// Create a category in the database.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error> {
        let connection = self
            .connection
            .lock()
            .expect("Could not acquire database lock");

        connection.execute(
            "INSERT INTO categories (name, type, icon, color) VALUES (?1, ?2, ?3, ?4)",
            (
                new_category.name.as_ref(),
                new_category.category_type.as_str(),
                &new_category.icon,
                &new_category.color,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Category {
            id,
            name: new_category.name,
            category_type: new_category.category_type,
            icon: new_category.icon,
            color: new_category.color,
        })
    }

    /// Retrieve categories in the database, optionally restricted to one
    /// transaction type.
    ///
    /// Unfiltered results are ordered by type then name; filtered results are
    /// ordered by name alone.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn get_all(&self, category_type: Option<TransactionType>) -> Result<Vec<Category>, Error> {
        let connection = self
            .connection
            .lock()
            .expect("Could not acquire database lock");

        match category_type {
            Some(category_type) => connection
                .prepare(
                    "SELECT id, name, type, icon, color FROM categories
                     WHERE type = :type ORDER BY name",
                )?
                .query_map(&[(":type", category_type.as_str())], Self::map_row)?
                .map(|maybe_category| maybe_category.map_err(|error| error.into()))
                .collect(),
            None => connection
                .prepare("SELECT id, name, type, icon, color FROM categories ORDER BY type, name")?
                .query_map([], Self::map_row)?
                .map(|maybe_category| maybe_category.map_err(|error| error.into()))
                .collect(),
        }
    }

    /// Delete the category with `id` from the database.
    ///
    /// Deleting an id that is not in the database is a no-op. Transactions
    /// referencing the category's name are never touched; they become
    /// orphaned.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if there is an SQL
    /// error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .execute("DELETE FROM categories WHERE id = ?1", (id,))?;

        Ok(())
    }
}

impl CreateTable for SQLiteCategoryStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                type TEXT NOT NULL,
                icon TEXT NOT NULL,
                color TEXT
            )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteCategoryStore {
    type ReturnType = Category;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;

        let raw_name: String = row.get(offset + 1)?;
        let name = CategoryName::new_unchecked(&raw_name);

        let raw_type: String = row.get(offset + 2)?;
        let category_type = raw_type.parse::<TransactionType>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                offset + 2,
                rusqlite::types::Type::Text,
                format!("invalid transaction type \"{raw_type}\"").into(),
            )
        })?;

        let icon = row.get(offset + 3)?;
        let color = row.get(offset + 4)?;

        Ok(Category {
            id,
            name,
            category_type,
            icon,
            color,
        })
    }
}
