//! Implements the struct that ties the stores to one shared database handle.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error, db,
    stores::{CategoryStore, ReportStore, TransactionStore},
};

/// The composition root of the ledger: one shared database handle and the
/// stores that read and write through it.
///
/// All stores clone the same `Arc<Mutex<Connection>>`, so a caller awaiting
/// one operation sees no interleaved mutation from another store on the same
/// ledger. The handle is created once by
/// [create_ledger](crate::stores::sqlite::create_ledger) and passed down
/// explicitly rather than living in module-level mutable state.
#[derive(Debug, Clone)]
pub struct Ledger<T, C, R>
where
    T: TransactionStore,
    C: CategoryStore,
    R: ReportStore,
{
    /// The store for recording and listing transactions.
    pub transactions: T,
    /// The store for the categories transactions reference by name.
    pub categories: C,
    /// The store for monthly and per-category aggregation queries.
    pub reports: R,
    /// The database connection shared by the stores.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl<T, C, R> Ledger<T, C, R>
where
    T: TransactionStore,
    C: CategoryStore,
    R: ReportStore,
{
    /// Create a new [Ledger] from its stores and the connection they share.
    pub fn new(
        transactions: T,
        categories: C,
        reports: R,
        db_connection: Arc<Mutex<Connection>>,
    ) -> Self {
        Self {
            transactions,
            categories,
            reports,
            db_connection,
        }
    }

    /// Destroy everything the ledger holds and start over.
    ///
    /// Drops both tables, recreates the schema, and reseeds the default
    /// categories. After this returns successfully the transaction list is
    /// empty and the categories are exactly the seed set.
    ///
    /// # Errors
    /// This function will return an [Error::SqlError] if any statement fails;
    /// the drop-and-recreate runs in one transaction, so a failure leaves the
    /// previous contents in place.
    pub fn reset(&mut self) -> Result<(), Error> {
        let connection = self
            .db_connection
            .lock()
            .expect("Could not acquire database lock");

        db::reset(&connection)
    }
}
