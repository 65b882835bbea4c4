//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction},
};

/// Handles the creation, retrieval, and deletion of transactions.
pub trait TransactionStore {
    /// Record a new transaction in the store.
    ///
    /// The returned transaction carries the generated ID and the icon/color
    /// of the category it names, resolved at insert time.
    fn create(&mut self, new_transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Retrieve every transaction, most recent first.
    ///
    /// Each transaction is joined with its current category's icon and color;
    /// both are `None` when no category with a matching name exists.
    fn get_all(&self) -> Result<Vec<Transaction>, Error>;

    /// Retrieve the transactions dated within `date_range`, most recent
    /// first.
    ///
    /// Both ends of the range are inclusive: a transaction dated exactly on
    /// the start or end date is returned. The join semantics are the same as
    /// [TransactionStore::get_all].
    fn get_in_range(&self, date_range: RangeInclusive<Date>) -> Result<Vec<Transaction>, Error>;

    /// Delete the transaction with `id`.
    ///
    /// Deleting an id that is not in the store is a no-op, not an error.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
