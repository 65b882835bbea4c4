//! Defines the category store trait.

use crate::{
    Error,
    models::{Category, DatabaseID, NewCategory, TransactionType},
};

/// Creates and retrieves the categories that transactions reference by name.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&mut self, new_category: NewCategory) -> Result<Category, Error>;

    /// Retrieve categories, optionally restricted to one transaction type.
    ///
    /// Unfiltered results are ordered by type then name; filtered results are
    /// ordered by name alone.
    fn get_all(&self, category_type: Option<TransactionType>) -> Result<Vec<Category>, Error>;

    /// Delete the category with `id`.
    ///
    /// Deleting an id that is not in the store is a no-op, not an error.
    /// Transactions referencing the deleted category's name are left in
    /// place; they become orphaned rather than deleted or reassigned.
    fn delete(&mut self, id: DatabaseID) -> Result<(), Error>;
}
