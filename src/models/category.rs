//! This file defines the `Category` type and the types needed to create a
//! category. A category acts like a label for a transaction, however a
//! transaction may only have one category.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{DatabaseID, TransactionType},
};

/// The name of a category.
///
/// Besides being the display label, the name is the de-facto join key between
/// categories and transactions, so it must not be empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    /// This function will return an [Error::EmptyCategoryName] if `name` is an
    /// empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because
    /// if the non-empty invariant is violated it will cause incorrect
    /// behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A category for expenses and income, e.g. 'Groceries', 'Wages'.
///
/// A category belongs to exactly one transaction type; the same name may exist
/// under both types as distinct rows. Uniqueness of `(name, type)` is expected
/// but not enforced by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category, assigned by the store on creation.
    pub id: DatabaseID,
    /// The display label, and the join key against transactions.
    pub name: CategoryName,
    /// The transaction type this category applies to.
    #[serde(rename = "type")]
    pub category_type: TransactionType,
    /// Symbolic name into the presentation layer's icon set.
    ///
    /// Stored verbatim as supplied by the caller; the store never checks the
    /// name against any icon set.
    pub icon: String,
    /// Display color, e.g. `#FF7675`.
    pub color: Option<String>,
}

/// The data needed to create a new [Category].
///
/// Validation happens in [NewCategory::new], before anything touches the
/// database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub(crate) name: CategoryName,
    pub(crate) category_type: TransactionType,
    pub(crate) icon: String,
    pub(crate) color: Option<String>,
}

impl NewCategory {
    /// Create the data for a new category.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::EmptyCategoryName] if `name` is an empty string,
    /// - [Error::EmptyIcon] if `icon` is an empty string.
    pub fn new(
        name: &str,
        category_type: TransactionType,
        icon: &str,
        color: Option<String>,
    ) -> Result<Self, Error> {
        let name = CategoryName::new(name)?;

        if icon.is_empty() {
            return Err(Error::EmptyIcon);
        }

        Ok(Self {
            name,
            category_type,
            icon: icon.to_string(),
            color,
        })
    }

    /// The display label of the category.
    pub fn name(&self) -> &CategoryName {
        &self.name
    }

    /// The transaction type this category applies to.
    pub fn category_type(&self) -> TransactionType {
        self.category_type
    }

    /// Symbolic name into the presentation layer's icon set.
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Display color.
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, models::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }
}
