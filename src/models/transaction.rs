//! This file defines the `Transaction` type, the core type of the ledger, and
//! the types needed to record a new transaction.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, models::DatabaseID};

/// Whether a transaction brings money in or sends money out.
///
/// Stored in the database as the strings `income` and `expense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming in, e.g. wages.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionType {
    /// The string stored in the database's `type` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(Error::InvalidTransactionType(other.to_string())),
        }
    }
}

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// The `category` field references a [Category](crate::models::Category) by
/// name. The reference is not enforced: the category may have been deleted
/// since the transaction was recorded. Rows read from the store resolve the
/// icon and color of the current category row, or carry `None` for both when
/// no such category exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction, assigned by the store on creation.
    pub id: DatabaseID,
    /// The amount of money spent or earned, always a positive magnitude.
    pub amount: f64,
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// The name of the category the transaction belongs to.
    pub category: String,
    /// When the transaction happened.
    pub date: Date,
    /// Free-text note attached by the user.
    pub note: Option<String>,
    /// The icon of the matching category, `None` if the reference is orphaned.
    pub icon: Option<String>,
    /// The color of the matching category, `None` if the reference is
    /// orphaned or the category has no color.
    pub color: Option<String>,
}

/// The data needed to record a new [Transaction].
///
/// Validation happens in [NewTransaction::new], before anything touches the
/// database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub(crate) amount: f64,
    pub(crate) transaction_type: TransactionType,
    pub(crate) category: String,
    pub(crate) date: Date,
    pub(crate) note: Option<String>,
}

impl NewTransaction {
    /// Create the data for a new transaction.
    ///
    /// `amount` is the positive magnitude of the transaction regardless of
    /// `transaction_type`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero, negative, or not
    ///   finite,
    /// - [Error::EmptyCategory] if `category` is an empty string.
    pub fn new(
        amount: f64,
        transaction_type: TransactionType,
        category: &str,
        date: Date,
        note: Option<String>,
    ) -> Result<Self, Error> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::NonPositiveAmount(amount));
        }

        if category.is_empty() {
            return Err(Error::EmptyCategory);
        }

        Ok(Self {
            amount,
            transaction_type,
            category: category.to_string(),
            date,
            note,
        })
    }

    /// The amount of money spent or earned.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Whether the transaction is income or an expense.
    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    /// The name of the category the transaction belongs to.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// When the transaction happened.
    pub fn date(&self) -> &Date {
        &self.date
    }

    /// Free-text note attached by the user.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}
