//! Core expense domain types.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::{Category, CategoryId},
};

/// Database identifier for an expense.
pub type ExpenseId = i64;

/// A reference from an expense to its category.
///
/// The API accepts and returns either a bare category ID or the full
/// category object. Listings embed the category when it resolves and fall
/// back to the bare ID when the category has been deleted. Reports resolve
/// this duality once, when building a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryRef {
    /// The full category record, embedded in the expense.
    Embedded(Category),
    /// A bare category ID.
    Id(CategoryId),
}

impl CategoryRef {
    /// The referenced category's ID, regardless of representation.
    pub fn id(&self) -> CategoryId {
        match self {
            CategoryRef::Embedded(category) => category.id,
            CategoryRef::Id(id) => *id,
        }
    }
}

/// A dated, amount-bearing record attributed to one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(with = "crate::ymd_format")]
    pub date: Date,
    pub category: CategoryRef,
}

/// Request body for expense creation and editing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseData {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: f64,
    #[serde(with = "crate::ymd_format")]
    pub date: Date,
    pub category: CategoryRef,
}

impl ExpenseData {
    /// Check the fields that serde cannot: a non-empty name and a finite,
    /// non-negative amount.
    ///
    /// # Errors
    /// Returns [Error::EmptyExpenseName] or [Error::InvalidAmount].
    pub fn validate(&self) -> Result<(), Error> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyExpenseName);
        }

        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::InvalidAmount(self.amount));
        }

        Ok(())
    }
}
