//! Snapshot normalization.
//!
//! Expenses arrive with their category as either a bare ID or an embedded
//! object, and with amounts as floats. Reports should not have to deal with
//! either, so this module resolves every expense to a canonical
//! `(category id, category name)` pair and an integer-cent amount in one
//! pass. The rest of the reporting pipeline only ever sees
//! [ResolvedExpense] values.

use std::collections::HashMap;

use serde::Serialize;
use time::Date;

use crate::{
    category::{Category, CategoryId},
    expense::{CategoryRef, Expense, ExpenseId},
};

/// The display name for expenses whose category reference no longer resolves.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Convert a float amount to integer cents, rounding to the nearest cent.
pub fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// Convert integer cents back to a float amount for the wire.
pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// A category reference resolved to its grouping key and display name.
///
/// `id` is `None` for the "Unknown" bucket, which collects expenses whose
/// bare category ID matches no catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedCategory {
    pub id: Option<CategoryId>,
    pub name: String,
}

/// An expense after normalization: exact cents and a resolved category.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExpense {
    pub id: ExpenseId,
    pub amount_cents: i64,
    pub date: Date,
    pub category: ResolvedCategory,
}

/// Why a record was left out of a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The stored amount was NaN or infinite, so it cannot be summed.
    NonFiniteAmount,
}

/// A diagnostic for a record excluded from a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedExpense {
    pub id: ExpenseId,
    pub reason: SkipReason,
}

/// A normalized, immutable view of the expense records at one point in time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    /// The normalized expenses, in the order they were given.
    pub expenses: Vec<ResolvedExpense>,
    /// Records that could not be normalized, with the reason for each.
    pub skipped: Vec<SkippedExpense>,
}

impl Snapshot {
    /// Normalize `expenses` against the category catalog `categories`.
    ///
    /// An embedded category resolves through its own name. A bare ID is
    /// looked up in the catalog, and falls back to the
    /// [UNKNOWN_LABEL] bucket when the lookup fails (e.g., the category was
    /// deleted after the expense was recorded). Input order is preserved.
    pub fn new(expenses: &[Expense], categories: &[Category]) -> Self {
        let names_by_id: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|category| (category.id, category.name.as_ref()))
            .collect();

        let mut snapshot = Snapshot::default();

        for expense in expenses {
            if !expense.amount.is_finite() {
                snapshot.skipped.push(SkippedExpense {
                    id: expense.id,
                    reason: SkipReason::NonFiniteAmount,
                });
                continue;
            }

            let category = match &expense.category {
                CategoryRef::Embedded(category) => ResolvedCategory {
                    id: Some(category.id),
                    name: category.name.to_string(),
                },
                CategoryRef::Id(id) => match names_by_id.get(id) {
                    Some(name) => ResolvedCategory {
                        id: Some(*id),
                        name: (*name).to_owned(),
                    },
                    None => ResolvedCategory {
                        id: None,
                        name: UNKNOWN_LABEL.to_owned(),
                    },
                },
            };

            snapshot.expenses.push(ResolvedExpense {
                id: expense.id,
                amount_cents: to_cents(expense.amount),
                date: expense.date,
                category,
            });
        }

        snapshot
    }
}
