//! The filter engine: category and date-range predicates over a snapshot.

use time::Date;

use crate::{category::CategoryId, report::ResolvedExpense};

/// What to keep when filtering expenses. A `None` field means "no
/// constraint", so the default filter is the identity.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ExpenseFilter {
    /// Keep only expenses resolved to this category.
    pub category_id: Option<CategoryId>,
    /// Keep only expenses on or after this date.
    pub start_date: Option<Date>,
    /// Keep only expenses on or before this date. The bound is inclusive of
    /// the entire calendar day.
    pub end_date: Option<Date>,
}

/// Select the expenses matching `filter`, preserving their relative order.
pub fn filter_expenses(
    expenses: &[ResolvedExpense],
    filter: &ExpenseFilter,
) -> Vec<ResolvedExpense> {
    expenses
        .iter()
        .filter(|expense| {
            filter
                .category_id
                .is_none_or(|category_id| expense.category.id == Some(category_id))
                && filter.start_date.is_none_or(|start| expense.date >= start)
                && filter.end_date.is_none_or(|end| expense.date <= end)
        })
        .cloned()
        .collect()
}
