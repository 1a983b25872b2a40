//! The time-series bucketizer: a dense day-by-category matrix for stacked
//! charts.

use std::collections::{BTreeSet, HashMap};

use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{category::CategoryId, report::ResolvedExpense};

const DAY_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// One category's spending across every day in the matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySeries {
    /// `None` for the "Unknown" bucket.
    pub category_id: Option<CategoryId>,
    pub name: String,
    /// One value per day label, zero-filled for days without spending.
    pub values_cents: Vec<i64>,
}

/// Spending bucketed by calendar day and category.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayCategoryMatrix {
    /// The distinct days with at least one expense, ascending, as
    /// `YYYY-MM-DD` labels.
    pub day_labels: Vec<String>,
    /// One dense series per category, in order of first appearance.
    pub series: Vec<CategorySeries>,
}

/// Bucket `expenses` into a dense day-by-category matrix.
///
/// A single pass accumulates `(day, category) -> cents` sums, the distinct
/// days, and the category order; the sums are then projected into one
/// zero-filled row per category. Each series sums to that category's
/// aggregate total.
pub fn bucketize_by_day(expenses: &[ResolvedExpense]) -> DayCategoryMatrix {
    let mut sums: HashMap<(Date, Option<CategoryId>), i64> = HashMap::new();
    let mut days: BTreeSet<Date> = BTreeSet::new();
    let mut categories: Vec<(Option<CategoryId>, String)> = Vec::new();

    for expense in expenses {
        days.insert(expense.date);

        if !categories
            .iter()
            .any(|(category_id, _)| *category_id == expense.category.id)
        {
            categories.push((expense.category.id, expense.category.name.clone()));
        }

        *sums
            .entry((expense.date, expense.category.id))
            .or_default() += expense.amount_cents;
    }

    let series = categories
        .into_iter()
        .map(|(category_id, name)| CategorySeries {
            category_id,
            name,
            values_cents: days
                .iter()
                .map(|day| sums.get(&(*day, category_id)).copied().unwrap_or(0))
                .collect(),
        })
        .collect();

    DayCategoryMatrix {
        day_labels: days.iter().map(format_day_label).collect(),
        series,
    }
}

fn format_day_label(day: &Date) -> String {
    day.format(DAY_FORMAT)
        .expect("a date always formats as year-month-day")
}
