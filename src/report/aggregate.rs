//! The aggregator: per-category totals and a grand total, exact to the cent.

use std::collections::HashMap;

use crate::{
    category::CategoryId,
    report::ResolvedExpense,
};

/// The total spent in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// `None` for the "Unknown" bucket.
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub total_cents: i64,
}

/// Per-category totals plus the grand total over the same expenses.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CategoryBreakdown {
    /// One row per category, in order of first appearance in the input.
    pub rows: Vec<CategoryTotal>,
    pub grand_total_cents: i64,
}

/// Sum `expenses` by resolved category.
///
/// Rows come out in order of first appearance, so a breakdown over a
/// date-sorted snapshot lists categories in the order they were first spent
/// in. The grand total equals the sum of the row totals by construction.
pub fn aggregate_by_category(expenses: &[ResolvedExpense]) -> CategoryBreakdown {
    let mut breakdown = CategoryBreakdown::default();
    let mut row_index: HashMap<Option<CategoryId>, usize> = HashMap::new();

    for expense in expenses {
        let index = *row_index
            .entry(expense.category.id)
            .or_insert_with(|| {
                breakdown.rows.push(CategoryTotal {
                    category_id: expense.category.id,
                    name: expense.category.name.clone(),
                    total_cents: 0,
                });
                breakdown.rows.len() - 1
            });

        breakdown.rows[index].total_cents += expense.amount_cents;
        breakdown.grand_total_cents += expense.amount_cents;
    }

    breakdown
}

#[cfg(test)]
mod aggregate_tests {
    use time::macros::date;

    use crate::report::{ResolvedCategory, ResolvedExpense};

    use super::aggregate_by_category;

    fn expense(id: i64, amount_cents: i64, category_id: Option<i64>, name: &str) -> ResolvedExpense {
        ResolvedExpense {
            id,
            amount_cents,
            date: date!(2024 - 01 - 01),
            category: ResolvedCategory {
                id: category_id,
                name: name.to_owned(),
            },
        }
    }

    #[test]
    fn sums_by_category_in_first_appearance_order() {
        let expenses = vec![
            expense(1, 10_000, Some(1), "Food"),
            expense(2, 5_000, Some(2), "Transport"),
            expense(3, 2_500, Some(1), "Food"),
        ];

        let breakdown = aggregate_by_category(&expenses);

        let rows: Vec<(Option<i64>, &str, i64)> = breakdown
            .rows
            .iter()
            .map(|row| (row.category_id, row.name.as_str(), row.total_cents))
            .collect();
        assert_eq!(
            rows,
            vec![(Some(1), "Food", 12_500), (Some(2), "Transport", 5_000)]
        );
        assert_eq!(breakdown.grand_total_cents, 17_500);
    }

    #[test]
    fn grand_total_equals_sum_of_rows() {
        let expenses = vec![
            expense(1, 33, Some(1), "Food"),
            expense(2, 33, Some(2), "Transport"),
            expense(3, 34, None, "Unknown"),
        ];

        let breakdown = aggregate_by_category(&expenses);

        let row_sum: i64 = breakdown.rows.iter().map(|row| row.total_cents).sum();
        assert_eq!(breakdown.grand_total_cents, row_sum);
        assert_eq!(breakdown.grand_total_cents, 100);
    }

    #[test]
    fn sums_cent_amounts_exactly() {
        // Three lots of $0.10; float summation would give 0.30000000000000004.
        let expenses = vec![
            expense(1, 10, Some(1), "Food"),
            expense(2, 10, Some(1), "Food"),
            expense(3, 10, Some(1), "Food"),
        ];

        let breakdown = aggregate_by_category(&expenses);

        assert_eq!(breakdown.rows[0].total_cents, 30);
        assert_eq!(breakdown.grand_total_cents, 30);
    }

    #[test]
    fn unknown_bucket_gets_its_own_row() {
        let expenses = vec![
            expense(1, 100, Some(1), "Food"),
            expense(2, 200, None, "Unknown"),
        ];

        let breakdown = aggregate_by_category(&expenses);

        assert_eq!(breakdown.rows.len(), 2);
        assert_eq!(breakdown.rows[1].category_id, None);
        assert_eq!(breakdown.rows[1].name, "Unknown");
        assert_eq!(breakdown.rows[1].total_cents, 200);
    }

    #[test]
    fn empty_input_yields_empty_breakdown() {
        let breakdown = aggregate_by_category(&[]);

        assert!(breakdown.rows.is_empty());
        assert_eq!(breakdown.grand_total_cents, 0);
    }
}
