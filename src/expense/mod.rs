//! Expense management: dated, amount-bearing records attributed to one
//! category.

mod db;
mod domain;
mod endpoints;

pub use db::{
    create_expense, create_expense_table, delete_expense, get_all_expenses, get_expense,
    update_expense,
};
pub use domain::{CategoryRef, Expense, ExpenseData, ExpenseId};
pub use endpoints::{
    create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
    update_expense_endpoint,
};
