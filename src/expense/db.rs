//! Database operations for expenses.
//!
//! Reads LEFT JOIN the category table so each expense comes back with its
//! category embedded when the reference still resolves, and with the bare
//! (dangling) ID when the category has been deleted.

use rusqlite::{Connection, Row};
use time::Date;

use crate::{
    Error,
    category::{Category, CategoryId, CategoryName},
    expense::{CategoryRef, Expense, ExpenseData, ExpenseId},
};

const SELECT_EXPENSE: &str = "SELECT e.id, e.name, e.description, e.amount, e.date, e.category_id, c.name
    FROM expense e
    LEFT JOIN category c ON c.id = e.category_id";

/// Create an expense and return it with its generated ID and embedded
/// category.
pub fn create_expense(data: &ExpenseData, connection: &Connection) -> Result<Expense, Error> {
    connection.execute(
        "INSERT INTO expense (name, description, amount, date, category_id)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            &data.name,
            &data.description,
            data.amount,
            data.date,
            data.category.id(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    get_expense(id, connection)
}

/// Retrieve a single expense by ID.
pub fn get_expense(expense_id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} WHERE e.id = :id;"))?
        .query_row(&[(":id", &expense_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all expenses, newest first.
pub fn get_all_expenses(connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(&format!("{SELECT_EXPENSE} ORDER BY e.date DESC, e.id DESC;"))?
        .query_map([], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Update an expense's fields. Returns an error if the expense doesn't
/// exist.
pub fn update_expense(
    expense_id: ExpenseId,
    data: &ExpenseData,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE expense
        SET name = ?1, description = ?2, amount = ?3, date = ?4, category_id = ?5
        WHERE id = ?6",
        (
            &data.name,
            &data.description,
            data.amount,
            data.date,
            data.category.id(),
            expense_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingExpense);
    }

    Ok(())
}

/// Delete an expense by ID. Returns an error if the expense doesn't exist.
pub fn delete_expense(expense_id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM expense WHERE id = ?1", [expense_id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingExpense);
    }

    Ok(())
}

/// Initialize the expense table and indexes.
///
/// `category_id` deliberately has no foreign key constraint: deleting a
/// category leaves its expenses in place with a dangling reference, which
/// reports group under the "Unknown" bucket.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS expense (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            description TEXT,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            category_id INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_expense_date ON expense(date);
        CREATE INDEX IF NOT EXISTS idx_expense_category ON expense(category_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let category_id: CategoryId = row.get(5)?;
    let category = match row.get::<_, Option<String>>(6)? {
        Some(raw_name) => CategoryRef::Embedded(Category {
            id: category_id,
            name: CategoryName::new_unchecked(&raw_name),
        }),
        None => CategoryRef::Id(category_id),
    };

    Ok(Expense {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        date: row.get::<_, Date>(4)?,
        category,
    })
}
