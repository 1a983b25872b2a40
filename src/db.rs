//! Database initialization for the application's SQLite schema.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, category::create_category_table, expense::create_expense_table};

/// Add the tables for the domain models to the database.
///
/// # Errors
/// Returns an error if any table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_category_table(&transaction)?;
    create_expense_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
