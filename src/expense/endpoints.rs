//! JSON endpoints for listing and managing expenses.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::get_category,
    expense::{
        ExpenseData, ExpenseId, create_expense, delete_expense, get_all_expenses, get_expense,
        update_expense,
    },
};

/// The state needed for the expense endpoints.
#[derive(Debug, Clone)]
pub struct ExpenseEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExpenseEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List all expenses, newest first.
pub async fn list_expenses_endpoint(State(state): State<ExpenseEndpointState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_expenses(&connection) {
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handle expense creation from a JSON payload.
///
/// The category reference may be a bare ID or an embedded object; either
/// way it must refer to a known category.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseEndpointState>,
    Json(new_expense): Json<ExpenseData>,
) -> Response {
    if let Err(error) = new_expense.validate() {
        return error.into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    if let Err(error) = check_category_exists(&new_expense, &connection) {
        return error.into_response();
    }

    match create_expense(&new_expense, &connection) {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating an expense: {error}");

            error.into_response()
        }
    }
}

/// Handle editing an expense.
pub async fn update_expense_endpoint(
    State(state): State<ExpenseEndpointState>,
    Path(expense_id): Path<ExpenseId>,
    Json(updated_expense): Json<ExpenseData>,
) -> Response {
    if let Err(error) = updated_expense.validate() {
        return error.into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    if let Err(error) = check_category_exists(&updated_expense, &connection) {
        return error.into_response();
    }

    if let Err(error) = update_expense(expense_id, &updated_expense, &connection) {
        return error.into_response();
    }

    match get_expense(expense_id, &connection) {
        Ok(expense) => Json(expense).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handle deleting an expense.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseEndpointState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_expense(expense_id, &connection) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}

fn check_category_exists(data: &ExpenseData, connection: &Connection) -> Result<(), Error> {
    let category_id = data.category.id();

    match get_category(category_id, connection) {
        Ok(_) => Ok(()),
        Err(Error::NotFound) => Err(Error::InvalidCategory(category_id)),
        Err(error) => Err(error),
    }
}
