//! JSON endpoints for listing and managing categories.

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
    category::{
        Category, CategoryData, CategoryId, CategoryName, create_category, delete_category,
        get_all_categories, update_category,
    },
};

/// The state needed for the category endpoints.
#[derive(Debug, Clone)]
pub struct CategoryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List all categories.
pub async fn list_categories_endpoint(State(state): State<CategoryEndpointState>) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match get_all_categories(&connection) {
        Ok(categories) => Json(categories).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handle category creation from a JSON payload.
pub async fn create_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Json(new_category): Json<CategoryData>,
) -> Response {
    let name = match CategoryName::new(&new_category.name) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_category(name, &connection) {
        Ok(category) => (StatusCode::CREATED, Json(category)).into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");

            error.into_response()
        }
    }
}

/// Handle renaming a category.
pub async fn update_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Path(category_id): Path<CategoryId>,
    Json(updated_category): Json<CategoryData>,
) -> Response {
    let name = match CategoryName::new(&updated_category.name) {
        Ok(name) => name,
        Err(error) => return error.into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match update_category(category_id, name.clone(), &connection) {
        Ok(()) => Json(Category {
            id: category_id,
            name,
        })
        .into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handle deleting a category.
///
/// Expenses referencing the category are kept; reports group them under the
/// "Unknown" bucket from then on.
pub async fn delete_category_endpoint(
    State(state): State<CategoryEndpointState>,
    Path(category_id): Path<CategoryId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match delete_category(category_id, &connection) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
