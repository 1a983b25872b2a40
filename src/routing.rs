//! Defines the app's routes.

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{delete, get},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, ErrorBody,
    category::{
        create_category_endpoint, delete_category_endpoint, list_categories_endpoint,
        update_category_endpoint,
    },
    endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, list_expenses_endpoint,
        update_expense_endpoint,
    },
    report::get_summary_endpoint,
};

/// Return a router with all the app's routes.
///
/// The browser client is served from another origin, so the router carries a
/// permissive CORS layer.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            delete(delete_category_endpoint).put(update_category_endpoint),
        )
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            delete(delete_expense_endpoint).put(update_expense_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn get_404_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "the requested resource could not be found".to_owned(),
        }),
    )
}
