#![allow(missing_docs)]

use axum::{body::Body, response::Response};
use rusqlite::Connection;
use serde::de::DeserializeOwned;

use crate::AppState;

/// Create an app state backed by a fresh in-memory database.
pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory database");

    AppState::new(connection).expect("Could not create app state")
}

/// Read a response body to completion and deserialize it as JSON.
pub(crate) async fn parse_json_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Could not read response body");

    serde_json::from_slice(&body).expect("Could not parse response body as JSON")
}
