//! The summary endpoint: runs the reporting pipeline over the current
//! database contents.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_all_categories},
    expense::{Expense, get_all_expenses},
    report::{
        ExpenseFilter, SkippedExpense, Snapshot, aggregate_by_category, bucketize_by_day,
        filter_expenses, from_cents,
    },
};

/// The state needed for the summary endpoint.
#[derive(Debug, Clone)]
pub struct SummaryEndpointState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SummaryEndpointState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for the summary endpoint. All optional; an absent
/// parameter means no constraint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryParams {
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default, with = "crate::ymd_format::option")]
    pub start_date: Option<Date>,
    #[serde(default, with = "crate::ymd_format::option")]
    pub end_date: Option<Date>,
}

/// The total spent in one category, as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub total: f64,
}

/// One category's per-day spending, as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySeries {
    pub category_id: Option<CategoryId>,
    pub name: String,
    pub values: Vec<f64>,
}

/// The full summary report: totals plus the stacked-chart matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResponse {
    pub rows: Vec<SummaryRow>,
    pub grand_total: f64,
    pub day_labels: Vec<String>,
    pub series: Vec<SummarySeries>,
    pub skipped: Vec<SkippedExpense>,
}

/// Compute per-category totals and the day-by-category matrix for the
/// expenses matching the query parameters.
///
/// Categories and expenses are read under one lock acquisition so the report
/// sees a consistent snapshot, then the pure pipeline runs without the lock.
pub async fn get_summary_endpoint(
    State(state): State<SummaryEndpointState>,
    Query(params): Query<SummaryParams>,
) -> Response {
    let (categories, expenses) = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        let categories = match get_all_categories(&connection) {
            Ok(categories) => categories,
            Err(error) => return error.into_response(),
        };
        let expenses = match get_all_expenses(&connection) {
            Ok(expenses) => expenses,
            Err(error) => return error.into_response(),
        };

        (categories, expenses)
    };

    Json(build_summary(&expenses, &categories, &params)).into_response()
}

fn build_summary(
    expenses: &[Expense],
    categories: &[Category],
    params: &SummaryParams,
) -> SummaryResponse {
    let snapshot = Snapshot::new(expenses, categories);

    let filter = ExpenseFilter {
        category_id: params.category_id,
        start_date: params.start_date,
        end_date: params.end_date,
    };
    let filtered = filter_expenses(&snapshot.expenses, &filter);

    let breakdown = aggregate_by_category(&filtered);
    let matrix = bucketize_by_day(&filtered);

    SummaryResponse {
        rows: breakdown
            .rows
            .into_iter()
            .map(|row| SummaryRow {
                category_id: row.category_id,
                name: row.name,
                total: from_cents(row.total_cents),
            })
            .collect(),
        grand_total: from_cents(breakdown.grand_total_cents),
        day_labels: matrix.day_labels,
        series: matrix
            .series
            .into_iter()
            .map(|series| SummarySeries {
                category_id: series.category_id,
                name: series.name,
                values: series.values_cents.into_iter().map(from_cents).collect(),
            })
            .collect(),
        skipped: snapshot.skipped,
    }
}

#[cfg(test)]
mod summary_endpoint_tests {
    use axum::{
        extract::{Query, State},
        http::StatusCode,
    };
    use serde_json::Value;
    use time::macros::date;

    use crate::{
        category::{Category, CategoryName, create_category, delete_category},
        expense::{CategoryRef, ExpenseData, create_expense},
        test_utils::{get_test_app_state, parse_json_body},
    };

    use super::{SummaryEndpointState, SummaryParams, get_summary_endpoint};

    fn get_test_state() -> SummaryEndpointState {
        let state = get_test_app_state();

        SummaryEndpointState {
            db_connection: state.db_connection,
        }
    }

    fn create_test_category(state: &SummaryEndpointState, name: &str) -> Category {
        let connection = state.db_connection.lock().unwrap();
        create_category(CategoryName::new_unchecked(name), &connection)
            .expect("Could not create test category")
    }

    fn create_test_expense(
        state: &SummaryEndpointState,
        name: &str,
        amount: f64,
        date: time::Date,
        category_id: i64,
    ) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            &ExpenseData {
                name: name.to_owned(),
                description: None,
                amount,
                date,
                category: CategoryRef::Id(category_id),
            },
            &connection,
        )
        .expect("Could not create test expense");
    }

    /// Two categories, three expenses across two days.
    fn seed_scenario(state: &SummaryEndpointState) -> (Category, Category) {
        let food = create_test_category(state, "Food");
        let transport = create_test_category(state, "Transport");

        create_test_expense(state, "Groceries", 100.0, date!(2024 - 01 - 01), food.id);
        create_test_expense(state, "Bus", 50.0, date!(2024 - 01 - 01), transport.id);
        create_test_expense(state, "Lunch", 25.0, date!(2024 - 01 - 02), food.id);

        (food, transport)
    }

    #[tokio::test]
    async fn summarizes_all_expenses() {
        let state = get_test_state();
        let (food, transport) = seed_scenario(&state);

        let response =
            get_summary_endpoint(State(state), Query(SummaryParams::default())).await;

        assert_eq!(response.status(), StatusCode::OK);

        let summary: Value = parse_json_body(response).await;
        assert_eq!(summary["grand_total"], 175.0);
        assert_eq!(
            summary["day_labels"],
            serde_json::json!(["2024-01-01", "2024-01-02"])
        );

        let rows = summary["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        let food_row = rows
            .iter()
            .find(|row| row["category_id"] == food.id)
            .unwrap();
        assert_eq!(food_row["name"], "Food");
        assert_eq!(food_row["total"], 125.0);
        let transport_row = rows
            .iter()
            .find(|row| row["category_id"] == transport.id)
            .unwrap();
        assert_eq!(transport_row["total"], 50.0);

        let series = summary["series"].as_array().unwrap();
        let food_series = series
            .iter()
            .find(|series| series["category_id"] == food.id)
            .unwrap();
        assert_eq!(food_series["values"], serde_json::json!([100.0, 25.0]));
        let transport_series = series
            .iter()
            .find(|series| series["category_id"] == transport.id)
            .unwrap();
        assert_eq!(transport_series["values"], serde_json::json!([50.0, 0.0]));

        assert_eq!(summary["skipped"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn category_filter_restricts_the_report() {
        let state = get_test_state();
        let (food, _) = seed_scenario(&state);

        let response = get_summary_endpoint(
            State(state),
            Query(SummaryParams {
                category_id: Some(food.id),
                ..Default::default()
            }),
        )
        .await;

        let summary: Value = parse_json_body(response).await;
        assert_eq!(summary["grand_total"], 125.0);

        let rows = summary["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], "Food");
    }

    #[tokio::test]
    async fn start_date_filter_restricts_the_report() {
        let state = get_test_state();
        let (food, _) = seed_scenario(&state);

        let response = get_summary_endpoint(
            State(state),
            Query(SummaryParams {
                start_date: Some(date!(2024 - 01 - 02)),
                ..Default::default()
            }),
        )
        .await;

        let summary: Value = parse_json_body(response).await;
        assert_eq!(summary["grand_total"], 25.0);

        let rows = summary["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["category_id"], food.id);
        assert_eq!(rows[0]["total"], 25.0);
        assert_eq!(summary["day_labels"], serde_json::json!(["2024-01-02"]));
    }

    #[tokio::test]
    async fn cent_amounts_sum_exactly() {
        let state = get_test_state();
        let food = create_test_category(&state, "Food");

        // Summing 0.1 three times as floats gives 0.30000000000000004.
        for day in 1..=3 {
            create_test_expense(
                &state,
                "Small",
                0.1,
                time::Date::from_calendar_date(2024, time::Month::January, day).unwrap(),
                food.id,
            );
        }

        let response =
            get_summary_endpoint(State(state), Query(SummaryParams::default())).await;

        let summary: Value = parse_json_body(response).await;
        assert_eq!(summary["grand_total"], 0.3);
    }

    #[tokio::test]
    async fn expenses_with_deleted_categories_group_under_unknown() {
        let state = get_test_state();
        let doomed = create_test_category(&state, "Doomed");
        create_test_expense(&state, "Orphaned", 42.0, date!(2024 - 01 - 01), doomed.id);
        {
            let connection = state.db_connection.lock().unwrap();
            delete_category(doomed.id, &connection).expect("Could not delete category");
        }

        let response =
            get_summary_endpoint(State(state), Query(SummaryParams::default())).await;

        let summary: Value = parse_json_body(response).await;
        let rows = summary["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["category_id"], Value::Null);
        assert_eq!(rows[0]["name"], "Unknown");
        assert_eq!(rows[0]["total"], 42.0);
    }
}
