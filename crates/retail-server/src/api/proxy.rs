//! Read-only pass-through routes for the analytics backend.
//!
//! Each handler relays the first successful upstream body unmodified. When
//! every origin fails the route still answers 200 with an empty value of the
//! documented shape, except `apple-data`, which has no meaningful empty form.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Extension, Json,
};
use retail_core::{StoreRecommendations, StoreType};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsQuery {
    store_type: Option<String>,
}

/// Logs the upstream failure and substitutes `fallback`.
fn or_empty<E: std::fmt::Display>(
    route: &'static str,
    result: Result<Value, E>,
    fallback: Value,
) -> Json<Value> {
    match result {
        Ok(body) => Json(body),
        Err(e) => {
            tracing::warn!(route, error = %e, "upstream unavailable; serving empty default");
            Json(fallback)
        }
    }
}

/// First value for `key`; repeated keys never reject the request.
fn first_param<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Takes raw pairs so that no query string can turn this route into a non-200.
pub(super) async fn sales_by_store_quarterly(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> impl IntoResponse {
    let Some(store_name) = first_param(&pairs, "store_name")
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Json(json!({ "quarterly": [] }));
    };

    let result = state
        .backend
        .fetch_sales_by_store_quarterly(store_name, first_param(&pairs, "country"))
        .await;
    or_empty("sales-by-store-quarterly", result, json!({ "quarterly": [] }))
}

pub(super) async fn apple_data(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Value>, ApiError> {
    state.backend.fetch_apple_data().await.map(Json).map_err(|e| {
        tracing::error!(error = %e, "apple-data unavailable on every origin");
        ApiError::new(
            req_id.0,
            "upstream_unavailable",
            "analytics backend is unreachable",
        )
    })
}

pub(super) async fn last_updated(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    or_empty(
        "last-updated",
        state.backend.fetch_last_updated().await,
        json!({ "last_updated": today }),
    )
}

pub(super) async fn store_list(State(state): State<AppState>) -> impl IntoResponse {
    let result = state.backend.get_json(&["api", "store-list"], &[]).await;
    or_empty("store-list", result, json!({ "stores": [] }))
}

pub(super) async fn store_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
    Query(params): Query<RecommendationsQuery>,
) -> Result<Json<Value>, ApiError> {
    let store_type = match params.store_type.as_deref().map(str::trim) {
        None | Some("") => StoreType::default(),
        Some(raw) => raw
            .parse::<StoreType>()
            .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?,
    };

    let result = state
        .backend
        .get_json(
            &["api", "store-recommendations", &store_id],
            &[("store_type", store_type.as_str())],
        )
        .await;
    let fallback = serde_json::to_value(StoreRecommendations::empty_for(&store_id))
        .map_err(|e| ApiError::new(req_id.0, "internal_error", e.to_string()))?;
    Ok(or_empty("store-recommendations", result, fallback))
}

pub(super) async fn data_source(State(state): State<AppState>) -> impl IntoResponse {
    let result = state.backend.get_json(&["api", "data-source"], &[]).await;
    or_empty(
        "data-source",
        result,
        json!({ "data_dir": "", "source": "none", "sql_file_count": 0, "csv_path": null }),
    )
}

pub(super) async fn inventory(State(state): State<AppState>) -> impl IntoResponse {
    let result = state
        .backend
        .get_json(&["api", "inventory-frozen-money"], &[])
        .await;
    or_empty("inventory-frozen-money", result, json!({ "items": [] }))
}
