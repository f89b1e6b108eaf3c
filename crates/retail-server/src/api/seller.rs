use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use retail_client::fetch_seller_bundle;
use retail_core::{SellerSession, SellerView, StoreType};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

/// Counters are carried by the caller between requests; the server keeps no
/// per-seller state.
#[derive(Debug, Deserialize)]
pub(super) struct SellerQuery {
    cursor: Option<usize>,
    sold_count: Option<u32>,
    store_type: Option<String>,
}

pub(super) async fn seller_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(store_id): Path<String>,
    Query(params): Query<SellerQuery>,
) -> Result<Json<ApiResponse<SellerView>>, ApiError> {
    let store_type = match params.store_type.as_deref().map(str::trim) {
        None | Some("") => StoreType::default(),
        Some(raw) => raw
            .parse::<StoreType>()
            .map_err(|reason| ApiError::new(req_id.0.clone(), "validation_error", reason))?,
    };

    let (bundle, stores) = tokio::join!(
        fetch_seller_bundle(&state.backend, &store_id, store_type),
        state.backend.fetch_store_list(),
    );

    let mut session = SellerSession::new();
    match stores {
        Ok(list) => {
            session.set_stores(list.stores);
        }
        Err(e) => tracing::warn!(error = %e, "store list unavailable for seller dashboard"),
    }
    let ticket = session.select_store(&store_id);
    session.apply_bundle(&ticket, bundle);
    session.restore_counters(
        params.cursor.unwrap_or_default(),
        params.sold_count.unwrap_or_default(),
    );

    tracing::debug!(
        store_id = %store_id,
        cursor = session.cursor(),
        sold_count = session.sold_count(),
        "seller dashboard composed"
    );

    Ok(Json(ApiResponse {
        data: session.view(),
        meta: ResponseMeta::new(req_id.0),
    }))
}
