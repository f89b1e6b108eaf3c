//! Concurrent fetch of everything the seller dashboard needs for one store.

use retail_core::{SellerBundle, StoreType};

use crate::client::BackendClient;

/// Fetches a store's recommendations and the inventory snapshot concurrently.
///
/// Failures are folded into the bundle rather than returned: a failed
/// recommendation fetch leaves `recommendations` empty, a failed inventory
/// fetch leaves `inventory` empty but keeps the recommendations.
pub async fn fetch_seller_bundle(
    client: &BackendClient,
    store_id: &str,
    store_type: StoreType,
) -> SellerBundle {
    let (recommendations, inventory) = tokio::join!(
        client.fetch_store_recommendations(store_id, store_type),
        client.fetch_inventory(),
    );

    let recommendations = recommendations
        .inspect_err(|e| tracing::warn!(store_id, error = %e, "recommendation fetch failed"))
        .ok();
    let inventory = inventory
        .inspect_err(|e| tracing::warn!(error = %e, "inventory fetch failed"))
        .map(|snapshot| snapshot.items)
        .unwrap_or_default();

    SellerBundle {
        recommendations,
        inventory,
    }
}
