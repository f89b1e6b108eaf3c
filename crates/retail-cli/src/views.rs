//! One-shot read views: connection status and the store list.

use retail_client::BackendClient;
use retail_core::{DashboardStatus, Store};

/// Fetch the analytics payload once and report whether the backend answered.
///
/// An upstream failure is rendered as the waiting state, not returned.
pub(crate) async fn run_status(client: &BackendClient) {
    println!("status: {}", DashboardStatus::Connecting.label());

    let status = DashboardStatus::from_fetch(client.fetch_apple_data().await);
    match &status {
        DashboardStatus::Connected { last_updated } => {
            println!("status: {}", status.label());
            println!("last updated: {last_updated}");
        }
        DashboardStatus::Waiting { error } => {
            println!("status: {}", status.label());
            println!("{error}");
        }
        DashboardStatus::Connecting => {}
    }
}

/// Print the store list as a table, or a one-line notice when the backend
/// cannot be reached.
pub(crate) async fn run_stores(client: &BackendClient) {
    match client.fetch_store_list().await {
        Ok(list) => print!("{}", render_store_table(&list.stores)),
        Err(e) => {
            tracing::warn!(error = %e, "store list fetch failed");
            println!("{}", stores_unavailable(&e));
        }
    }
}

fn stores_unavailable(error: &dyn std::fmt::Display) -> String {
    format!("stores unavailable: {error}")
}

fn render_store_table(stores: &[Store]) -> String {
    if stores.is_empty() {
        return "no stores found\n".to_string();
    }
    let mut out = format!("{}\n", store_header());
    for store in stores {
        out.push_str(&store_row(store));
        out.push('\n');
    }
    out
}

fn store_header() -> String {
    format!("{:<12}{:<32}COUNTRY", "STORE ID", "NAME")
}

fn store_row(store: &Store) -> String {
    format!(
        "{:<12}{:<32}{}",
        store.store_id,
        store.display_name(),
        store.country.as_deref().unwrap_or("-")
    )
}
