//! Connection-status dashboard: one fetch per mount, no retries.

use serde::Serialize;
use serde_json::Value;

/// Shown when the payload carries no usable `last_updated`.
pub const LAST_UPDATED_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardStatus {
    Connecting,
    Connected { last_updated: String },
    /// Quiet fallback state after a failed fetch, with an inline message.
    Waiting { error: String },
}

impl DashboardStatus {
    /// Settles the status from the single fetch outcome.
    pub fn from_fetch<E: std::fmt::Display>(result: Result<Value, E>) -> Self {
        match result {
            Ok(payload) => DashboardStatus::Connected {
                last_updated: extract_last_updated(&payload),
            },
            Err(e) => {
                tracing::warn!(error = %e, "dashboard data fetch failed");
                DashboardStatus::Waiting {
                    error: format!("Could not load dashboard data: {e}"),
                }
            }
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            DashboardStatus::Connecting => "connecting",
            DashboardStatus::Connected { .. } => "connected",
            DashboardStatus::Waiting { .. } => "waiting",
        }
    }
}

fn extract_last_updated(payload: &Value) -> String {
    payload
        .get("last_updated")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(LAST_UPDATED_PLACEHOLDER)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_extracts_last_updated() {
        let status = DashboardStatus::from_fetch::<String>(Ok(json!({
            "last_updated": "2025-02-19",
            "total_sales": 1200
        })));
        assert_eq!(
            status,
            DashboardStatus::Connected {
                last_updated: "2025-02-19".to_string()
            }
        );
        assert_eq!(status.label(), "connected");
    }

    #[test]
    fn missing_last_updated_uses_placeholder() {
        let status = DashboardStatus::from_fetch::<String>(Ok(json!({ "last_updated": 42 })));
        assert_eq!(
            status,
            DashboardStatus::Connected {
                last_updated: LAST_UPDATED_PLACEHOLDER.to_string()
            }
        );
    }

    #[test]
    fn failure_becomes_waiting_with_message() {
        let status = DashboardStatus::from_fetch(Err::<Value, _>("HTTP 502"));
        assert_eq!(status.label(), "waiting");
        match status {
            DashboardStatus::Waiting { error } => assert!(error.contains("HTTP 502")),
            other => panic!("expected waiting, got {other:?}"),
        }
    }

    #[test]
    fn status_serializes_with_state_tag() {
        let json = serde_json::to_value(DashboardStatus::Connecting).expect("serialize");
        assert_eq!(json, json!({ "state": "connecting" }));
    }
}
