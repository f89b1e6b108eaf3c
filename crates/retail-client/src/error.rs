use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`crate::BackendClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The attempt was cancelled after exceeding its time budget.
    #[error("request to {url} timed out after {}ms", .timeout.as_millis())]
    Timeout { url: String, timeout: Duration },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid backend URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Origin resolution produced nothing to call.
    #[error("no backend origin configured")]
    NoOrigins,

    #[error("all {attempts} backend origin(s) failed; last error: {last}")]
    AllOriginsFailed {
        attempts: usize,
        #[source]
        last: Box<ClientError>,
    },
}
