//! HTTP client for the analytics backend.
//!
//! Wraps `reqwest` with an ordered list of candidate origins. Every call walks
//! the list, bounding each attempt with its own timeout, and returns the first
//! successful, well-formed response. Network errors, timeouts, non-2xx statuses
//! and unparseable bodies all count as a failed attempt.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use retail_core::{
    resolve_backend_urls, AppConfig, InventorySnapshot, StoreList, StoreRecommendations, StoreType,
};

use crate::error::ClientError;
use crate::fallback::first_success;

/// Upper bound for a single attempt against one origin.
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(8);

/// Client for the analytics backend's JSON API.
///
/// Use [`BackendClient::from_config`] in the binaries, or
/// [`BackendClient::new`] to point at explicit origins (e.g. wiremock servers).
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    origins: Vec<String>,
    attempt_timeout: Duration,
}

impl BackendClient {
    /// Creates a client for `origins`, tried in the given order.
    ///
    /// Trailing slashes are stripped. An empty list is allowed: every call
    /// then fails with [`ClientError::NoOrigins`].
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if an origin does not parse, or
    /// [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(
        origins: Vec<String>,
        attempt_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        let origins = origins
            .into_iter()
            .map(|origin| {
                let trimmed = origin.trim().trim_end_matches('/').to_string();
                Url::parse(&trimmed).map_err(|e| ClientError::InvalidUrl {
                    url: origin.clone(),
                    reason: e.to_string(),
                })?;
                Ok(trimmed)
            })
            .collect::<Result<Vec<_>, ClientError>>()?;

        let client = Client::builder()
            .connect_timeout(attempt_timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            origins,
            attempt_timeout,
        })
    }

    /// Creates a client for the origins resolved from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        let origins = resolve_backend_urls(&config.backend);
        if origins.is_empty() {
            tracing::warn!(
                mode = %config.backend.mode,
                "no usable backend origin; proxy routes will serve empty defaults"
            );
        } else {
            tracing::info!(origins = ?origins, mode = %config.backend.mode, "backend origins resolved");
        }
        Self::new(
            origins,
            Duration::from_secs(config.backend_timeout_secs),
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    #[must_use]
    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// GETs `segments` with `query` from the first origin that answers with
    /// valid JSON, returned verbatim.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NoOrigins`] if no origin is configured.
    /// - [`ClientError::AllOriginsFailed`] if every origin failed.
    pub async fn get_json(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<Value, ClientError> {
        self.get_typed(segments, query).await
    }

    /// Like [`BackendClient::get_json`], but a body that does not decode into
    /// `T` also counts as a failed attempt.
    ///
    /// # Errors
    ///
    /// - [`ClientError::NoOrigins`] if no origin is configured.
    /// - [`ClientError::AllOriginsFailed`] if every origin failed.
    pub async fn get_typed<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        first_success(&self.origins, |origin| async move {
            let url = build_url(&origin, segments, query)?;
            self.attempt(url).await
        })
        .await
    }

    /// `GET /api/store-list`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_typed`].
    pub async fn fetch_store_list(&self) -> Result<StoreList, ClientError> {
        self.get_typed(&["api", "store-list"], &[]).await
    }

    /// `GET /api/store-recommendations/{store_id}?store_type=`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_typed`].
    pub async fn fetch_store_recommendations(
        &self,
        store_id: &str,
        store_type: StoreType,
    ) -> Result<StoreRecommendations, ClientError> {
        self.get_typed(
            &["api", "store-recommendations", store_id],
            &[("store_type", store_type.as_str())],
        )
        .await
    }

    /// `GET /api/inventory-frozen-money`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_typed`].
    pub async fn fetch_inventory(&self) -> Result<InventorySnapshot, ClientError> {
        self.get_typed(&["api", "inventory-frozen-money"], &[]).await
    }

    /// `GET /api/sales-by-store-quarterly?store_name=&country=`
    ///
    /// Blank `country` values are not forwarded.
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_json`].
    pub async fn fetch_sales_by_store_quarterly(
        &self,
        store_name: &str,
        country: Option<&str>,
    ) -> Result<Value, ClientError> {
        let mut query = vec![("store_name", store_name)];
        if let Some(country) = country.map(str::trim).filter(|c| !c.is_empty()) {
            query.push(("country", country));
        }
        self.get_json(&["api", "sales-by-store-quarterly"], &query)
            .await
    }

    /// `GET /api/apple-data`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_json`].
    pub async fn fetch_apple_data(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "apple-data"], &[]).await
    }

    /// `GET /api/last-updated`
    ///
    /// # Errors
    ///
    /// See [`BackendClient::get_json`].
    pub async fn fetch_last_updated(&self) -> Result<Value, ClientError> {
        self.get_json(&["api", "last-updated"], &[]).await
    }

    /// One bounded attempt: send, require 2xx, decode. Dropping the request
    /// future on timeout cancels it.
    async fn attempt<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        let context = url.to_string();
        let request = async {
            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: context.clone(),
                });
            }
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: context.clone(),
                source: e,
            })
        };

        match tokio::time::timeout(self.attempt_timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(ClientError::Timeout {
                url: context,
                timeout: self.attempt_timeout,
            }),
        }
    }
}

/// Appends percent-encoded path `segments` and `query` pairs to `origin`.
fn build_url(origin: &str, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ClientError> {
    let invalid = |reason: String| ClientError::InvalidUrl {
        url: origin.to_string(),
        reason,
    };

    let mut url = Url::parse(origin).map_err(|e| invalid(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| invalid("origin cannot be a base URL".to_string()))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_appends_segments_and_query() {
        let url = build_url(
            "https://api.example.com",
            &["api", "sales-by-store-quarterly"],
            &[("store_name", "Apple Fifth Avenue"), ("country", "United States")],
        )
        .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/sales-by-store-quarterly?store_name=Apple+Fifth+Avenue&country=United+States"
        );
    }

    #[test]
    fn build_url_keeps_origin_path_prefix() {
        let url = build_url("https://host.example.com/backend", &["api", "store-list"], &[])
            .expect("url");
        assert_eq!(url.as_str(), "https://host.example.com/backend/api/store-list");
    }

    #[test]
    fn build_url_encodes_path_segments() {
        let url = build_url("https://api.example.com", &["api", "store-recommendations", "ST 1/2"], &[])
            .expect("url");
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/store-recommendations/ST%201%2F2"
        );
    }

    #[test]
    fn new_strips_trailing_slash_and_rejects_garbage() {
        let client = BackendClient::new(
            vec!["https://api.example.com/".to_string()],
            DEFAULT_ATTEMPT_TIMEOUT,
            "test-agent",
        )
        .expect("client");
        assert_eq!(client.origins(), ["https://api.example.com".to_string()]);

        let err = BackendClient::new(vec!["not a url".to_string()], DEFAULT_ATTEMPT_TIMEOUT, "ua")
            .expect_err("invalid origin");
        assert!(matches!(err, ClientError::InvalidUrl { .. }));
    }
}
