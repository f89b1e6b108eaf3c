//! Backend origin resolution for the proxy routes.

use crate::app_config::{BackendConfig, DeploymentMode};

/// Production backend used when nothing safer is configured.
pub const DEFAULT_PRODUCTION_BACKEND_URL: &str = "https://apple-retail-api.hf.space";

const LOOPBACK_MARKERS: [&str; 3] = ["localhost", "127.0.0.1", "::1"];

/// Returns `true` when `url` must not be used as a backend origin: blank,
/// not `http(s)`, unparseable, or pointing at a loopback address.
#[must_use]
pub fn is_unsafe_backend_url(url: &str) -> bool {
    let url = url.trim();
    if url.is_empty() {
        return true;
    }

    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return true;
    }
    if LOOPBACK_MARKERS.iter().any(|m| lower.contains(m)) {
        return true;
    }

    reqwest::Url::parse(url).is_err()
}

/// Resolves the ordered list of backend origins to try (zero or one entry).
///
/// Hosted deployments always get the production URL. Elsewhere a safe
/// configured URL wins; an unsafe one falls back to production only when the
/// build is production-like. Trailing slashes are stripped.
#[must_use]
pub fn resolve_backend_urls(config: &BackendConfig) -> Vec<String> {
    let chosen = match config.mode {
        DeploymentMode::Hosted => Some(config.production_url.as_str()),
        mode => match config.configured_url.as_deref() {
            Some(url) if !is_unsafe_backend_url(url) => Some(url),
            _ if mode == DeploymentMode::ProductionLike => {
                tracing::warn!(
                    configured = ?config.configured_url,
                    "configured backend URL is unsafe; using production fallback"
                );
                Some(config.production_url.as_str())
            }
            _ => None,
        },
    };

    chosen
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .into_iter()
        .collect()
}
