use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Where the gateway believes it is running, as far as backend selection cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeploymentMode {
    /// A hosted platform (e.g. Vercel). Loopback origins must never leak here.
    Hosted,
    /// Not hosted, but built/run in production mode.
    ProductionLike,
    Local,
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentMode::Hosted => write!(f, "hosted"),
            DeploymentMode::ProductionLike => write!(f, "production-like"),
            DeploymentMode::Local => write!(f, "local"),
        }
    }
}

/// Inputs to [`crate::resolve_backend_urls`], resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub mode: DeploymentMode,
    pub configured_url: Option<String>,
    pub production_url: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub backend: BackendConfig,
    pub backend_timeout_secs: u64,
    pub user_agent: String,
    pub model_server_dir: Option<PathBuf>,
    pub dashboard_url: String,
}
