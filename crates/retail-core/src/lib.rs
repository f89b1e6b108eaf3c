pub mod app_config;
pub mod config;
pub mod dashboard;
pub mod data_source;
pub mod origin;
pub mod seller;
pub mod signal;
pub mod types;

use thiserror::Error;

pub use app_config::{AppConfig, BackendConfig, DeploymentMode, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::DashboardStatus;
pub use data_source::{resolve_data_source, resolve_root, DataSource, DataSourceInfo};
pub use origin::{is_unsafe_backend_url, resolve_backend_urls, DEFAULT_PRODUCTION_BACKEND_URL};
pub use seller::{
    MarketingMessage, MessageTag, SelectionTicket, SellerBundle, SellerSession, SellerView,
};
pub use signal::{find_inventory_match, StockSignal};
pub use types::{
    AssociationRule, GrowthStrategy, InventoryItem, InventorySnapshot, RecommendationItem, Store,
    StoreList, StoreRecommendations, StoreSummary, StoreType,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
