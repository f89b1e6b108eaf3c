pub mod client;
pub mod error;
mod fallback;
pub mod seller;

pub use client::{BackendClient, DEFAULT_ATTEMPT_TIMEOUT};
pub use error::ClientError;
pub use seller::fetch_seller_bundle;
