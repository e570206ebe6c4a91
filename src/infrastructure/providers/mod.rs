//! HTTP clients for the fulfillment providers.
//!
//! Both clients share one `reqwest::Client` (connection pool and timeouts)
//! built by [`http::build_http_client`] and authenticate with a bearer token.
//!
//! # Modules
//!
//! - [`merchize`] - Bulk order-detail / tracking endpoints
//! - [`dreamship`] - Per-order endpoints, fanned out for bulk lookups

pub mod dreamship;
pub mod http;
pub mod merchize;

pub use dreamship::{DEFAULT_DREAMSHIP_BASE_URL, DreamshipClient, DreamshipSettings};
pub use http::build_http_client;
pub use merchize::{MerchizeClient, MerchizeSettings};
