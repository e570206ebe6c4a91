//! # Order Reconciler
//!
//! Reconciles order identifiers pasted from a spreadsheet column against the
//! Merchize and Dreamship fulfillment APIs, returning exactly one result per
//! pasted line so the output pastes straight back into the sheet.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Rows, provider records, the classifier,
//!   the batch matcher and the provider client trait
//! - **Application Layer** ([`application`]) - Fallback orchestration and tracking dispatch
//! - **Infrastructure Layer** ([`infrastructure`]) - Merchize and Dreamship HTTP clients
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Marketplace order number to provider order code, with cross-provider fallback
//! - Tracking number, carrier and latest shipment event per order
//! - Automatic provider detection from the identifier format
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export MERCHIZE_BASE_URL="https://bo-group-2-2.merchize.com/bo-api"
//! export MERCHIZE_ACCESS_TOKEN="..."
//! export DREAMSHIP_ACCESS_TOKEN="..."
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        OrderCodeService, ProviderSet, RowOutcome, TrackedOrder, TrackingService,
    };
    pub use crate::domain::clients::{ProviderClient, ProviderError};
    pub use crate::domain::entities::{Platform, Provider, ProviderOrderInput, Row, parse_rows};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
