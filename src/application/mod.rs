//! Application layer services implementing the reconciliation workflows.
//!
//! Services consume the [`ProviderClient`](crate::domain::clients::ProviderClient)
//! trait and provide a clean API for HTTP handlers and the CLI.
//!
//! # Available Services
//!
//! - [`services::OrderCodeService`] - Order-code lookups with cross-provider fallback
//! - [`services::TrackingService`] - Tracking lookups with shipment-history enrichment

pub mod services;
