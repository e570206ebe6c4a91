//! Domain layer containing entities and the reconciliation rules.
//!
//! Nothing in this layer performs I/O. Provider access is described by the
//! [`clients::ProviderClient`] trait and implemented in
//! [`crate::infrastructure::providers`].
//!
//! # Architecture
//!
//! - [`entities`] - Rows, provider inputs/records, match results, history events
//! - [`classifier`] - Regex-based provider guess for a raw identifier
//! - [`matcher`] - Cascade matching of rows against an unordered bulk response
//! - [`clients`] - Provider client trait and error taxonomy
//!
//! # Reconciliation Flow
//!
//! 1. Pasted text is split into [`entities::Row`]s (blank lines kept)
//! 2. Each row is classified or assigned to a chosen provider
//! 3. Rows are sent to the provider in bulk
//! 4. [`matcher::match_batch`] maps the response back onto the rows
//! 5. Unresolved rows may be retried once against the other provider

pub mod classifier;
pub mod clients;
pub mod entities;
pub mod matcher;
