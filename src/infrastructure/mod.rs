//! Infrastructure layer for external integrations.
//!
//! This layer implements the provider client trait defined by the domain
//! layer on top of the upstream HTTP APIs.
//!
//! # Modules
//!
//! - [`providers`] - Merchize and Dreamship API clients

pub mod providers;
