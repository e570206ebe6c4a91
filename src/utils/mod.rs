//! Utility functions shared by the domain, infrastructure and API layers.
//!
//! - [`code_normalizer`] - Order code normalization (fulfillment suffixes, blanks)
//! - [`log_sanitizer`] - Truncation and masking for log output
//! - [`time_format`] - Upstream timestamp parsing and sheet formatting

pub mod code_normalizer;
pub mod log_sanitizer;
pub mod time_format;
