//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod order_code;
pub mod rows;
pub mod track;

pub use health::health_handler;
pub use order_code::{dreamship_order_code_handler, merchize_order_code_handler};
pub use rows::{order_codes_handler, tracking_handler};
pub use track::{dreamship_track_handler, merchize_track_handler};
