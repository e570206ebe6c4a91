//! Business logic services for the application layer.

pub mod order_code_service;
pub mod outcome;
pub mod provider_pass;
pub mod provider_set;
pub mod tracking_service;

pub use order_code_service::OrderCodeService;
pub use outcome::RowOutcome;
pub use provider_pass::ProviderPass;
pub use provider_set::ProviderSet;
pub use tracking_service::{TrackedOrder, TrackingService};
