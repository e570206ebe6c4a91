//! API route configuration.
//!
//! Every API route is rate limited per client by
//! [`crate::api::middleware::rate_limit`].

use crate::api::handlers::{
    dreamship_order_code_handler, dreamship_track_handler, merchize_order_code_handler,
    merchize_track_handler, order_codes_handler, tracking_handler,
};
use crate::state::AppState;
use axum::{Router, routing::post};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /merchize/order-code`  - External numbers to Merchize order codes
/// - `POST /dreamship/order-code` - Reference ids to Dreamship order ids
/// - `POST /merchize/track`       - Merchize tracking and latest shipment event
/// - `POST /dreamship/track`      - Dreamship tracking and latest tracking event
/// - `POST /order-codes`          - Pasted lines, primary provider with fallback
/// - `POST /tracking`             - Pasted lines, routed per line
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/merchize/order-code", post(merchize_order_code_handler))
        .route("/dreamship/order-code", post(dreamship_order_code_handler))
        .route("/merchize/track", post(merchize_track_handler))
        .route("/dreamship/track", post(dreamship_track_handler))
        .route("/order-codes", post(order_codes_handler))
        .route("/tracking", post(tracking_handler))
}
