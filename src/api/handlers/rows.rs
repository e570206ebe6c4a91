//! Handlers for the pasted-text endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::rows::{
    OrderCodeRow, OrderCodesRequest, RowsResponse, TrackingRequest, TrackingRow,
};
use crate::domain::entities::{Provider, parse_rows};
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

/// Resolves a pasted column of marketplace order numbers.
///
/// # Endpoint
///
/// `POST /api/order-codes`
///
/// # Request Body
///
/// ```json
/// { "text": "MYSHOP-0001\n\nMYSHOP-0002", "primary": "merchize" }
/// ```
///
/// Every line is looked up at `primary` (default Merchize); lines it cannot
/// resolve are retried once at the other provider. One row is returned per
/// line, blank lines included, so the output lines up with the sheet.
///
/// # Response
///
/// ```json
/// {
///   "total": 3,
///   "non_empty": 2,
///   "resolved": 1,
///   "rows": [
///     { "index": 0, "input": "MYSHOP-0001", "success": true, "provider": "merchize", "code": "RK-1", "status": "processing" },
///     { "index": 1, "input": "", "success": false, "error": "no input" },
///     { "index": 2, "input": "MYSHOP-0002", "success": false, "provider": "dreamship", "error": "no corresponding order found" }
///   ]
/// }
/// ```
pub async fn order_codes_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<OrderCodesRequest>,
) -> Result<Json<RowsResponse<OrderCodeRow>>, AppError> {
    payload.validate()?;

    let primary = payload.primary.unwrap_or(Provider::Merchize);
    let outcomes = state
        .order_code_service
        .reconcile(parse_rows(&payload.text), primary)
        .await;

    Ok(Json(RowsResponse::new(outcomes, OrderCodeRow::from)))
}

/// Tracks a pasted column of order codes.
///
/// # Endpoint
///
/// `POST /api/tracking`
///
/// With `platform: "auto"` (default) each line is routed to the provider its
/// format belongs to.
pub async fn tracking_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<TrackingRequest>,
) -> Result<Json<RowsResponse<TrackingRow>>, AppError> {
    payload.validate()?;

    let outcomes = state
        .tracking_service
        .track_rows(parse_rows(&payload.text), payload.platform)
        .await;

    Ok(Json(RowsResponse::new(outcomes, TrackingRow::from)))
}
