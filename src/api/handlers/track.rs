//! Handlers for the per-provider tracking endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::order_code::OrderResultsResponse;
use crate::api::dto::track::{DreamshipTrackRequest, MerchizeTrackRequest, TrackResultItem};
use crate::domain::entities::{Provider, ProviderOrderInput};
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

/// Fetches tracking numbers and the latest shipment event from Merchize.
///
/// # Endpoint
///
/// `POST /api/merchize/track`
///
/// # Request Body
///
/// ```json
/// {
///   "orders": [
///     { "input": "RK-32344-92365", "code": "RK-32344-92365", "external_number": "" }
///   ]
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "results": [
///     {
///       "input": "RK-32344-92365",
///       "success": true,
///       "pkg": { "_id": "...", "name": "RK-32344-92365-F1" },
///       "tracking": "9400111899223344556677",
///       "carrier": "USPS",
///       "time": "07-03",
///       "address": "Memphis, TN",
///       "statusOrder": "In transit"
///     }
///   ]
/// }
/// ```
///
/// A history lookup failure keeps the row successful and sets `error`.
pub async fn merchize_track_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MerchizeTrackRequest>,
) -> Result<Json<OrderResultsResponse<TrackResultItem>>, AppError> {
    payload.validate()?;

    let inputs: Vec<ProviderOrderInput> = payload.orders.iter().map(|o| o.to_input()).collect();
    let echoes = payload.orders.into_iter().map(|o| o.input);

    Ok(Json(track(&state, Provider::Merchize, &inputs, echoes).await))
}

/// Fetches tracking numbers and the latest tracking event from Dreamship.
///
/// # Endpoint
///
/// `POST /api/dreamship/track`
///
/// The raw Dreamship order is returned as `order`.
pub async fn dreamship_track_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DreamshipTrackRequest>,
) -> Result<Json<OrderResultsResponse<TrackResultItem>>, AppError> {
    payload.validate()?;

    let inputs: Vec<ProviderOrderInput> = payload.orders.iter().map(|o| o.to_input()).collect();
    let echoes = payload.orders.into_iter().map(|o| o.input);

    Ok(Json(track(&state, Provider::Dreamship, &inputs, echoes).await))
}

async fn track(
    state: &AppState,
    provider: Provider,
    inputs: &[ProviderOrderInput],
    echoes: impl Iterator<Item = Option<String>>,
) -> OrderResultsResponse<TrackResultItem> {
    if inputs.is_empty() {
        return OrderResultsResponse::empty();
    }

    let pass = state.tracking_service.track(provider, inputs).await;
    let success = pass.is_success();

    OrderResultsResponse {
        success,
        results: echoes
            .zip(pass.rows)
            .map(|(input, result)| TrackResultItem::new(input, result))
            .collect(),
    }
}
