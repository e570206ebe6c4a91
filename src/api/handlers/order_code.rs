//! Handlers for the per-provider order-code endpoints.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::order_code::{
    DreamshipOrderCodeRequest, MerchizeOrderCodeRequest, OrderCodeResultItem,
    OrderResultsResponse,
};
use crate::domain::entities::{Provider, ProviderOrderInput};
use crate::error::{ApiJson, AppError};
use crate::state::AppState;

/// Resolves Merchize order codes from marketplace external numbers.
///
/// # Endpoint
///
/// `POST /api/merchize/order-code`
///
/// # Request Body
///
/// ```json
/// {
///   "orders": [
///     { "input": "MYSHOP-0001", "external_number": "MYSHOP-0001", "identifier": "" }
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
///     { "input": "MYSHOP-0001", "success": true, "code": "RK-32344-92365", "status": "processing" }
///   ]
/// }
/// ```
///
/// Results are returned in input order, one per order. When the Merchize
/// call fails the response is still `200 OK`, with `success: false` and the
/// provider message on every row.
///
/// # Errors
///
/// Returns 400 Bad Request when more than 1000 orders are sent and 500 when
/// the body is not valid JSON.
pub async fn merchize_order_code_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<MerchizeOrderCodeRequest>,
) -> Result<Json<OrderResultsResponse<OrderCodeResultItem>>, AppError> {
    payload.validate()?;

    let inputs: Vec<ProviderOrderInput> = payload.orders.iter().map(|o| o.to_input()).collect();
    let echoes = payload.orders.into_iter().map(|o| o.input);

    Ok(Json(lookup(&state, Provider::Merchize, &inputs, echoes).await))
}

/// Resolves Dreamship order ids from marketplace reference ids.
///
/// # Endpoint
///
/// `POST /api/dreamship/order-code`
///
/// Same envelope as [`merchize_order_code_handler`]; `code` is the numeric
/// Dreamship order id.
pub async fn dreamship_order_code_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<DreamshipOrderCodeRequest>,
) -> Result<Json<OrderResultsResponse<OrderCodeResultItem>>, AppError> {
    payload.validate()?;

    let inputs: Vec<ProviderOrderInput> = payload.orders.iter().map(|o| o.to_input()).collect();
    let echoes = payload.orders.into_iter().map(|o| o.input);

    Ok(Json(lookup(&state, Provider::Dreamship, &inputs, echoes).await))
}

async fn lookup(
    state: &AppState,
    provider: Provider,
    inputs: &[ProviderOrderInput],
    echoes: impl Iterator<Item = Option<String>>,
) -> OrderResultsResponse<OrderCodeResultItem> {
    if inputs.is_empty() {
        return OrderResultsResponse::empty();
    }

    let pass = state.order_code_service.lookup(provider, inputs).await;
    let success = pass.is_success();

    OrderResultsResponse {
        success,
        results: echoes
            .zip(pass.rows)
            .map(|(input, result)| OrderCodeResultItem::new(input, result))
            .collect(),
    }
}
