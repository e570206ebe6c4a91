//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::domain::entities::Provider;
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Both provider clients are configured
/// - **503 Service Unavailable**: A provider client is missing
///
/// No upstream call is made.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "merchize": { "status": "ok", "message": "Client configured" },
///     "dreamship": { "status": "ok", "message": "Client configured" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let merchize = check_provider(&state, Provider::Merchize);
    let dreamship = check_provider(&state, Provider::Dreamship);

    let all_healthy = merchize.is_ok() && dreamship.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            merchize,
            dreamship,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_provider(state: &AppState, provider: Provider) -> CheckStatus {
    if state.is_configured(provider) {
        CheckStatus {
            status: "ok".to_string(),
            message: Some("Client configured".to_string()),
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some(format!("{provider} client is not configured")),
        }
    }
}
