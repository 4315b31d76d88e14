//! HTTP request handlers for the Hotel Pricing Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{calculate_price, calculate_supplement_price};
use crate::models::PricingCriteria;

use super::request::{PricingRequest, SupplementPriceRequest};
use super::response::{ApiError, ApiErrorResponse, PriceQuote, SupplementPriceResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/pricing/calculate", post(calculate_handler))
        .route("/supplements/price", post(supplement_price_handler))
        .with_state(state)
}

/// Handler for POST /pricing/calculate endpoint.
///
/// Accepts pricing criteria and returns the priced stay wrapped in a quote.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Response {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing pricing request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let criteria: PricingCriteria = request.into();

    let start_time = Instant::now();
    match calculate_price(&criteria, state.catalog().catalog()) {
        Ok(pricing) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                hotel_id = %pricing.hotel_id,
                market_id = %pricing.market_id,
                nights = pricing.total_nights,
                total_amount = %pricing.total_amount,
                duration_us,
                "Pricing completed successfully"
            );
            let quote = PriceQuote {
                quote_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                duration_us,
                pricing,
            };
            json_response(StatusCode::OK, quote)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Pricing failed"
            );
            error_response(err.into())
        }
    }
}

/// Handler for POST /supplements/price endpoint.
///
/// Prices one supplement on its own, without any discount.
async fn supplement_price_handler(
    State(state): State<AppState>,
    payload: Result<Json<SupplementPriceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing supplement price request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let supplement = match state.catalog().get_supplement(&request.supplement_id) {
        Ok(supplement) => supplement,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                supplement_id = %request.supplement_id,
                "Supplement not found"
            );
            return error_response(err.into());
        }
    };

    let raw_amount = calculate_supplement_price(supplement, request.quantity, request.nights);
    info!(
        correlation_id = %correlation_id,
        supplement_id = %supplement.id,
        raw_amount = %raw_amount,
        "Supplement priced"
    );

    json_response(
        StatusCode::OK,
        SupplementPriceResponse {
            supplement_id: supplement.id.clone(),
            unit: supplement.unit,
            raw_amount,
        },
    )
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, error)
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
