//! HTTP API module for the Hotel Pricing Engine.
//!
//! This module provides the REST API endpoints for pricing hotel stays
//! and individual supplements against a loaded catalog.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{PricingRequest, SupplementPriceRequest};
pub use response::{ApiError, ApiErrorResponse, PriceQuote, SupplementPriceResponse};
pub use state::AppState;
