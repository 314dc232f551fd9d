//! HTTP API module for the rate engine.
//!
//! This module exposes period classification, move and shipment date
//! planning, and linehaul rate lookup as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    LinehaulRateRequest, MoveDatesRequest, RateEngineDateRequest, ShipmentDatesRequest,
};
pub use response::{ApiError, ApiErrorResponse, HealthResponse, LinehaulRateResponse};
pub use state::AppState;
