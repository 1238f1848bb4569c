//! HTTP API module for the End-of-Service engine.
//!
//! This module exposes the settlement calculator over HTTP. Requests are
//! calculated against the shared rule table and nothing is persisted.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::SettlementRequest;
pub use response::{ApiError, SettlementResponse};
pub use state::AppState;
