//! Access-gated HTTP server.
//!
//! This crate provides the HTTP surface:
//! - `GET /`: informational text
//! - `GET /v1/health`: unauthenticated liveness probe
//! - `GET /code`: the obf command handler's source, gated by an API key
//!   presented in the `x-api-key` header

pub mod auth;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::TraceId;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
