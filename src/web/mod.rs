//! Web server module
//!
//! Provides the HTTP API in front of the search pipeline.

mod handlers;
mod limiter;
mod routes;
mod state;

pub use limiter::ClientLimiter;
pub use routes::create_router;
pub use state::AppState;
