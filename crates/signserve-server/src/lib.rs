//! SignServe Server
//!
//! Stateless HTTP facade over the prediction pipeline. The model bundle is
//! loaded once before the listener binds and published into an immutable
//! [`state::AppState`]; every request then reads it lock-free.

pub mod config;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
