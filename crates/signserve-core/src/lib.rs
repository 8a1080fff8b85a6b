//! SignServe Core
//!
//! Shared types and error handling for the SignServe inference service.
//!
//! This crate provides:
//! - The error taxonomy (load, validation, inference) used across the
//!   bundle loader, the prediction pipeline, and the HTTP layer
//! - Response-domain types for ranked predictions

pub mod error;
pub mod types;

pub use error::{Error, Result, ValidationError};
pub use types::{Prediction, ScoredLabel};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result, ValidationError};
    pub use crate::types::{Prediction, ScoredLabel};
}
