//! # API Shared
//!
//! Shared definitions for the care REST APIs.
//!
//! Contains:
//! - Request and response bodies (`types` module) with OpenAPI schemas
//! - `ApiError`, the mapping from core errors to HTTP responses
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` for both the patient and the prediction service.

pub mod error;
pub mod health;
pub mod types;

pub use error::ApiError;
pub use health::HealthService;
pub use types::*;
