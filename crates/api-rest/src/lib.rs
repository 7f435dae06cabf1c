//! # API REST
//!
//! REST API implementation for the care services.
//!
//! Handles:
//! - HTTP endpoints with axum for the patient store (`patients`) and the premium predictor (`predict`)
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS)
//!
//! Uses `api-shared` for request/response bodies and error mapping.

#![warn(rust_2018_idioms)]

pub mod patients;
pub mod predict;
