//! Common utilities shared across all microservices.
//!
//! This crate provides:
//! - Unified error handling with automatic HTTP response conversion
//! - Shared configuration structures
//! - The validated-JSON request extractor

pub mod config;
pub mod error;
pub mod extract;

pub use config::ServiceConfig;
pub use error::{AppError, AppResult, OptionExt};
pub use extract::ValidatedJson;
