//! HTTP handlers.

pub mod health_handler;
pub mod vacation_handler;

pub use health_handler::health_routes;
pub use vacation_handler::vacation_routes;
