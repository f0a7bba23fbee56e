//! HTTP handlers.

pub mod contract_handler;
pub mod health_handler;
pub mod user_handler;

pub use contract_handler::contract_routes;
pub use health_handler::health_routes;
pub use user_handler::user_routes;
