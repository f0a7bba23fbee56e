//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration shared by all services.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServiceConfig {
    /// Build from environment with a per-service env prefix, e.g.
    /// `VACATIONS_HOST` / `VACATIONS_PORT`.
    pub fn from_env(service_name: &str, prefix: &str, default_port: u16) -> Self {
        Self {
            service_name: service_name.to_string(),
            host: std::env::var(format!("{prefix}_HOST"))
                .unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var(format!("{prefix}_PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
        }
    }
}
