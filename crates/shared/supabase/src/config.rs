//! Data service connection configuration.

use thiserror::Error;

/// Connection parameters for the hosted data service.
///
/// Two credential tiers: the anon key for reads, the service-role key for
/// writes, deletes and directory lookups.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Base URL, e.g. `https://project.supabase.co`
    pub url: String,
    /// Low-privilege key used for read queries
    pub anon_key: String,
    /// Service-level key used for writes and privileged reads
    pub service_role_key: String,
}

/// Fatal configuration errors; services fail fast at startup on these.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

impl SupabaseConfig {
    /// Load from `SUPABASE_URL`, `SUPABASE_ANON_KEY` and
    /// `SUPABASE_SERVICE_ROLE_KEY`. All three are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: require("SUPABASE_URL")?.trim_end_matches('/').to_string(),
            anon_key: require("SUPABASE_ANON_KEY")?,
            service_role_key: require("SUPABASE_SERVICE_ROLE_KEY")?,
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}
