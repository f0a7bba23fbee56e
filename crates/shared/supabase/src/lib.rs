//! Client for the hosted tabular-data service and its auth endpoint.
//!
//! This crate owns every outbound HTTP concern the services share:
//! - the REST row-filter client with its two credential tiers
//! - the identity-verification collaborator (bearer token -> caller)
//! - tenant/user directory lookups and the ordered authorization gate

pub mod client;
pub mod config;
pub mod directory;
pub mod identity;

pub use client::{filter, Supabase, Tier};
pub use config::{ConfigError, SupabaseConfig};
pub use directory::{
    resolve_membership, resolve_tenant, tenant_domain, Membership, SupabaseDirectory,
    TenantDirectory, UserScope,
};
pub use identity::{auth_middleware, CallerIdentity, IdentityClient};
