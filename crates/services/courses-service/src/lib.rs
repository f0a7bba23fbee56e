//! Courses Service Library
//!
//! HTTP microservice for tenant-scoped courses and enrollments. All rows
//! live in tenant-prefixed tables; isolation rests on resolving the tenant
//! from the caller's email domain. Can be run standalone or embedded in the
//! combined binary.

pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use common::ServiceConfig;
use supabase_rest::{IdentityClient, Supabase, SupabaseConfig, SupabaseDirectory};

use crate::routes::create_router;
use crate::service::CourseCatalog;
use crate::state::AppState;
use crate::store::SupabaseCourseStore;

/// Run the courses service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = ServiceConfig {
        service_name: "courses-service".to_string(),
        host: host.to_string(),
        port,
    };
    let supabase_config = SupabaseConfig::from_env()?;
    run_server_with_config(config, supabase_config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    config: ServiceConfig,
    supabase_config: SupabaseConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Outbound collaborators
    let identity = Arc::new(IdentityClient::new(&supabase_config)?);
    let db = Arc::new(Supabase::new(supabase_config)?);
    let directory = Arc::new(SupabaseDirectory::new(db.clone()));
    let store = Arc::new(SupabaseCourseStore::new(db));

    // Service and app state
    let courses = Arc::new(CourseCatalog::new(store, directory));
    let state = AppState {
        courses,
        identity,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Courses service listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
