//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::ServiceConfig;

#[derive(Parser)]
#[command(name = "hr-platform")]
#[command(about = "Combined microservices binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        /// Bind address, overriding the per-service env configuration
        #[arg(long)]
        host: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host } => {
            let mut vacations = ServiceConfig::from_env("vacations-service", "VACATIONS", 5001);
            let mut courses = ServiceConfig::from_env("courses-service", "COURSES", 5002);
            let mut contracts = ServiceConfig::from_env("contracts-service", "CONTRACTS", 5003);
            if let Some(host) = host {
                vacations.host = host.clone();
                courses.host = host.clone();
                contracts.host = host;
            }

            info!("Starting combined services in development mode");
            info!("  Vacations: http://{}:{}", vacations.host, vacations.port);
            info!("  Courses:   http://{}:{}", courses.host, courses.port);
            info!("  Contracts: http://{}:{}", contracts.host, contracts.port);

            let vacations_handle = tokio::spawn(async move {
                if let Err(e) =
                    vacations_service_lib::run_embedded(&vacations.host, vacations.port).await
                {
                    error!("Vacations service failed: {}", e);
                }
            });

            let courses_handle = tokio::spawn(async move {
                if let Err(e) = courses_service_lib::run_embedded(&courses.host, courses.port).await
                {
                    error!("Courses service failed: {}", e);
                }
            });

            let contracts_handle = tokio::spawn(async move {
                if let Err(e) =
                    contracts_service_lib::run_embedded(&contracts.host, contracts.port).await
                {
                    error!("Contracts service failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = vacations_handle => {
                    error!("Vacations service exited unexpectedly");
                }
                _ = courses_handle => {
                    error!("Courses service exited unexpectedly");
                }
                _ = contracts_handle => {
                    error!("Contracts service exited unexpectedly");
                }
            }
        }
    }

    Ok(())
}
