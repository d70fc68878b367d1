//! Groups HTTP Server Binary
//!
//! Builds the collaborators from configuration, sets up the HTTP router and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin groups-server
//!
//! # With an explicit configuration file
//! GROUPS_CONFIG=./repository.toml cargo run --bin groups-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `GROUPS_BASE_PATH`: Mount point of the group routes (default: /admin-ng/groups)
//! - `GROUPS_CONFIG`: Path to repository.toml (default: searched in standard locations)
//! - `REPOSITORY_TYPE`: Overrides the repository type from the file
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::EnvFilter;

use admin_groups::db::RepositoryFactory;
use admin_groups::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting groups HTTP server");

    let collaborators = RepositoryFactory::from_env()?;
    let organization = collaborators.security.organization();
    info!(organization = %organization.id, "Collaborators initialized successfully");

    let mut state = AppState::new(collaborators);
    if let Ok(base_path) = env::var("GROUPS_BASE_PATH") {
        state = state.with_base_path(&base_path);
    }
    let base_path = state.base_path.clone();

    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Groups endpoint: http://{}{}/groups.json", addr, base_path);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
