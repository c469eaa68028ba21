use anyhow::Result;
use campus_portal_server::backend::{create_router, initialize_backend};
use campus_portal_server::config::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::load()?;

    // Also captures records from the `log` facade used across the backend
    let filter = match EnvFilter::try_new(&config.log_filter) {
        Ok(filter) => filter,
        Err(e) => {
            eprintln!("Invalid log filter '{}': {}; falling back to info", config.log_filter, e);
            EnvFilter::new("info")
        }
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting campus portal backend");
    if config.seed_demo_users {
        warn!("Demo accounts are enabled (admin/teacher1/student1)");
    }

    let app_state = initialize_backend(&config).await?;
    let router = create_router(app_state, &config)?;

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;

    Ok(())
}
