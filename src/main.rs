use dotenvy::dotenv;
use gadget_trove::{
    api::{self, AppState},
    config::{self, Secrets},
    core::{category, user},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file, non-fatal since env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Settings from config.toml, then secrets from the environment
    let mut app_config = config::load_default_config()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    app_config.apply_env_overrides()?;
    let secrets = Secrets::from_env()?;

    // 4. Database and schema
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Seed categories and admin accounts
    let seeded = category::seed_categories(&db, &app_config.categories).await?;
    let admins = user::seed_admins(&db, &app_config.admins).await?;
    info!("Seeded {} categories and {} admin accounts", seeded, admins);

    // 6. Serve
    let port = app_config.server.port;
    let state = AppState::new(db.clone(), app_config, secrets);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .inspect_err(|e| error!("Failed to bind port {}: {}", port, e))?;
    info!("Gadget Trove listening on port {}", port);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down");
    db.close().await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }
}
