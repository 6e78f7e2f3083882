use anyhow::{Context, Result};
use life_tracker::api::routes::create_routes;
use life_tracker::config::{run_migrations, AppConfig, DatabaseConfig};
use life_tracker::telemetry::init_tracing;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

/// Waits for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for SIGINT");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received SIGINT, starting graceful shutdown"),
        () = terminate => info!("received SIGTERM, starting graceful shutdown"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("Invalid application configuration")?;
    init_tracing(&config)?;

    let database = DatabaseConfig::from_env(config.environment)?;
    let pool = database.create_pool().await?;
    run_migrations(&pool).await?;

    let app = create_routes(pool, &config)?;

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(
        %address,
        environment = %config.environment,
        version = %config.version,
        "{} starting", config.api_title
    );
    info!("API docs available at http://{}/docs", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server shut down gracefully");
    Ok(())
}
