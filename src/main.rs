use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use web_scaffold::infrastructure::logger::Logger;
use web_scaffold::{create_app, AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Logger::init("info");

    let config = AppConfig::from_env().context("failed to load configuration")?;
    info!(?config, "Starting web server");

    let bind_address = config.bind_address();
    let state = AppState::new(config).context("failed to load page templates")?;
    let app = create_app(state);

    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("failed to bind {bind_address}"))?;
    let addr = listener.local_addr()?;

    info!("Server running on http://{}", addr);
    info!("   GET /                  - Landing page");
    info!("   GET /db-test           - Database connection check");
    info!("   GET /api/health/db     - Database connection check (JSON)");
    info!("   GET /api/products      - List products (?limit=20&offset=0)");
    info!("   GET /api/products/:id  - Get product by id");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

// `docker compose down` sends SIGTERM, a terminal sends SIGINT.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}
