use std::{net::SocketAddr, sync::Arc};
use team_roster::{load_or_default, router, AppState, FileStorage, Settings};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let settings = Settings::from_env();
    let storage = Arc::new(FileStorage::open(&settings.data_path));
    let roster = load_or_default(storage.as_ref(), settings.features);
    info!(
        members = roster.members().len(),
        has_limit = settings.features.has_limit,
        chart = ?settings.features.chart,
        "loaded roster from {}",
        settings.data_path.display()
    );

    let app = router(AppState::new(storage, roster));

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutting down"),
        Err(err) => {
            error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    }
}
