use crate::{config::GatewayConfig, routes::router, state::AppState};
use anyhow::Context;
use inference::InferenceBackend;
use tokio::net::TcpListener;

pub async fn run_server<B: InferenceBackend>(
    config: GatewayConfig,
    state: AppState<B>,
) -> anyhow::Result<()> {
    let app = router(&config, state);

    let listener = TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;
    tracing::info!("Gateway listening on {}", config.addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("failed to run http server")
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let (Ok(mut interrupt), Ok(mut terminate)) = (
        signal(SignalKind::interrupt()),
        signal(SignalKind::terminate()),
    ) else {
        tracing::warn!("Failed to install signal handlers, graceful shutdown disabled");
        return std::future::pending().await;
    };

    tokio::select! {
        _ = interrupt.recv() => tracing::info!("Received ctrl-c signal, shutting down"),
        _ = terminate.recv() => tracing::info!("Received SIGTERM signal, shutting down"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Received ctrl-c signal, shutting down");
    } else {
        std::future::pending::<()>().await;
    }
}
