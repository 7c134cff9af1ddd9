use common::{TelemetryGuard, setup_logging};
use gateway::{AppState, GatewayConfig, server::run_server};
use inference::{ClassificationService, InferenceConfig, ModelHost};

#[cfg(feature = "ort-backend")]
use inference::backend::ort::OrtBackend as Backend;

#[cfg(not(feature = "ort-backend"))]
compile_error!("The 'ort-backend' feature must be enabled to build the gateway binary");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::from_env();

    let _telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(TelemetryGuard::init("gateway", endpoint, config.environment)?),
        None => {
            setup_logging(config.environment);
            None
        }
    };

    tracing::info!(config = ?config, "Loaded configuration");

    let inference_config = InferenceConfig::from_env();
    tracing::info!(config = ?inference_config, "Loaded inference configuration");

    // A failed load leaves the host unavailable; the server still starts
    let host =
        tokio::task::spawn_blocking(move || ModelHost::<Backend>::load(&inference_config)).await?;

    let state = AppState::new(ClassificationService::new(host));
    run_server(config, state).await
}
