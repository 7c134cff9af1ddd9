use crate::{
    config::GatewayConfig,
    error::ApiError,
    metrics::Outcome,
    state::AppState,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    routing::{get, post},
};
use inference::{InferenceBackend, InferenceResult, ModelStatus, ProcessingError};
use serde::Serialize;
use std::time::Instant;
use tower_http::cors::CorsLayer;

/// Multipart field carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

pub fn router<B: InferenceBackend>(config: &GatewayConfig, state: AppState<B>) -> Router {
    Router::new()
        .route("/api/predict", post(predict::<B>))
        .route("/health", get(health::<B>))
        .layer(DefaultBodyLimit::max(config.body_limit_bytes))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn predict<B: InferenceBackend>(
    State(state): State<AppState<B>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<InferenceResult>, ApiError> {
    let start = Instant::now();

    let result = handle_predict(&state, multipart).await;

    let outcome = match &result {
        Ok(_) => Outcome::Success,
        Err(e) if e.status().is_client_error() => Outcome::ClientError,
        Err(_) => Outcome::ServerError,
    };
    state.metrics.record(start.elapsed(), outcome);

    result.map(Json)
}

async fn handle_predict<B: InferenceBackend>(
    state: &AppState<B>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<InferenceResult, ApiError> {
    if !state.service.is_ready() {
        return Err(ApiError::ModelNotLoaded);
    }

    // A body that is not multipart at all carries no image either
    let Ok(multipart) = multipart else {
        return Err(ApiError::MissingImage);
    };

    let image = read_image_field(multipart)
        .await?
        .ok_or(ApiError::MissingImage)?;

    let span = tracing::info_span!("predict_request", bytes = image.len());
    let service = state.service.clone();
    let result = tokio::task::spawn_blocking(move || span.in_scope(|| service.classify(&image)))
        .await
        .map_err(|e| ProcessingError::Worker(e.to_string()))??;

    tracing::info!(
        prediction = result.prediction,
        confidence = result.confidence,
        "Prediction served"
    );

    Ok(result)
}

/// Return the bytes of the first file field named `image`, if any. Other
/// fields are skipped unread.
async fn read_image_field(mut multipart: Multipart) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(IMAGE_FIELD) && field.file_name().is_some() {
            return Ok(Some(field.bytes().await?));
        }
    }
    Ok(None)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
    /// Load error recorded at startup, only present when degraded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

async fn health<B: InferenceBackend>(State(state): State<AppState<B>>) -> Json<HealthResponse> {
    let response = match state.service.host().status() {
        ModelStatus::Ready => HealthResponse {
            status: "ok",
            model_loaded: true,
            reason: None,
        },
        ModelStatus::Unavailable { reason } => HealthResponse {
            status: "degraded",
            model_loaded: false,
            reason: Some(reason),
        },
    };

    Json(response)
}
