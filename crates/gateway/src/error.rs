use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use inference::ProcessingError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("No image provided")]
    MissingImage,

    #[error("{0}")]
    Upload(#[from] MultipartError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ModelNotLoaded => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MissingImage => StatusCode::BAD_REQUEST,
            ApiError::Upload(e) => e.status(),
            ApiError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %error, "Prediction failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %error, "Prediction rejected");
        }

        (status, Json(ErrorBody { error })).into_response()
    }
}
