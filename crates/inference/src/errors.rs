use thiserror::Error;

/// Failure of a single classification request.
///
/// The `Display` output is the exact message returned to API clients.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("{0}")]
    Decode(#[from] image::ImageError),

    #[error("{0:#}")]
    Preprocess(anyhow::Error),

    #[error("{0:#}")]
    Inference(anyhow::Error),

    #[error("Class index out of range: model returned {actual} scores for {expected} labels")]
    ClassCount { expected: usize, actual: usize },

    #[error("{0:#}")]
    Heatmap(anyhow::Error),

    #[error("Inference worker failed: {0}")]
    Worker(String),
}
