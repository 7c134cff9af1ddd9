pub mod backend;
pub mod config;
pub mod errors;
pub mod heatmap;
pub mod host;
pub mod postprocessing;
pub mod service;

// Re-export commonly used types for convenience
pub use backend::{InferenceBackend, InferenceOutput};
pub use config::{ExecutionProvider, InferenceConfig};
pub use errors::ProcessingError;
pub use host::{ModelHost, ModelStatus};
pub use postprocessing::{CLASS_LABELS, Classification};
pub use service::{ClassificationService, InferenceResult};
