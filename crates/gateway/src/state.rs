use crate::metrics::RequestMetrics;
use inference::ClassificationService;
use std::sync::Arc;

/// Shared, read-only handles passed to every request handler.
pub struct AppState<B> {
    pub service: Arc<ClassificationService<B>>,
    pub metrics: RequestMetrics,
}

impl<B> AppState<B> {
    pub fn new(service: ClassificationService<B>) -> Self {
        Self {
            service: Arc::new(service),
            metrics: RequestMetrics::new("gateway"),
        }
    }
}

// Derived Clone would require `B: Clone`
impl<B> Clone for AppState<B> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            metrics: self.metrics.clone(),
        }
    }
}
