use crate::config::InferenceConfig;
use ndarray::{Array, ArrayD, IxDyn};

#[cfg(feature = "ort-backend")]
pub mod ort;

pub trait InferenceBackend: Send + 'static {
    fn load_model(config: &InferenceConfig) -> anyhow::Result<Self>
    where
        Self: Sized;

    /// Run inference on an NHWC `[1, 224, 224, 3]` tensor
    fn infer(&mut self, input: &Array<f32, IxDyn>) -> anyhow::Result<InferenceOutput>;
}

pub struct InferenceOutput {
    pub scores: ArrayD<f32>, // [1, num_classes] class probabilities
}

impl InferenceOutput {
    /// Scores of the single batch entry, in class-index order.
    pub fn into_scores(self) -> Vec<f32> {
        self.scores.into_iter().collect()
    }
}
