use crate::{
    backend::InferenceBackend,
    config::InferenceConfig,
    errors::ProcessingError,
    postprocessing::CLASS_LABELS,
};
use ndarray::{Array, IxDyn};
use preprocess::{CHANNELS, INPUT_SIZE};
use std::sync::{Mutex, PoisonError};

/// Externally visible readiness of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    Ready,
    Unavailable { reason: String },
}

enum HostState<B> {
    Ready(Mutex<B>),
    Unavailable(String),
}

/// Owns the single model instance for the lifetime of the process.
///
/// Loading happens once. A host that failed to load stays unavailable and
/// every prediction fails with [`ProcessingError::ModelNotLoaded`]; there is
/// no reload.
pub struct ModelHost<B> {
    state: HostState<B>,
}

impl<B: InferenceBackend> ModelHost<B> {
    /// Load the model and validate it with one warm-up inference.
    ///
    /// Never fails: load errors are recorded and logged instead.
    pub fn load(config: &InferenceConfig) -> Self {
        tracing::info!(model_path = %config.model_path, "Loading model");

        let loaded = B::load_model(config).and_then(|mut backend| {
            Self::warm_up(&mut backend)?;
            Ok(backend)
        });

        match loaded {
            Ok(backend) => {
                tracing::info!(model_path = %config.model_path, "Model ready");
                Self::ready(backend)
            }
            Err(e) => {
                let reason = format!("{:#}", e);
                tracing::error!(
                    model_path = %config.model_path,
                    error = %reason,
                    "Model unavailable, inference requests will fail"
                );
                Self::unavailable(reason)
            }
        }
    }

    pub fn ready(backend: B) -> Self {
        Self {
            state: HostState::Ready(Mutex::new(backend)),
        }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self {
            state: HostState::Unavailable(reason.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, HostState::Ready(_))
    }

    pub fn status(&self) -> ModelStatus {
        match &self.state {
            HostState::Ready(_) => ModelStatus::Ready,
            HostState::Unavailable(reason) => ModelStatus::Unavailable {
                reason: reason.clone(),
            },
        }
    }

    /// Run the model on an NHWC `[1, 224, 224, 3]` tensor and return the
    /// per-class scores in index order.
    pub fn predict(&self, input: &Array<f32, IxDyn>) -> Result<Vec<f32>, ProcessingError> {
        let HostState::Ready(backend) = &self.state else {
            return Err(ProcessingError::ModelNotLoaded);
        };

        let expected = expected_input_shape();
        if input.shape() != expected {
            return Err(ProcessingError::Inference(anyhow::anyhow!(
                "Input shape mismatch: expected {:?}, got {:?}",
                expected,
                input.shape()
            )));
        }

        // A panic inside `infer` only fails its own request; the session
        // carries no state between runs.
        let mut backend = backend.lock().unwrap_or_else(PoisonError::into_inner);

        let output = backend.infer(input).map_err(ProcessingError::Inference)?;
        Ok(output.into_scores())
    }

    fn warm_up(backend: &mut B) -> anyhow::Result<()> {
        let input = Array::zeros(IxDyn(&expected_input_shape()));
        let scores = backend.infer(&input)?.into_scores();

        if scores.len() != CLASS_LABELS.len() {
            anyhow::bail!(
                "Incompatible model: produces {} class scores, expected {}",
                scores.len(),
                CLASS_LABELS.len()
            );
        }

        Ok(())
    }
}

fn expected_input_shape() -> [usize; 4] {
    [1, INPUT_SIZE.1 as usize, INPUT_SIZE.0 as usize, CHANNELS]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_utils::{
        FiveClassBackend, MissingModelBackend, PanicOnceBackend, StaticBackend,
    };
    use std::panic::{AssertUnwindSafe, catch_unwind};

    fn input() -> Array<f32, IxDyn> {
        Array::zeros(IxDyn(&[1, 224, 224, 3]))
    }

    #[test]
    fn test_load_success_is_ready() {
        let host = ModelHost::<StaticBackend>::load(&InferenceConfig::test_default());

        assert!(host.is_ready());
        assert_eq!(host.status(), ModelStatus::Ready);
    }

    #[test]
    fn test_load_failure_is_unavailable_not_fatal() {
        let host = ModelHost::<MissingModelBackend>::load(&InferenceConfig::test_default());

        assert!(!host.is_ready());
        match host.status() {
            ModelStatus::Unavailable { reason } => {
                assert!(
                    reason.contains("/models/model.onnx"),
                    "Reason should record the load error (got {})",
                    reason
                );
            }
            ModelStatus::Ready => panic!("Expected Unavailable"),
        }
    }

    #[test]
    fn test_incompatible_model_is_unavailable() {
        let host = ModelHost::<FiveClassBackend>::load(&InferenceConfig::test_default());

        assert!(!host.is_ready(), "Warm-up should reject a 5-class model");
    }

    #[test]
    fn test_predict_when_unavailable_fails_every_time() {
        let host = ModelHost::<StaticBackend>::unavailable("corrupt file");

        for _ in 0..3 {
            let err = host.predict(&input()).unwrap_err();
            assert!(matches!(err, ProcessingError::ModelNotLoaded));
        }
    }

    #[test]
    fn test_predict_returns_scores_in_order() {
        let host = ModelHost::ready(StaticBackend::new(&[0.1, 0.3, 0.6]));

        let scores = host.predict(&input()).unwrap();

        assert_eq!(scores, vec![0.1, 0.3, 0.6]);
    }

    #[test]
    fn test_predict_rejects_wrong_shape() {
        let host = ModelHost::ready(StaticBackend::new(&[0.1, 0.3, 0.6]));

        let nchw = Array::zeros(IxDyn(&[1, 3, 224, 224]));
        let err = host.predict(&nchw).unwrap_err();

        assert!(
            err.to_string().contains("shape mismatch"),
            "Unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_panic_during_inference_does_not_affect_later_requests() {
        let host = ModelHost::ready(PanicOnceBackend::new(&[0.1, 0.2, 0.7]));

        let first = catch_unwind(AssertUnwindSafe(|| host.predict(&input())));
        assert!(first.is_err(), "First inference should panic");

        assert!(host.is_ready());
        let scores = host.predict(&input()).expect("Later requests should still be served");
        assert_eq!(scores, vec![0.1, 0.2, 0.7]);
    }
}
