use crate::{
    backend::InferenceBackend,
    errors::ProcessingError,
    heatmap,
    host::ModelHost,
    postprocessing::{self, Classification},
};
use common::span;
use image::RgbImage;
use preprocess::CpuPreProcessor;
use serde::Serialize;
use std::collections::BTreeMap;

/// Response payload of a successful classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceResult {
    pub prediction: &'static str,
    pub confidence: f32,
    pub probabilities: BTreeMap<&'static str, f32>,
    pub heatmap_url: String,
}

/// Decode → preprocess → infer → classify → render, for one uploaded image.
///
/// Holds no per-request state, so a single instance is shared by every
/// request handler.
pub struct ClassificationService<B> {
    host: ModelHost<B>,
    preprocessor: CpuPreProcessor,
}

impl<B: InferenceBackend> ClassificationService<B> {
    pub fn new(host: ModelHost<B>) -> Self {
        Self {
            host,
            preprocessor: CpuPreProcessor::default(),
        }
    }

    pub fn host(&self) -> &ModelHost<B> {
        &self.host
    }

    pub fn is_ready(&self) -> bool {
        self.host.is_ready()
    }

    pub fn classify(&self, image_bytes: &[u8]) -> Result<InferenceResult, ProcessingError> {
        let _s = span!("classify_image", bytes = image_bytes.len());

        if !self.host.is_ready() {
            return Err(ProcessingError::ModelNotLoaded);
        }

        let decoded = decode(image_bytes)?;
        let (width, height) = decoded.dimensions();

        tracing::trace!(width, height, "Decoded upload");

        let preprocessed = self
            .preprocessor
            .preprocess(decoded.as_raw(), width, height)
            .map_err(ProcessingError::Preprocess)?;

        let scores = {
            let _infer_span = span!("model_inference");
            self.host.predict(&preprocessed.tensor)?
        };

        let Classification {
            label,
            confidence,
            probabilities,
            ..
        } = postprocessing::classify(&scores)?;

        let heatmap_url = heatmap::render_data_url(
            &preprocessed.resized,
            preprocessed.width,
            preprocessed.height,
            &scores,
        )
        .map_err(ProcessingError::Heatmap)?;

        tracing::debug!(prediction = label, confidence, "Image classified");

        Ok(InferenceResult {
            prediction: label,
            confidence,
            probabilities,
            heatmap_url,
        })
    }
}

/// Decode any supported format and drop alpha/convert grayscale, so the
/// model always sees three channels.
fn decode(image_bytes: &[u8]) -> Result<RgbImage, ProcessingError> {
    let _s = span!("decode");
    Ok(image::load_from_memory(image_bytes)?.to_rgb8())
}
