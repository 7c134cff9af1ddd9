use crate::{CHANNELS, INPUT_SIZE, PreprocessResult};
use common::{span, span_debug};
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use ndarray::{Array, IxDyn};

/// Stretches an RGB image to the model input size and scales it to `[0, 1]`.
///
/// The aspect ratio is not preserved: the image is resized, never cropped or
/// letterboxed, and no mean/std normalization is applied.
#[derive(Debug, Clone)]
pub struct CpuPreProcessor {
    pub input_size: (u32, u32),
}

impl CpuPreProcessor {
    pub fn new(input_size: (u32, u32)) -> Self {
        Self { input_size }
    }

    /// Preprocess tightly packed RGB8 pixels (HWC order).
    pub fn preprocess(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
    ) -> anyhow::Result<PreprocessResult> {
        let _s = span!("preprocess", width, height);

        if width == 0 || height == 0 {
            anyhow::bail!("Cannot preprocess an empty {}x{} image", width, height);
        }

        let expected_size = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected_size {
            anyhow::bail!(
                "Buffer size mismatch: expected {}, got {} bytes",
                expected_size,
                pixels.len()
            );
        }

        let resized = self.resize(pixels, width, height)?;
        let (out_width, out_height) = self.input_size;
        let tensor = Self::normalize(&resized, out_width, out_height)?;

        Ok(PreprocessResult {
            tensor,
            resized,
            width: out_width,
            height: out_height,
        })
    }

    fn resize(&self, pixels: &[u8], width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
        let _s = span_debug!("resize");

        let src = ImageRef::new(width, height, pixels, PixelType::U8x3)?;
        let mut dst = Image::new(self.input_size.0, self.input_size.1, PixelType::U8x3);

        Resizer::new().resize(
            &src,
            &mut dst,
            &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
        )?;

        Ok(dst.into_vec())
    }

    fn normalize(pixels: &[u8], width: u32, height: u32) -> anyhow::Result<Array<f32, IxDyn>> {
        let _s = span_debug!("normalize");

        let data: Vec<f32> = pixels.iter().map(|&v| v as f32 / 255.0).collect();

        Ok(Array::from_shape_vec(
            IxDyn(&[1, height as usize, width as usize, CHANNELS]),
            data,
        )?)
    }
}

impl Default for CpuPreProcessor {
    fn default() -> Self {
        Self::new(INPUT_SIZE)
    }
}
