pub mod cpu;

use ndarray::{Array, IxDyn};

pub use cpu::CpuPreProcessor;

/// Spatial size (width, height) the classifier was trained on.
pub const INPUT_SIZE: (u32, u32) = (224, 224);

/// Number of color channels in both the tensor and the resized image.
pub const CHANNELS: usize = 3;

/// Result of preprocessing a decoded RGB image.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    /// NHWC tensor of shape `[1, height, width, 3]`, values in `[0, 1]`
    pub tensor: Array<f32, IxDyn>,
    /// The resized 8-bit RGB pixels (HWC) the tensor was built from
    pub resized: Vec<u8>,
    /// Width of `resized`
    pub width: u32,
    /// Height of `resized`
    pub height: u32,
}
