//! Score overlay rendering.
//!
//! The overlay is not a saliency map. The raw class scores are treated as a
//! one-pixel-wide column image (one row per class), stretched over the whole
//! input with bilinear interpolation, colored with a jet palette and blended
//! onto the resized upload. The result only varies from top to bottom.

use anyhow::Context;
use base64::{Engine, prelude::BASE64_STANDARD};
use common::span;
use fast_image_resize::{
    FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer,
    images::{Image, ImageRef},
};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

pub const ORIGINAL_WEIGHT: f32 = 0.6;
pub const OVERLAY_WEIGHT: f32 = 0.4;
pub const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Render the overlay for `scores` on top of the RGB8 `pixels` and return it as
/// a PNG data URL.
pub fn render_data_url(
    pixels: &[u8],
    width: u32,
    height: u32,
    scores: &[f32],
) -> anyhow::Result<String> {
    let _s = span!("render_heatmap");

    let intensities = score_intensities(scores);
    let stretched = stretch_column(&intensities, width, height)?;
    let colored: Vec<u8> = stretched.iter().flat_map(|&v| jet(v)).collect();
    let blended = blend(pixels, &colored)?;
    let png = encode_png(blended, width, height)?;

    Ok(to_data_url(&png))
}

/// Scale scores in `[0, 1]` to 8-bit intensities, truncating like an integer
/// cast and saturating outside the range.
pub fn score_intensities(scores: &[f32]) -> Vec<u8> {
    scores.iter().map(|&s| (s * 255.0) as u8).collect()
}

/// Stretch a single column of intensities to `width` x `height`.
pub fn stretch_column(intensities: &[u8], width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    if intensities.is_empty() {
        anyhow::bail!("Cannot build heatmap from an empty score vector");
    }

    let src = ImageRef::new(1, intensities.len() as u32, intensities, PixelType::U8)
        .context("Invalid heatmap source column")?;
    let mut dst = Image::new(width, height, PixelType::U8);

    Resizer::new().resize(
        &src,
        &mut dst,
        &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
    )?;

    Ok(dst.into_vec())
}

/// Jet palette: dark blue for 0, through cyan, yellow and orange, to dark red
/// for 255. Returned in RGB order.
pub fn jet(value: u8) -> [u8; 3] {
    let x = value as f32 / 255.0;
    let channel = |center: f32| {
        let v = (1.5 - (4.0 * x - center).abs()).clamp(0.0, 1.0);
        (v * 255.0).round() as u8
    };
    [channel(3.0), channel(2.0), channel(1.0)]
}

/// Weighted per-channel sum `0.6 * original + 0.4 * overlay`, rounded and
/// saturated to 8 bits.
pub fn blend(original: &[u8], overlay: &[u8]) -> anyhow::Result<Vec<u8>> {
    if original.len() != overlay.len() {
        anyhow::bail!(
            "Heatmap size mismatch: image has {} bytes, overlay has {}",
            original.len(),
            overlay.len()
        );
    }

    Ok(original
        .iter()
        .zip(overlay)
        .map(|(&a, &b)| {
            (a as f32 * ORIGINAL_WEIGHT + b as f32 * OVERLAY_WEIGHT)
                .round()
                .clamp(0.0, 255.0) as u8
        })
        .collect())
}

pub fn encode_png(pixels: Vec<u8>, width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    let img = RgbImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow::anyhow!("Failed to create {}x{} heatmap image", width, height))?;

    let mut png = Cursor::new(Vec::new());
    img.write_to(&mut png, ImageFormat::Png)?;

    Ok(png.into_inner())
}

pub fn to_data_url(png: &[u8]) -> String {
    format!("{}{}", DATA_URL_PREFIX, BASE64_STANDARD.encode(png))
}
