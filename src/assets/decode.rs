use anyhow::Context;

use crate::foundation::error::PlanvizResult;

/// Intrinsic pixel dimensions of a decoded raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageInfo {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decode `bytes` fully to validate them and report the image size.
pub fn decode_image(bytes: &[u8]) -> PlanvizResult<ImageInfo> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(ImageInfo { width, height })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
