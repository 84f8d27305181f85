use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::surface::FrameHandle;

/// Decoded frame in premultiplied RGBA8 form.
///
/// Pixel storage is shared, so clones are cheap and a frame can sit in the slot table and in a
/// renderer at the same time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameImage {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl FrameImage {
    /// Wrap already premultiplied pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> ScrollreelResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| ScrollreelError::validation("frame dimensions overflow"))?;
        if width == 0 || height == 0 || rgba8_premul.len() != expected {
            return Err(ScrollreelError::validation(format!(
                "frame buffer of {} bytes does not match {width}x{height}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Single-colour frame from straight (non-premultiplied) RGBA.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> ScrollreelResult<Self> {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        let len = (width as usize) * (height as usize);
        Self::from_premul(width, height, px.repeat(len))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let p = &self.rgba8_premul[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }
}

impl FrameHandle for FrameImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_frame_image(bytes: &[u8]) -> ScrollreelResult<FrameImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| ScrollreelError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(ScrollreelError::decode("decoded image has no pixels"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(FrameImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Read and decode a frame file.
pub fn load_frame_file(path: &Path) -> ScrollreelResult<FrameImage> {
    let bytes = std::fs::read(path).with_context(|| format!("read frame '{}'", path.display()))?;
    decode_frame_image(&bytes)
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = mul_div255_u8(u16::from(px[0]), a);
        px[1] = mul_div255_u8(u16::from(px[1]), a);
        px[2] = mul_div255_u8(u16::from(px[2]), a);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
