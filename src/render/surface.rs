use std::path::Path;

use anyhow::Context;

use crate::assets::decode::{FrameImage, unpremultiply_rgba8_in_place};
use crate::foundation::core::{CanvasSize, Rect};
use crate::foundation::error::{ScrollreelError, ScrollreelResult};
use crate::foundation::math::mul_div255_u8;

/// A decoded frame the renderer can measure.
pub trait FrameHandle {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Drawing target owned by the host (a browser canvas, a window, an offscreen buffer).
pub trait Surface {
    type Image: FrameHandle;

    /// Backing-store size, or `None` while the target is not attached or has no area.
    fn size(&self) -> Option<CanvasSize>;

    fn resize(&mut self, size: CanvasSize);

    fn clear(&mut self);

    /// Draw `image` scaled into `dest`; `dest` may extend past the canvas edges.
    fn draw_image(&mut self, image: &Self::Image, dest: Rect);
}

/// CPU surface over a premultiplied RGBA8 buffer.
///
/// Sampling is nearest-neighbour; drawing composites source-over.
#[derive(Clone, Debug, Default)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
    draws: u64,
}

impl RasterSurface {
    /// Detached surface with no area; `size()` reports `None` until the first resize.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size(size: CanvasSize) -> Self {
        let mut s = Self::new();
        s.resize(size);
        s
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Number of `draw_image` calls since creation.
    pub fn draw_count(&self) -> u64 {
        self.draws
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Straight-alpha copy for export.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight)
    }

    pub fn save_png(&self, path: &Path) -> ScrollreelResult<()> {
        let img = self
            .to_rgba_image()
            .ok_or_else(|| ScrollreelError::validation("surface has no pixels to export"))?;
        img.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

impl Surface for RasterSurface {
    type Image = FrameImage;

    fn size(&self) -> Option<CanvasSize> {
        let size = CanvasSize {
            width: self.width,
            height: self.height,
        };
        (!size.is_empty()).then_some(size)
    }

    fn resize(&mut self, size: CanvasSize) {
        self.width = size.width;
        self.height = size.height;
        self.data = vec![0; (size.width as usize) * (size.height as usize) * 4];
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    fn draw_image(&mut self, image: &FrameImage, dest: Rect) {
        self.draws += 1;
        if dest.width() <= 0.0 || dest.height() <= 0.0 {
            return;
        }
        let clip = dest.intersect(Rect::new(
            0.0,
            0.0,
            f64::from(self.width),
            f64::from(self.height),
        ));
        if clip.width() <= 0.0 || clip.height() <= 0.0 {
            return;
        }

        let sx = f64::from(image.width) / dest.width();
        let sy = f64::from(image.height) / dest.height();
        let x0 = clip.x0.floor() as u32;
        let x1 = (clip.x1.ceil() as u32).min(self.width);
        let y0 = clip.y0.floor() as u32;
        let y1 = (clip.y1.ceil() as u32).min(self.height);
        let src = image.rgba8_premul.as_slice();
        let stride = self.width as usize * 4;

        for py in y0..y1 {
            let v = ((f64::from(py) + 0.5 - dest.y0) * sy).floor();
            if v < 0.0 || v >= f64::from(image.height) {
                continue;
            }
            let src_row = (v as usize) * (image.width as usize) * 4;
            for px in x0..x1 {
                let u = ((f64::from(px) + 0.5 - dest.x0) * sx).floor();
                if u < 0.0 || u >= f64::from(image.width) {
                    continue;
                }
                let si = src_row + (u as usize) * 4;
                let di = (py as usize) * stride + (px as usize) * 4;
                let inv_a = 255 - u16::from(src[si + 3]);
                for c in 0..4 {
                    let d = mul_div255_u8(u16::from(self.data[di + c]), inv_a);
                    self.data[di + c] = src[si + c].saturating_add(d);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
