use crate::foundation::error::{ScrollreelError, ScrollreelResult};

pub use kurbo::{Rect, Size};

/// Position of a frame within a sequence (`0..N`), independent of its on-disk identifier.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct SlotIndex(pub usize);

/// Identifier used to resolve a frame's asset path (`00042.webp` has id 42).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameId(pub u32);

/// Canvas backing-store size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> ScrollreelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScrollreelError::validation(
                "CanvasSize width and height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn to_kurbo(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}

/// Where a cover-fitted image sits vertically once it overflows the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalBias {
    #[default]
    Center,
    /// Bottom-align on mobile viewports so the lower part of the subject stays in frame.
    Bottom,
}

/// Layout information the host reports on mount and on every resize.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportGeometry {
    /// Layout box of the element hosting the canvas, in CSS pixels.
    pub container: Size,
    /// Width of the whole viewport in CSS pixels (drives the mobile breakpoint).
    pub viewport_width: f64,
    pub device_pixel_ratio: f64,
}

impl ViewportGeometry {
    pub fn new(container: Size, viewport_width: f64, device_pixel_ratio: f64) -> Self {
        Self {
            container,
            viewport_width,
            device_pixel_ratio,
        }
    }

    /// Geometry for a canvas that fills the whole viewport.
    pub fn full_viewport(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self::new(Size::new(width, height), width, device_pixel_ratio)
    }

    pub fn is_mobile(&self, breakpoint: f64) -> bool {
        self.viewport_width < breakpoint
    }

    /// Backing-store size: layout box times the effective device pixel ratio.
    ///
    /// The ratio is capped at `max_dpr`; missing or non-positive ratios count as 1. With
    /// `mobile_unit_dpr`, mobile viewports always render at ratio 1.
    pub fn canvas_size(&self, max_dpr: f64, mobile_unit_dpr: bool, breakpoint: f64) -> CanvasSize {
        let dpr = if mobile_unit_dpr && self.is_mobile(breakpoint) {
            1.0
        } else if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(max_dpr)
        } else {
            1.0
        };
        CanvasSize {
            width: to_pixels(self.container.width * dpr),
            height: to_pixels(self.container.height * dpr),
        }
    }
}

fn to_pixels(v: f64) -> u32 {
    if v.is_finite() && v > 0.0 {
        v.floor().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
