//! Scroll position to normalized progress and frame slot mapping.

use crate::foundation::core::SlotIndex;
use crate::foundation::math::{clamp01, saturating_ratio};

/// Scroll state sampled by the host for one event.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScrollGeometry {
    /// The sequence spans the whole page.
    FullDocument {
        scroll_top: f64,
        scroll_height: f64,
        viewport_height: f64,
    },
    /// The sequence is scoped to one section. `element_top` is the section's top edge relative
    /// to the viewport (negative once it has scrolled past the top).
    ElementRelative {
        element_top: f64,
        element_height: f64,
        viewport_height: f64,
    },
}

impl ScrollGeometry {
    /// Progress in `[0, 1]` through the effective scrollable range.
    pub fn progress(&self) -> f64 {
        match *self {
            ScrollGeometry::FullDocument {
                scroll_top,
                scroll_height,
                viewport_height,
            } => saturating_ratio(scroll_top, scroll_height - viewport_height),
            ScrollGeometry::ElementRelative {
                element_top,
                element_height,
                viewport_height,
            } => saturating_ratio(
                viewport_height - element_top,
                element_height + viewport_height,
            ),
        }
    }

    /// Whether a section-scoped sequence is within `distance` pixels of entering the viewport.
    ///
    /// Full-document sequences are always near.
    pub fn is_near_viewport(&self, distance: f64) -> bool {
        match *self {
            ScrollGeometry::FullDocument { .. } => true,
            ScrollGeometry::ElementRelative {
                element_top,
                viewport_height,
                ..
            } => element_top < viewport_height + distance,
        }
    }
}

/// `round(progress * (len - 1))`. An empty sequence maps everything to slot 0.
pub fn frame_for_progress(progress: f64, len: usize) -> SlotIndex {
    let Some(last) = len.checked_sub(1) else {
        return SlotIndex(0);
    };
    let idx = (clamp01(progress) * last as f64).round() as usize;
    SlotIndex(idx.min(last))
}
