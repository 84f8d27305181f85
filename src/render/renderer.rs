use crate::foundation::core::{Rect, SlotIndex, Size, VerticalBias};
use crate::render::surface::{FrameHandle, Surface};
use crate::sequence::slot::SlotTable;

/// What a call to [`FrameRenderer::render`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Same index as the previous request; nothing was drawn.
    Skipped,
    /// The surface has no geometry yet; the request was not recorded.
    Unavailable,
    /// The requested frame itself was drawn.
    Drawn(SlotIndex),
    /// The requested frame is not ready; the last real frame was drawn instead.
    Fallback {
        requested: SlotIndex,
        shown: SlotIndex,
    },
    /// Nothing ready to show; the canvas was cleared.
    Blank(SlotIndex),
}

impl RenderOutcome {
    /// Whether the requested frame's own image is on screen.
    pub fn shows_requested(self) -> bool {
        matches!(self, RenderOutcome::Drawn(_))
    }
}

/// Destination rectangle that covers `canvas` with `image`, preserving aspect ratio.
///
/// Horizontally centered. Vertically centered unless `bias` is `Bottom` and the scaled image
/// overflows the canvas height, in which case its bottom edge sits on the canvas bottom.
pub fn cover_fit(canvas: Size, image: Size, bias: VerticalBias) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Rect::ZERO;
    }
    let scale = (canvas.width / image.width).max(canvas.height / image.height);
    let w = image.width * scale;
    let h = image.height * scale;
    let x = (canvas.width - w) / 2.0;
    let y = match bias {
        VerticalBias::Bottom if h > canvas.height => canvas.height - h,
        VerticalBias::Bottom | VerticalBias::Center => (canvas.height - h) / 2.0,
    };
    Rect::new(x, y, x + w, y + h)
}

/// Draws the best available frame for a slot index.
///
/// Tracks the last requested index to skip redundant draws, and the last index whose own image
/// was drawn so fallbacks always point at a real frame.
#[derive(Clone, Debug, Default)]
pub struct FrameRenderer {
    bias: VerticalBias,
    last_requested: Option<SlotIndex>,
    last_drawn: Option<SlotIndex>,
    last_outcome: Option<RenderOutcome>,
}

impl FrameRenderer {
    /// `bias` is the alignment to use; callers pass `Center` on non-mobile viewports.
    pub fn new(bias: VerticalBias) -> Self {
        Self {
            bias,
            ..Self::default()
        }
    }

    pub fn set_bias(&mut self, bias: VerticalBias) {
        self.bias = bias;
    }

    pub fn bias(&self) -> VerticalBias {
        self.bias
    }

    pub fn last_requested(&self) -> Option<SlotIndex> {
        self.last_requested
    }

    pub fn last_drawn(&self) -> Option<SlotIndex> {
        self.last_drawn
    }

    /// Outcome of the last render that touched the surface; cleared when the surface goes away.
    pub fn last_outcome(&self) -> Option<RenderOutcome> {
        self.last_outcome
    }

    /// Make `slot` the fallback frame when nothing has been drawn yet. Misses then show `slot`
    /// instead of a blank canvas.
    pub fn seed_fallback(&mut self, slot: SlotIndex) {
        if self.last_drawn.is_none() {
            self.last_drawn = Some(slot);
        }
    }

    /// Forget the last request so the next render draws even for the same index.
    pub fn invalidate(&mut self) {
        self.last_requested = None;
    }

    /// Whether the screen shows a stand-in for `slot` that its own image could now replace.
    pub fn is_standing_in_for(&self, slot: SlotIndex) -> bool {
        match self.last_outcome {
            Some(RenderOutcome::Fallback { requested, .. }) => requested == slot,
            Some(RenderOutcome::Blank(requested)) => requested == slot,
            _ => false,
        }
    }

    pub fn render<S: Surface>(
        &mut self,
        index: SlotIndex,
        slots: &SlotTable<S::Image>,
        surface: &mut S,
    ) -> RenderOutcome {
        if self.last_requested == Some(index) {
            return RenderOutcome::Skipped;
        }
        let Some(canvas) = surface.size() else {
            tracing::trace!(slot = index.0, "surface not attached, render deferred");
            self.last_outcome = None;
            return RenderOutcome::Unavailable;
        };
        self.last_requested = Some(index);
        surface.clear();

        let (shown, outcome) = match (slots.ready(index), self.last_drawn) {
            (Some(img), _) => (Some(img), RenderOutcome::Drawn(index)),
            (None, Some(prev)) => match slots.ready(prev) {
                Some(img) => (
                    Some(img),
                    RenderOutcome::Fallback {
                        requested: index,
                        shown: prev,
                    },
                ),
                None => (None, RenderOutcome::Blank(index)),
            },
            (None, None) => (None, RenderOutcome::Blank(index)),
        };

        if let Some(img) = shown {
            let dest = cover_fit(
                canvas.to_kurbo(),
                Size::new(f64::from(img.width()), f64::from(img.height())),
                self.bias,
            );
            surface.draw_image(img, dest);
        }
        if let RenderOutcome::Drawn(slot) = outcome {
            self.last_drawn = Some(slot);
        }
        self.last_outcome = Some(outcome);
        outcome
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
