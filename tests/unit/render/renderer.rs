use super::*;
use crate::assets::decode::FrameImage;
use crate::foundation::core::CanvasSize;
use crate::render::surface::RasterSurface;

fn loaded(len: usize, ready: &[(usize, [u8; 4])]) -> SlotTable<FrameImage> {
    let mut t = SlotTable::new(len);
    for &(i, rgba) in ready {
        t.mark_loading(SlotIndex(i));
        t.complete::<()>(SlotIndex(i), Ok(FrameImage::solid(4, 2, rgba).unwrap()));
    }
    t
}

fn surface() -> RasterSurface {
    RasterSurface::with_size(CanvasSize {
        width: 8,
        height: 8,
    })
}

#[test]
fn cover_fit_fills_and_centers() {
    let r = cover_fit(
        Size::new(100.0, 100.0),
        Size::new(200.0, 100.0),
        VerticalBias::Center,
    );
    assert_eq!(r, Rect::new(-50.0, 0.0, 150.0, 100.0));

    let r = cover_fit(
        Size::new(100.0, 50.0),
        Size::new(100.0, 100.0),
        VerticalBias::Center,
    );
    assert_eq!(r, Rect::new(0.0, -25.0, 100.0, 75.0));
}

#[test]
fn bottom_bias_aligns_overflowing_image_to_bottom() {
    let r = cover_fit(
        Size::new(100.0, 50.0),
        Size::new(100.0, 100.0),
        VerticalBias::Bottom,
    );
    assert_eq!(r, Rect::new(0.0, -50.0, 100.0, 50.0));

    // No vertical overflow: bias has nothing to do.
    let r = cover_fit(
        Size::new(100.0, 100.0),
        Size::new(200.0, 100.0),
        VerticalBias::Bottom,
    );
    assert_eq!(r.y0, 0.0);
}

#[test]
fn cover_fit_ignores_degenerate_images() {
    let r = cover_fit(
        Size::new(10.0, 10.0),
        Size::new(0.0, 5.0),
        VerticalBias::Center,
    );
    assert_eq!(r, Rect::ZERO);
}

#[test]
fn same_index_twice_draws_once() {
    let slots = loaded(3, &[(1, [1, 2, 3, 255])]);
    let mut s = surface();
    let mut r = FrameRenderer::default();
    assert_eq!(r.render(SlotIndex(1), &slots, &mut s), RenderOutcome::Drawn(SlotIndex(1)));
    assert_eq!(r.render(SlotIndex(1), &slots, &mut s), RenderOutcome::Skipped);
    assert_eq!(s.draw_count(), 1);

    r.invalidate();
    assert_eq!(r.render(SlotIndex(1), &slots, &mut s), RenderOutcome::Drawn(SlotIndex(1)));
    assert_eq!(s.draw_count(), 2);
}

#[test]
fn missing_frame_falls_back_to_last_real_frame() {
    let slots = loaded(8, &[(4, [10, 20, 30, 255])]);
    let mut s = surface();
    let mut r = FrameRenderer::default();

    r.render(SlotIndex(4), &slots, &mut s);
    let frame4 = s.data().to_vec();

    assert_eq!(
        r.render(SlotIndex(5), &slots, &mut s),
        RenderOutcome::Fallback {
            requested: SlotIndex(5),
            shown: SlotIndex(4)
        }
    );
    assert_eq!(s.data(), frame4.as_slice());

    // Fallback of a fallback still points at the real frame.
    assert_eq!(
        r.render(SlotIndex(6), &slots, &mut s),
        RenderOutcome::Fallback {
            requested: SlotIndex(6),
            shown: SlotIndex(4)
        }
    );
    assert_eq!(r.last_drawn(), Some(SlotIndex(4)));
    assert!(r.is_standing_in_for(SlotIndex(6)));
    assert!(!r.is_standing_in_for(SlotIndex(5)));
}

#[test]
fn nothing_ready_leaves_canvas_blank() {
    let slots = loaded(3, &[]);
    let mut s = surface();
    let mut r = FrameRenderer::default();
    assert_eq!(r.render(SlotIndex(0), &slots, &mut s), RenderOutcome::Blank(SlotIndex(0)));
    assert!(s.data().iter().all(|&b| b == 0));
    assert_eq!(s.draw_count(), 0);
    assert!(r.is_standing_in_for(SlotIndex(0)));
}

#[test]
fn unattached_surface_defers_without_recording_request() {
    let slots = loaded(2, &[(0, [1, 1, 1, 255])]);
    let mut s = RasterSurface::new();
    let mut r = FrameRenderer::default();
    assert_eq!(r.render(SlotIndex(0), &slots, &mut s), RenderOutcome::Unavailable);
    assert_eq!(r.last_requested(), None);

    s.resize(CanvasSize {
        width: 2,
        height: 2,
    });
    assert_eq!(r.render(SlotIndex(0), &slots, &mut s), RenderOutcome::Drawn(SlotIndex(0)));
}

#[test]
fn seeded_fallback_replaces_blank() {
    let slots = loaded(60, &[(0, [0, 0, 200, 255])]);
    let mut s = surface();
    let mut r = FrameRenderer::default();
    assert_eq!(r.render(SlotIndex(50), &slots, &mut s), RenderOutcome::Blank(SlotIndex(50)));

    r.seed_fallback(SlotIndex(0));
    r.invalidate();
    assert_eq!(
        r.render(SlotIndex(50), &slots, &mut s),
        RenderOutcome::Fallback {
            requested: SlotIndex(50),
            shown: SlotIndex(0)
        }
    );
    assert_eq!(s.pixel(4, 4), Some([0, 0, 200, 255]));

    // A real draw is never overridden.
    let slots = loaded(3, &[(1, [1, 2, 3, 255])]);
    let mut r = FrameRenderer::default();
    r.render(SlotIndex(1), &slots, &mut s);
    r.seed_fallback(SlotIndex(0));
    assert_eq!(r.last_drawn(), Some(SlotIndex(1)));
}

#[test]
fn detached_surface_clears_stale_stand_in() {
    let slots = loaded(3, &[]);
    let mut s = surface();
    let mut r = FrameRenderer::default();
    r.render(SlotIndex(1), &slots, &mut s);
    assert!(r.is_standing_in_for(SlotIndex(1)));

    s.resize(CanvasSize {
        width: 0,
        height: 0,
    });
    assert_eq!(r.render(SlotIndex(2), &slots, &mut s), RenderOutcome::Unavailable);
    assert_eq!(r.last_outcome(), None);
    assert!(!r.is_standing_in_for(SlotIndex(1)));
}
