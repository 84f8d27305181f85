use super::*;

#[test]
fn canvas_size_rejects_zero_dimensions() {
    assert!(CanvasSize::new(0, 10).is_err());
    assert!(CanvasSize::new(10, 0).is_err());
    assert_eq!(
        CanvasSize::new(3, 4).unwrap(),
        CanvasSize {
            width: 3,
            height: 4
        }
    );
}

#[test]
fn device_pixel_ratio_is_capped_at_two() {
    let g = ViewportGeometry::full_viewport(1000.0, 500.0, 3.0);
    assert_eq!(
        g.canvas_size(2.0, false, 768.0),
        CanvasSize {
            width: 2000,
            height: 1000
        }
    );
}

#[test]
fn missing_device_pixel_ratio_counts_as_one() {
    let g = ViewportGeometry::full_viewport(800.0, 600.0, 0.0);
    assert_eq!(
        g.canvas_size(2.0, false, 768.0),
        CanvasSize {
            width: 800,
            height: 600
        }
    );
    let g = ViewportGeometry::full_viewport(800.0, 600.0, f64::NAN);
    assert_eq!(g.canvas_size(2.0, false, 768.0).width, 800);
}

#[test]
fn mobile_unit_dpr_applies_below_breakpoint_only() {
    let narrow = ViewportGeometry::new(Size::new(300.0, 300.0), 400.0, 3.0);
    assert_eq!(narrow.canvas_size(2.0, true, 768.0).width, 300);
    assert_eq!(narrow.canvas_size(2.0, false, 768.0).width, 600);

    let wide = ViewportGeometry::new(Size::new(300.0, 300.0), 1200.0, 3.0);
    assert_eq!(wide.canvas_size(2.0, true, 768.0).width, 600);
}

#[test]
fn fractional_layout_truncates_and_collapsed_layout_is_empty() {
    let g = ViewportGeometry::new(Size::new(100.7, 50.2), 1200.0, 1.0);
    assert_eq!(
        g.canvas_size(2.0, false, 768.0),
        CanvasSize {
            width: 100,
            height: 50
        }
    );

    let collapsed = ViewportGeometry::new(Size::new(0.0, 50.0), 1200.0, 1.0);
    assert!(collapsed.canvas_size(2.0, false, 768.0).is_empty());
}
