#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn geometry(left: f64, top: f64, css: (f64, f64), buffer: (f64, f64), dpr: f64) -> CanvasGeometry {
    CanvasGeometry {
        left,
        top,
        css_width: css.0,
        css_height: css.1,
        buffer_width: buffer.0,
        buffer_height: buffer.1,
        dpr,
    }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_equality() {
    assert_eq!(Point::new(1.0, 2.0), Point::new(1.0, 2.0));
    assert_ne!(Point::new(1.0, 2.0), Point::new(1.0, 3.0));
}

// --- backing_store_size ---

#[test]
fn backing_store_matches_css_at_unit_ratio() {
    assert_eq!(backing_store_size(800.0, 600.0, 1.0), (800, 600));
}

#[test]
fn backing_store_scales_with_ratio() {
    assert_eq!(backing_store_size(800.0, 600.0, 2.0), (1600, 1200));
}

#[test]
fn backing_store_rounds_fractional_css() {
    assert_eq!(backing_store_size(300.4, 150.6, 1.0), (300, 151));
}

#[test]
fn backing_store_never_zero() {
    assert_eq!(backing_store_size(0.0, 0.0, 1.0), (1, 1));
}

#[test]
fn backing_store_treats_nonpositive_ratio_as_one() {
    assert_eq!(backing_store_size(100.0, 50.0, 0.0), (100, 50));
}

// --- client_to_engine: unscaled ---

#[test]
fn identity_mapping_at_origin_box() {
    let g = CanvasGeometry::synced(0.0, 0.0, 800.0, 600.0, 1.0);
    let p = g.client_to_engine(Point::new(100.0, 150.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 150.0)));
}

#[test]
fn mapping_subtracts_box_offset() {
    let g = CanvasGeometry::synced(8.0, 58.0, 800.0, 600.0, 1.0);
    let p = g.client_to_engine(Point::new(108.0, 208.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 150.0)));
}

#[test]
fn mapping_keeps_subpixel_offsets() {
    let g = CanvasGeometry::synced(8.5, 58.25, 800.0, 600.0, 1.0);
    let p = g.client_to_engine(Point::new(108.5, 208.25)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 150.0)));
}

// --- client_to_engine: device pixel ratio ---

#[test]
fn high_dpr_synced_canvas_maps_to_css_pixels() {
    let g = CanvasGeometry::synced(0.0, 0.0, 800.0, 600.0, 2.0);
    assert_eq!(g.buffer_width, 1600.0);
    let p = g.client_to_engine(Point::new(250.0, 200.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(250.0, 200.0)));
}

#[test]
fn fractional_dpr_synced_canvas_maps_to_css_pixels() {
    let g = CanvasGeometry::synced(0.0, 0.0, 800.0, 600.0, 1.5);
    let p = g.client_to_engine(Point::new(250.0, 200.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(250.0, 200.0)));
}

// --- client_to_engine: CSS scaling ---

#[test]
fn css_upscaled_canvas_shrinks_coordinates() {
    // Default 300x150 backing store stretched to a 600x300 CSS box.
    let g = geometry(0.0, 0.0, (600.0, 300.0), (300.0, 150.0), 1.0);
    let p = g.client_to_engine(Point::new(200.0, 100.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 50.0)));
}

#[test]
fn css_downscaled_canvas_grows_coordinates() {
    let g = geometry(10.0, 20.0, (400.0, 300.0), (800.0, 600.0), 1.0);
    let p = g.client_to_engine(Point::new(110.0, 120.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(200.0, 200.0)));
}

#[test]
fn css_scaling_and_dpr_compose() {
    // Backing store 1600 device px at dpr 2 → 800 logical px shown in a 400 px box.
    let g = geometry(0.0, 0.0, (400.0, 300.0), (1600.0, 1200.0), 2.0);
    let p = g.client_to_engine(Point::new(100.0, 75.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(200.0, 150.0)));
}

// --- bounds ---

#[test]
fn top_left_corner_is_inside() {
    let g = CanvasGeometry::synced(8.0, 8.0, 800.0, 600.0, 1.0);
    let p = g.client_to_engine(Point::new(8.0, 8.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(0.0, 0.0)));
}

#[test]
fn bottom_right_corner_is_inside() {
    let g = CanvasGeometry::synced(8.0, 8.0, 800.0, 600.0, 1.0);
    let p = g.client_to_engine(Point::new(808.0, 608.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(800.0, 600.0)));
}

#[test]
fn point_left_of_box_is_rejected() {
    let g = CanvasGeometry::synced(8.0, 8.0, 800.0, 600.0, 1.0);
    assert!(g.client_to_engine(Point::new(7.9, 100.0)).is_none());
}

#[test]
fn point_below_box_is_rejected() {
    let g = CanvasGeometry::synced(8.0, 8.0, 800.0, 600.0, 1.0);
    assert!(g.client_to_engine(Point::new(100.0, 608.1)).is_none());
}

#[test]
fn zero_size_box_is_not_mappable() {
    let g = geometry(0.0, 0.0, (0.0, 0.0), (300.0, 150.0), 1.0);
    assert!(!g.is_mappable());
    assert!(g.client_to_engine(Point::new(0.0, 0.0)).is_none());
}

#[test]
fn zero_dpr_is_not_mappable() {
    let g = geometry(0.0, 0.0, (800.0, 600.0), (800.0, 600.0), 0.0);
    assert!(g.client_to_engine(Point::new(1.0, 1.0)).is_none());
}

// --- content box ---

#[test]
fn parse_css_px_reads_pixel_lengths() {
    assert_eq!(parse_css_px("4px"), 4.0);
    assert_eq!(parse_css_px(" 2.5px "), 2.5);
    assert_eq!(parse_css_px("0px"), 0.0);
}

#[test]
fn parse_css_px_treats_other_values_as_zero() {
    assert_eq!(parse_css_px(""), 0.0);
    assert_eq!(parse_css_px("medium"), 0.0);
    assert_eq!(parse_css_px("1em"), 0.0);
    assert_eq!(parse_css_px("-3px"), 0.0);
}

#[test]
fn inset_moves_origin_and_shrinks_box() {
    let border_box = geometry(8.0, 48.0, (824.0, 624.0), (800.0, 600.0), 1.0);
    let g = border_box.inset(Insets { left: 5.0 + 7.0, top: 5.0 + 7.0, right: 5.0 + 7.0, bottom: 5.0 + 7.0 });
    assert_eq!(g.left, 20.0);
    assert_eq!(g.top, 60.0);
    assert_eq!(g.css_width, 800.0);
    assert_eq!(g.css_height, 600.0);
    assert_eq!(g.buffer_width, 800.0);
}

#[test]
fn bordered_canvas_maps_from_content_edge() {
    let border_box = geometry(8.0, 48.0, (806.0, 606.0), (800.0, 600.0), 1.0);
    let g = border_box.inset(Insets { left: 3.0, top: 3.0, right: 3.0, bottom: 3.0 });
    let p = g.client_to_engine(Point::new(8.0 + 3.0 + 100.0, 48.0 + 3.0 + 150.0)).unwrap();
    assert!(point_approx_eq(p, Point::new(100.0, 150.0)));
    // Clicks on the border itself are outside the drawing surface.
    assert!(g.client_to_engine(Point::new(9.0, 100.0)).is_none());
}

#[test]
fn inset_larger_than_box_is_not_mappable() {
    let g = geometry(0.0, 0.0, (10.0, 10.0), (300.0, 150.0), 1.0).inset(Insets { left: 6.0, top: 0.0, right: 6.0, bottom: 0.0 });
    assert_eq!(g.css_width, 0.0);
    assert!(!g.is_mappable());
}

// --- error bound ---

#[test]
fn rounded_backing_store_error_stays_below_one_pixel() {
    // Fractional CSS boxes force the backing store to round; the mapping error
    // must stay under one logical pixel anywhere in the box.
    for &(w, h) in &[(800.4, 600.6), (333.3, 222.2), (1024.5, 767.5)] {
        for &dpr in &[1.0, 1.25, 2.0, 3.0] {
            let g = CanvasGeometry::synced(3.3, 7.7, w, h, dpr);
            for step in 0..=10 {
                let fx = f64::from(step) / 10.0;
                let client = Point::new(g.left + w * fx, g.top + h * fx);
                let engine = g.client_to_engine(client).unwrap();
                assert!((engine.x - w * fx).abs() < 1.0, "x error at w={w} dpr={dpr} step={step}");
                assert!((engine.y - h * fx).abs() < 1.0, "y error at h={h} dpr={dpr} step={step}");
            }
        }
    }
}
