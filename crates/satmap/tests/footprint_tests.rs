//! Tests for footprints, the overlap predicate and the coordinate transform.

use satmap::{overlaps, to_ground, to_pixel, Footprint, SatmapError};
use test_utils::assert_coords_approx_eq;

fn fp(x: (f64, f64), y: (f64, f64), resolution: f64) -> Footprint {
    Footprint::new(x, y, resolution).unwrap()
}

// ============================================================================
// overlaps tests
// ============================================================================

#[test]
fn test_overlaps_is_symmetric() {
    let footprints = [
        fp((0.0, 10.0), (0.0, 10.0), 5.0),
        fp((5.0, 15.0), (5.0, 15.0), 5.0),
        fp((10.0, 20.0), (0.0, 10.0), 5.0),
        fp((0.0, 10.0), (10.0, 20.0), 5.0),
        fp((-5.0, 25.0), (2.0, 3.0), 1.0),
        fp((100.0, 200.0), (100.0, 200.0), 5.0),
        fp((2.0, 4.0), (2.0, 4.0), 0.5),
    ];

    for a in &footprints {
        for b in &footprints {
            assert_eq!(overlaps(a, b), overlaps(b, a), "{:?} vs {:?}", a, b);
        }
    }
}

#[test]
fn test_overlaps_contained() {
    let outer = fp((0.0, 100.0), (0.0, 100.0), 5.0);
    let inner = fp((40.0, 60.0), (40.0, 60.0), 5.0);
    assert!(overlaps(&outer, &inner));
}

#[test]
fn test_overlaps_shared_edge_is_false() {
    let a = fp((0.0, 10.0), (0.0, 10.0), 5.0);
    assert!(!overlaps(&a, &fp((10.0, 20.0), (0.0, 10.0), 5.0)));
    assert!(!overlaps(&a, &fp((-10.0, 0.0), (0.0, 10.0), 5.0)));
    assert!(!overlaps(&a, &fp((0.0, 10.0), (10.0, 20.0), 5.0)));
    assert!(!overlaps(&a, &fp((0.0, 10.0), (-10.0, 0.0), 5.0)));
}

#[test]
fn test_overlaps_ignores_resolution() {
    let a = fp((0.0, 10.0), (0.0, 10.0), 5.0);
    let b = fp((5.0, 15.0), (5.0, 15.0), 30.0);
    assert!(overlaps(&a, &b));
}

#[test]
fn test_overlaps_disjoint_on_one_axis() {
    let a = fp((0.0, 10.0), (0.0, 10.0), 5.0);
    let b = fp((5.0, 15.0), (50.0, 60.0), 5.0);
    assert!(!overlaps(&a, &b));
}

// ============================================================================
// to_pixel / to_ground tests
// ============================================================================

#[test]
fn test_to_pixel_rows_grow_southward() {
    let footprint = fp((0.0, 100.0), (0.0, 50.0), 5.0);
    let (top, _) = to_pixel(&footprint, 0.0, 50.0).unwrap();
    let (bottom, _) = to_pixel(&footprint, 0.0, 0.0).unwrap();
    assert_eq!(top, 0);
    assert_eq!(bottom, 10);
}

#[test]
fn test_to_pixel_edges_are_in_range() {
    let footprint = fp((75.0, 300.0), (450.0, 500.0), 5.0);
    assert!(to_pixel(&footprint, 75.0, 450.0).is_ok());
    assert!(to_pixel(&footprint, 300.0, 500.0).is_ok());
}

#[test]
fn test_to_pixel_out_of_range() {
    let footprint = fp((75.0, 300.0), (450.0, 500.0), 5.0);
    for (x, y) in [(100.0, 100.0), (50.0, 470.0), (301.0, 470.0), (100.0, 501.0)] {
        let err = to_pixel(&footprint, x, y).unwrap_err();
        assert!(matches!(err, SatmapError::OutOfRange { .. }));
    }
}

#[test]
fn test_to_ground_origin_is_top_left() {
    let footprint = fp((750.0, 1200.0), (200.0, 400.0), 15.0);
    let (x, y) = to_ground(&footprint, 0, 0);
    assert_coords_approx_eq!((x, y), (750.0, 400.0), 1e-12);
}

#[test]
fn test_round_trip_within_half_scale_convention() {
    let footprint = fp((0.0, 40.0), (0.0, 20.0), 2.0);
    let (rows, cols) = footprint.pixel_extent();

    for row in 0..=rows {
        for col in 0..=cols {
            let (x, y) = to_ground(&footprint, row, col);
            let (r, c) = to_pixel(&footprint, x, y).unwrap();
            // to_ground steps half a pixel per index.
            assert!((r as f64 - row as f64 / 2.0).abs() <= 0.5);
            assert!((c as f64 - col as f64 / 2.0).abs() <= 0.5);
        }
    }
}
