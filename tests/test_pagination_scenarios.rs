//! Pagination scenarios with literal expected values.
//!
//! Exercises the layout planner and paginator together on concrete rasters:
//! multi-page splits with exact remainders, the single-page case, and
//! degenerate input rejection.

use snapdoc::{paginate, LayoutError, PageFormat, PageLayout};

/// Page format whose usable area equals the given dimensions (no margin or
/// header), so rendered units map 1:1 to source pixels for a raster of the
/// same width.
fn unit_format(usable_width: f64, usable_height: f64) -> PageFormat {
    PageFormat::custom(usable_width, usable_height, 0.0, 0.0)
}

#[test]
fn test_tall_raster_splits_with_exact_remainder() {
    // 1000x3000 raster at scale 1.0 over 1800-unit pages: 1800 then 1200.
    let layout = PageLayout::plan(1000, 3000, &unit_format(1000.0, 1800.0)).unwrap();
    let segments = paginate(&layout, 3000);

    assert_eq!(segments.len(), 2);

    assert_eq!(segments[0].source_offset_px, 0);
    assert_eq!(segments[0].source_height_px, 1800);
    assert!((segments[0].rendered_height - 1800.0).abs() < 1e-9);

    assert_eq!(segments[1].source_offset_px, 1800);
    assert_eq!(segments[1].source_height_px, 1200);
    assert!((segments[1].rendered_height - 1200.0).abs() < 1e-9);
}

#[test]
fn test_short_raster_fits_one_page() {
    // 1000x400 raster with 1800 units per page: one page, full raster.
    let layout = PageLayout::plan(1000, 400, &unit_format(1000.0, 1800.0)).unwrap();
    let segments = paginate(&layout, 400);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].source_offset_px, 0);
    assert_eq!(segments[0].source_height_px, 400);
}

#[test]
fn test_zero_width_raster_is_layout_error() {
    let err = PageLayout::plan(0, 500, &PageFormat::a4()).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidRaster { width: 0, height: 500 }));
}

#[test]
fn test_page_count_matches_ceil() {
    for (height, usable, expected) in [
        (1800_u32, 1800.0, 1),
        (1801, 1800.0, 2),
        (3600, 1800.0, 2),
        (5400, 1800.0, 3),
        (5401, 1800.0, 4),
    ] {
        let layout = PageLayout::plan(1000, height, &unit_format(1000.0, usable)).unwrap();
        let segments = paginate(&layout, height);
        assert_eq!(segments.len(), expected, "height {} usable {}", height, usable);
        assert_eq!(layout.page_count(), expected);
    }
}

#[test]
fn test_scaled_pagination_still_covers_source() {
    // A4 with real margins: scale is no longer 1.0, interior rounding kicks in.
    let format = PageFormat::a4();
    let layout = PageLayout::plan(1280, 9000, &format).unwrap();
    let segments = paginate(&layout, 9000);

    assert!(segments.len() > 1);

    let mut expected_offset = 0;
    for seg in &segments {
        assert_eq!(seg.source_offset_px, expected_offset);
        assert!(seg.source_height_px > 0);
        expected_offset += seg.source_height_px;
    }
    assert_eq!(expected_offset, 9000);

    // All pages but the last are full; none exceeds the usable height.
    for seg in &segments[..segments.len() - 1] {
        assert!((seg.rendered_height - layout.usable_height_per_page).abs() < 1e-9);
    }
    assert!(segments.last().unwrap().rendered_height <= layout.usable_height_per_page + 1e-9);
}
