// File: crates/trend-core/tests/markers.rs
// Purpose: Annotation markers are omitted, not clipped, outside the range.

use skia_safe as skia;
use trend_core::chart::{Chart, RenderOptions};
use trend_core::marker::{visible_markers, Marker};
use trend_core::range::TimeRange;
use trend_core::series::{Currency, DataPoint, Series, SocialClass};
use trend_core::text::TextShaper;

fn day(n: i64) -> i64 {
    n * 24 * 60 * 60 * 1_000
}

#[test]
fn marker_outside_range_is_omitted() {
    let markers = vec![Marker::new(day(10), "Crisis"), Marker::new(day(25), "Covid")];
    let range = TimeRange::new(day(0), day(20)).unwrap();
    let visible = visible_markers(&markers, range);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].label, "Crisis");
}

#[test]
fn marker_on_the_boundary_is_included() {
    let markers = vec![Marker::new(day(20), "Covid")];
    let range = TimeRange::new(day(0), day(20)).unwrap();
    assert_eq!(visible_markers(&markers, range).len(), 1);
}

#[test]
fn scene_positions_only_in_range_markers() {
    let values: Vec<DataPoint> = (0..30).map(|i| DataPoint::new(day(i), 100.0)).collect();
    let series = Series::try_new(
        "Smith",
        values,
        skia::Color::from_argb(255, 70, 130, 180),
        Currency::Usd,
        SocialClass::Middle,
    )
    .unwrap();

    let mut chart = Chart::new(vec![series], TimeRange::new(day(0), day(15)).unwrap());
    chart.selection.replace(&["Smith"]);
    chart.markers = vec![Marker::new(day(10), "Crisis"), Marker::new(day(20), "Covid")];

    let scene = chart.layout(&TextShaper::new(), &RenderOptions::default());
    assert_eq!(scene.markers.len(), 1);
    assert_eq!(scene.markers[0].marker.label, "Crisis");
    let px = scene.markers[0].px;
    assert!(px >= scene.plot.left && px <= scene.plot.right);
}
