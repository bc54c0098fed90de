// File: crates/trend-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use skia_safe as skia;
use trend_core::chart::{Chart, RenderOptions};
use trend_core::marker::Marker;
use trend_core::range::TimeRange;
use trend_core::series::{Currency, DataPoint, Series, SocialClass};

fn day(n: i64) -> i64 {
    n * 24 * 60 * 60 * 1_000
}

fn small_chart() -> Chart {
    let smith = Series::try_new(
        "Smith",
        (0..5).map(|i| DataPoint::new(day(i), 100.0 + 8.0 * i as f64)).collect(),
        skia::Color::from_argb(255, 70, 130, 180),
        Currency::Usd,
        SocialClass::Middle,
    )
    .unwrap();
    let dubois = Series::try_new(
        "Dubois",
        (0..5).map(|i| DataPoint::new(day(i), 80.0 + 5.0 * i as f64)).collect(),
        skia::Color::from_argb(255, 255, 99, 71),
        Currency::Eur,
        SocialClass::Upper,
    )
    .unwrap();

    let mut chart = Chart::new(vec![smith, dubois], TimeRange::new(day(0), day(4)).unwrap());
    chart.selection.replace(&["Smith", "Dubois"]);
    chart.markers = vec![Marker::new(day(2), "Crisis")];
    chart
}

#[test]
fn render_smoke_png() {
    let chart = small_chart();

    let opts = RenderOptions::default();
    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}

#[test]
fn empty_selection_still_renders_axes_only() {
    let mut chart = small_chart();
    chart.selection.replace(&[]);

    let opts = RenderOptions::default();
    let bytes = chart.render_to_png_bytes(&opts).expect("empty plot renders");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}
