// File: crates/trend-core/tests/rgba.rs
// Purpose: Validate RGBA rendering buffer shape and a few pixels.

use skia_safe as skia;
use trend_core::chart::{Chart, RenderOptions};
use trend_core::range::TimeRange;
use trend_core::series::{Currency, DataPoint, Series, SocialClass};

#[test]
fn render_rgba8_buffer() {
    let series = Series::try_new(
        "Smith",
        vec![DataPoint::new(0, 0.0), DataPoint::new(4_000, 4.0)],
        skia::Color::from_argb(255, 70, 130, 180),
        Currency::Usd,
        SocialClass::Middle,
    )
    .unwrap();
    let mut chart = Chart::new(vec![series], TimeRange::new(0, 4_000).unwrap());
    chart.selection.replace(&["Smith"]);

    let mut opts = RenderOptions::default();
    opts.draw_labels = false; // avoid font variance
    let (px, w, h, stride) = chart.render_to_rgba8(&opts).expect("rgba render");
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, (w as usize) * 4);

    // Check background alpha in top-left pixel (RGBA)
    let a = px[3];
    assert_eq!(a, 255);
}
