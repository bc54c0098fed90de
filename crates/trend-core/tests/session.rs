// File: crates/trend-core/tests/session.rs
// Purpose: Mounted-session event routing: hover in/out, point tooltips,
// selection and range callbacks.

use skia_safe as skia;
use trend_core::chart::{Chart, RenderOptions};
use trend_core::range::TimeRange;
use trend_core::series::{Currency, DataPoint, Series, SocialClass};
use trend_core::view::ChartSession;

// Default options: 960x540 with insets (72, 150, 48, 56) puts the plot at
// (72, 48)..(810, 484). Series A sits at half height (y=266), B at the top.
fn mounted() -> ChartSession {
    let a = Series::try_new(
        "A",
        vec![DataPoint::new(0, 50.0), DataPoint::new(100, 50.0)],
        skia::Color::from_argb(255, 70, 130, 180),
        Currency::Usd,
        SocialClass::Middle,
    )
    .unwrap();
    let b = Series::try_new(
        "B",
        vec![DataPoint::new(0, 100.0), DataPoint::new(100, 100.0)],
        skia::Color::from_argb(255, 255, 99, 71),
        Currency::Usd,
        SocialClass::Upper,
    )
    .unwrap();
    let mut chart = Chart::new(vec![a, b], TimeRange::new(0, 100).unwrap());
    chart.selection.replace(&["A", "B"]);
    ChartSession::mount(chart, RenderOptions::default())
}

#[test]
fn hover_activates_and_leave_resets() {
    let mut session = mounted();

    assert!(session.on_pointer_move(441.0, 266.0));
    assert_eq!(session.highlight().active(), Some("A"));

    // Far from every line: matching leave back to Idle
    assert!(session.on_pointer_move(441.0, 400.0));
    assert_eq!(session.highlight().active(), None);
}

#[test]
fn hover_hands_off_between_series() {
    let mut session = mounted();

    session.on_pointer_move(441.0, 266.0);
    assert_eq!(session.highlight().active(), Some("A"));

    // Jump straight onto B's line: leave(A) then enter(B)
    session.on_pointer_move(441.0, 49.0);
    assert_eq!(session.highlight().active(), Some("B"));
}

#[test]
fn point_hover_fills_the_shared_tooltip() {
    let mut session = mounted();

    // Near A's first data point at (72, 266)
    assert!(session.on_pointer_move(74.0, 268.0));
    assert_eq!(session.highlight().active(), Some("A"));
    assert!(session.tooltip().is_visible());
    let lines = session.tooltip().lines().to_vec();
    assert!(lines[0].contains("USD"));
    assert!(lines[1].contains("USD") || lines[1].contains("1970"));

    // Moving along the line but away from the point hides it again
    assert!(session.on_pointer_move(441.0, 266.0));
    assert!(!session.tooltip().is_visible());
    assert_eq!(session.highlight().active(), Some("A"));
}

#[test]
fn pointer_leaving_the_chart_clears_everything() {
    let mut session = mounted();
    session.on_pointer_move(74.0, 268.0);
    assert!(session.tooltip().is_visible());

    assert!(session.on_pointer_leave());
    assert_eq!(session.highlight().active(), None);
    assert!(!session.tooltip().is_visible());

    // Idempotent
    assert!(!session.on_pointer_leave());
}

#[test]
fn outside_the_plot_never_hits() {
    let mut session = mounted();
    assert!(!session.on_pointer_move(10.0, 10.0));
    assert_eq!(session.highlight().active(), None);
}

#[test]
fn selection_change_over_cap_surfaces_a_warning() {
    let mut session = mounted();
    let warning = session
        .on_selection_change(&["A", "B", "c", "d", "e", "f"])
        .expect("six ids exceed the default cap of five");
    assert!(warning.applied);
    assert_eq!(warning.cap, 5);
}

#[test]
fn range_change_clamps_to_data_bounds() {
    let mut session = mounted();
    session.on_range_change(-1_000, 5_000);
    assert_eq!(session.chart().range, TimeRange::new(0, 100).unwrap());

    // Reversed endpoints are normalized, not rejected
    session.on_range_change(80, 20);
    assert_eq!(session.chart().range, TimeRange::new(20, 80).unwrap());
}

#[test]
fn range_change_drops_stale_hover_state() {
    let mut session = mounted();
    session.on_pointer_move(74.0, 268.0);
    assert!(session.tooltip().is_visible());

    session.on_range_change(0, 50);
    assert_eq!(session.highlight().active(), None);
    assert!(!session.tooltip().is_visible());
}

#[test]
fn hover_buffer_width_is_a_runtime_knob() {
    let mut session = mounted();

    // 30 px above A's line: outside the default 15 px buffer...
    assert!(!session.on_pointer_move(441.0, 236.0));
    assert_eq!(session.highlight().active(), None);

    // ...but inside once the buffer is widened
    session.set_hover_buffer_width(64.0);
    assert!(session.on_pointer_move(441.0, 236.0));
    assert_eq!(session.highlight().active(), Some("A"));
}
