// File: crates/trend-core/tests/scale_domain.rs
// Purpose: Value-scale domain is computed over the union of selected series,
// never shrinks as the selection grows, and defaults sanely.

use skia_safe as skia;
use trend_core::currency::ExchangeRates;
use trend_core::range::TimeRange;
use trend_core::scale::{value_domain_max, Scales, ValueScale};
use trend_core::selection::{CapPolicy, Selection};
use trend_core::series::{Currency, DataPoint, Series, SocialClass};
use trend_core::types::RectF;

fn day(n: i64) -> i64 {
    n * 24 * 60 * 60 * 1_000
}

fn series(id: &str, currency: Currency, ys: &[f64]) -> Series {
    let values = ys
        .iter()
        .enumerate()
        .map(|(i, &y)| DataPoint::new(day(i as i64), y))
        .collect();
    Series::try_new(
        id,
        values,
        skia::Color::from_argb(255, 128, 128, 128),
        currency,
        SocialClass::Middle,
    )
    .unwrap()
}

fn select(ids: &[&str]) -> Selection {
    Selection::from_ids(ids.iter().copied(), Selection::DEFAULT_CAP, CapPolicy::WarnAndAccept)
}

#[test]
fn domain_grows_monotonically_with_selection() {
    let data = vec![
        series("A", Currency::Usd, &[10.0, 20.0]),
        series("B", Currency::Usd, &[50.0, 40.0]),
        series("C", Currency::Usd, &[5.0, 90.0]),
    ];
    let range = TimeRange::new(day(0), day(1)).unwrap();
    let rates = ExchangeRates::default();

    let mut prev = 0.0;
    for ids in [&["A"][..], &["A", "B"][..], &["A", "B", "C"][..]] {
        let max = value_domain_max(&data, &select(ids), range, &rates);
        assert!(max >= prev, "adding a series shrank the domain");
        prev = max;
    }
    assert!((prev - 90.0).abs() < 1e-9);
}

#[test]
fn domain_ignores_unselected_series() {
    let data = vec![
        series("A", Currency::Usd, &[10.0, 20.0]),
        series("B", Currency::Usd, &[500.0, 400.0]),
    ];
    let range = TimeRange::new(day(0), day(1)).unwrap();
    let max = value_domain_max(&data, &select(&["A"]), range, &ExchangeRates::default());
    assert!((max - 20.0).abs() < 1e-9);
}

#[test]
fn empty_visibility_defaults_to_one() {
    let data = vec![series("A", Currency::Usd, &[10.0])];
    let range = TimeRange::new(day(5), day(6)).unwrap();
    let max = value_domain_max(&data, &select(&["A"]), range, &ExchangeRates::default());
    assert!((max - 1.0).abs() < 1e-9);

    let none = value_domain_max(&data, &select(&[]), range, &ExchangeRates::default());
    assert!((none - 1.0).abs() < 1e-9);
}

#[test]
fn eur_series_normalizes_before_entering_the_domain() {
    // USD series present but unselected; selecting only the EUR series at
    // rate 0.86 must give a domain max of 86, not 100.
    let data = vec![
        series("usd", Currency::Usd, &[100.0, 200.0]),
        series("eur", Currency::Eur, &[100.0]),
    ];
    let range = TimeRange::new(day(0), day(1)).unwrap();
    let rates = ExchangeRates::empty()
        .with_rate(Currency::Usd, 1.0)
        .with_rate(Currency::Eur, 0.86);
    let max = value_domain_max(&data, &select(&["eur"]), range, &rates);
    assert!((max - 86.0).abs() < 1e-9);
}

#[test]
fn selection_churn_is_idempotent() {
    let data = vec![
        series("A", Currency::Usd, &[10.0, 20.0]),
        series("B", Currency::Gbp, &[30.0, 40.0]),
        series("C", Currency::Usd, &[50.0, 60.0]),
    ];
    let range = TimeRange::new(day(0), day(1)).unwrap();
    let rates = ExchangeRates::default();

    let before = value_domain_max(&data, &select(&["A", "B", "C"]), range, &rates);

    let mut sel = select(&["A", "B", "C"]);
    sel.toggle("B");
    sel.toggle("B");
    let after = value_domain_max(&data, &sel, range, &rates);

    assert!((before - after).abs() < 1e-12);
}

#[test]
fn inverted_value_scale_and_degenerate_guard() {
    let scale = ValueScale::new(0.0, 100.0, 50.0);
    assert!(scale.to_px(0.0) > scale.to_px(50.0));
    assert!((scale.to_px(50.0) - 0.0).abs() < 1e-6);
    assert!((scale.to_px(0.0) - 100.0).abs() < 1e-6);

    let degenerate = ValueScale::new(0.0, 100.0, 0.0);
    assert!((degenerate.vmax - 1.0).abs() < 1e-12);
}

#[test]
fn scales_compute_uses_plot_rect() {
    let data = vec![series("A", Currency::Usd, &[10.0, 20.0])];
    let range = TimeRange::new(day(0), day(1)).unwrap();
    let plot = RectF::from_ltrb(72.0, 48.0, 810.0, 484.0);
    let scales = Scales::compute(&data, &select(&["A"]), range, &ExchangeRates::default(), plot);

    assert!((scales.time.to_px(day(0)) - 72.0).abs() < 1e-3);
    assert!((scales.time.to_px(day(1)) - 810.0).abs() < 1e-3);
    assert!((scales.value.to_px(0.0) - 484.0).abs() < 1e-3);
    assert!((scales.value.to_px(20.0) - 48.0).abs() < 1e-3);
}
