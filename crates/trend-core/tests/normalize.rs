// File: crates/trend-core/tests/normalize.rs
// Purpose: Currency normalization is linear and never poisons the domain.

use trend_core::currency::ExchangeRates;
use trend_core::series::Currency;

#[test]
fn normalize_is_linear() {
    let rates = ExchangeRates::default();
    for v in [0.0, 1.0, 42.5, 1_000_000.0] {
        for c in Currency::ALL {
            let one = rates.normalize(v, c);
            let two = rates.normalize(2.0 * v, c);
            assert!((two - 2.0 * one).abs() < 1e-9, "{c:?} at {v}");
        }
    }
}

#[test]
fn known_rate_multiplies() {
    let rates = ExchangeRates::empty().with_rate(Currency::Eur, 0.86);
    let got = rates.normalize(100.0, Currency::Eur);
    assert!((got - 86.0).abs() < 1e-9);
}

#[test]
fn missing_rate_falls_back_to_identity_not_nan() {
    let rates = ExchangeRates::empty();
    let got = rates.normalize(123.0, Currency::Huf);
    assert!(got.is_finite());
    assert!((got - 123.0).abs() < 1e-9);
}
