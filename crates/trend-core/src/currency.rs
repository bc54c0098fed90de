// File: crates/trend-core/src/currency.rs
// Summary: Exchange-rate table and currency normalization into the reference unit.

use crate::series::Currency;

/// Multipliers into the reference unit (USD), static for a render session.
#[derive(Clone, Copy, Debug)]
pub struct ExchangeRates {
    rates: [Option<f64>; Currency::COUNT],
}

impl ExchangeRates {
    /// An empty table; every lookup falls back to 1.0 until rates are set.
    pub fn empty() -> Self {
        Self { rates: [None; Currency::ALL.len()] }
    }

    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.rates[currency.index()] = Some(rate);
        self
    }

    pub fn rate(&self, currency: Currency) -> Option<f64> {
        self.rates[currency.index()]
    }

    /// Convert `value` from `currency` into the reference unit.
    ///
    /// A missing rate is a configuration error: the value passes through at
    /// rate 1.0 with a warning instead of corrupting the scale domain.
    pub fn normalize(&self, value: f64, currency: Currency) -> f64 {
        match self.rates[currency.index()] {
            Some(rate) => value * rate,
            None => {
                log::warn!("no exchange rate configured for {}; treating as 1.0", currency.code());
                value
            }
        }
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self::empty()
            .with_rate(Currency::Usd, 1.0)
            .with_rate(Currency::Eur, 1.08)
            .with_rate(Currency::Gbp, 1.27)
            .with_rate(Currency::Huf, 0.0026)
    }
}
