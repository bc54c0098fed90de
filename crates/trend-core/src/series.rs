// File: crates/trend-core/src/series.rs
// Summary: Series model: per-household time/value points with currency and class tags.

use skia_safe as skia;
use thiserror::Error;

/// One sampled value at a unix-millisecond timestamp, in the series' native
/// currency. Points are never mutated after the owning series is built.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub x: i64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Currencies a series may be denominated in. `Usd` is the reference unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
    Huf,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Usd, Currency::Eur, Currency::Gbp, Currency::Huf];
    pub const COUNT: usize = 4;

    pub const fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Huf => "HUF",
        }
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Currency::Usd => 0,
            Currency::Eur => 1,
            Currency::Gbp => 2,
            Currency::Huf => 3,
        }
    }
}

/// Broad social-class tag supplied by the data source. The engine carries it
/// through for selection UIs; rendering does not branch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocialClass {
    Working,
    Middle,
    Upper,
}

impl SocialClass {
    pub const fn label(self) -> &'static str {
        match self {
            SocialClass::Working => "working",
            SocialClass::Middle => "middle",
            SocialClass::Upper => "upper",
        }
    }
}

#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("series '{id}' has points out of time order at index {index}")]
    UnsortedPoints { id: String, index: usize },
}

/// One named line: time-ordered values plus display color, currency, and
/// class tag. The engine holds a read-only reference per render pass.
#[derive(Clone, Debug)]
pub struct Series {
    pub id: String,
    pub values: Vec<DataPoint>,
    pub color: skia::Color,
    pub currency: Currency,
    pub class: SocialClass,
}

impl Series {
    /// Construct a series, enforcing ascending timestamps.
    pub fn try_new(
        id: impl Into<String>,
        values: Vec<DataPoint>,
        color: skia::Color,
        currency: Currency,
        class: SocialClass,
    ) -> Result<Self, SeriesError> {
        let id = id.into();
        for (i, pair) in values.windows(2).enumerate() {
            if pair[1].x < pair[0].x {
                return Err(SeriesError::UnsortedPoints { id, index: i + 1 });
            }
        }
        Ok(Self { id, values, color, currency, class })
    }

    pub fn last_point(&self) -> Option<DataPoint> {
        self.values.last().copied()
    }
}

/// Absolute [min, max] time bounds across every series, if any points exist.
pub fn time_bounds(series: &[Series]) -> Option<(i64, i64)> {
    let mut min_x = i64::MAX;
    let mut max_x = i64::MIN;
    let mut any = false;
    for s in series {
        if let (Some(first), Some(last)) = (s.values.first(), s.values.last()) {
            any = true;
            min_x = min_x.min(first.x);
            max_x = max_x.max(last.x);
        }
    }
    if any { Some((min_x, max_x)) } else { None }
}
