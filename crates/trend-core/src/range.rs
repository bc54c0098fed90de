// File: crates/trend-core/src/range.rs
// Summary: Time-range model and range filtering of series points.

use thiserror::Error;

use crate::series::{DataPoint, Series};

#[derive(Debug, Error)]
#[error("range start {start} is after end {end}")]
pub struct RangeError {
    pub start: i64,
    pub end: i64,
}

/// A closed [start, end] window over unix-millisecond timestamps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeRange {
    pub start: i64,
    pub end: i64,
}

impl TimeRange {
    pub fn new(start: i64, end: i64) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError { start, end });
        }
        Ok(Self { start, end })
    }

    /// Clamp both endpoints to the data's absolute bounds. The result stays a
    /// valid non-empty interval even when the window lies fully outside.
    pub fn clamp_to(self, bounds: (i64, i64)) -> TimeRange {
        let (lo, hi) = bounds;
        let start = self.start.clamp(lo, hi);
        let end = self.end.clamp(lo, hi);
        TimeRange { start, end: end.max(start) }
    }

    pub fn contains(&self, x: i64) -> bool {
        self.start <= x && x <= self.end
    }

    pub fn span_ms(&self) -> i64 {
        self.end - self.start
    }
}

/// Points of `series` with x in [range.start, range.end], in original order.
///
/// Values are sorted ascending, so the strict inclusion test reduces to a
/// binary-searched subslice. No interpolation at boundaries; an empty result
/// is fine and downstream skips the series' line and label.
pub fn visible_slice(series: &Series, range: TimeRange) -> &[DataPoint] {
    let lo = series.values.partition_point(|p| p.x < range.start);
    let hi = series.values.partition_point(|p| p.x <= range.end);
    &series.values[lo..hi]
}
