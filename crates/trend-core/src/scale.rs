// File: crates/trend-core/src/scale.rs
// Summary: Time (X) and value (Y) scale transforms for a render pass.

use crate::currency::ExchangeRates;
use crate::range::{visible_slice, TimeRange};
use crate::selection::Selection;
use crate::series::Series;
use crate::types::RectF;

/// Affine map from [t0, t1] (unix ms) to [left_px, right_px].
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub t0: i64,
    pub t1: i64,
    pub left_px: f32,
    pub right_px: f32,
}

impl TimeScale {
    pub fn new(range: TimeRange, left_px: f32, right_px: f32) -> Self {
        Self { t0: range.start, t1: range.end, left_px, right_px }
    }

    #[inline]
    pub fn to_px(&self, x: i64) -> f32 {
        let span = (self.t1 - self.t0).max(1) as f64;
        let t = (x - self.t0) as f64 / span;
        self.left_px + (t as f32) * (self.right_px - self.left_px)
    }

    #[inline]
    pub fn from_px(&self, px: f32) -> i64 {
        let w = (self.right_px - self.left_px).max(1.0);
        let t = ((px - self.left_px) / w) as f64;
        self.t0 + (t * (self.t1 - self.t0) as f64).round() as i64
    }

    pub fn px_per_ms(&self) -> f64 {
        (self.right_px - self.left_px) as f64 / (self.t1 - self.t0).max(1) as f64
    }
}

/// Linear map from [0, vmax] to [bottom_px, top_px]; larger values render
/// higher on screen.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new(top_px: f32, bottom_px: f32, vmax: f64) -> Self {
        let vmax = if vmax > 0.0 { vmax } else { 1.0 };
        Self { top_px, bottom_px, vmax }
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        let t = (v / self.vmax) as f32;
        self.bottom_px - t * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f32) -> f64 {
        let h = (self.bottom_px - self.top_px).max(1.0);
        ((self.bottom_px - py) / h) as f64 * self.vmax
    }
}

/// The two scales of one render pass.
///
/// The value domain is computed over the union of *selected* series so that
/// switching the highlighted series never rescales the axis; it changes only
/// when selection or range change.
#[derive(Clone, Copy, Debug)]
pub struct Scales {
    pub time: TimeScale,
    pub value: ValueScale,
}

impl Scales {
    pub fn compute(
        series: &[Series],
        selection: &Selection,
        range: TimeRange,
        rates: &ExchangeRates,
        plot: RectF,
    ) -> Scales {
        let vmax = value_domain_max(series, selection, range, rates);
        Scales {
            time: TimeScale::new(range, plot.left, plot.right),
            value: ValueScale::new(plot.top, plot.bottom, vmax),
        }
    }
}

/// Max normalized value over the visible points of all selected series.
/// Defaults to 1.0 when nothing is visible, so the scale never degenerates.
pub fn value_domain_max(
    series: &[Series],
    selection: &Selection,
    range: TimeRange,
    rates: &ExchangeRates,
) -> f64 {
    let mut max_v = f64::NEG_INFINITY;
    for s in series {
        if !selection.contains(&s.id) {
            continue;
        }
        for p in visible_slice(s, range) {
            let v = rates.normalize(p.y, s.currency);
            if v > max_v {
                max_v = v;
            }
        }
    }
    if max_v.is_finite() && max_v > 0.0 { max_v } else { 1.0 }
}
