// File: crates/trend-core/src/axis.rs
// Summary: Tick generation and label formatting for time and value axes.

use chrono::{TimeZone, Utc};

/// Compute a "nice" step close to range/target using 1/2/5 * 10^k.
pub fn nice_step(range: f64, target: usize) -> f64 {
    let target = target.max(2) as f64;
    let raw = (range / target).max(f64::EPSILON);
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Value-axis tick positions in [0, max], plus the chosen step.
pub fn value_ticks(max: f64, target: usize) -> (Vec<f64>, f64) {
    let step = nice_step(max.max(f64::EPSILON), target);
    let mut out = Vec::new();
    let mut t = 0.0f64;
    for _ in 0..100 {
        if t > max + step * 0.5 {
            break;
        }
        out.push(t);
        t += step;
    }
    if out.len() < 2 {
        out = vec![0.0, max];
    }
    (out, step)
}

/// Decimal precision follows the step so neighboring labels stay distinct.
pub fn format_value(v: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", v)
    } else if step >= 0.1 {
        format!("{:.1}", v)
    } else {
        format!("{:.2}", v)
    }
}

const DAY_MS: i64 = 24 * 60 * 60 * 1_000;

fn time_tick_candidates() -> &'static [i64] {
    &[
        DAY_MS,
        2 * DAY_MS,
        7 * DAY_MS,
        14 * DAY_MS,
        30 * DAY_MS,
        90 * DAY_MS,
        180 * DAY_MS,
        365 * DAY_MS,
    ]
}

/// Time-axis ticks between t0 and t1, spaced so adjacent labels sit at least
/// `min_px` apart. Returns tick timestamps and the chosen step (ms).
pub fn time_ticks(t0: i64, t1: i64, px_per_ms: f64, min_px: f32) -> (Vec<i64>, i64) {
    let mut step = *time_tick_candidates().first().unwrap_or(&DAY_MS);
    for &candidate in time_tick_candidates() {
        step = candidate;
        if candidate as f64 * px_per_ms >= min_px as f64 {
            break;
        }
    }
    // Align the first tick to a step boundary at or after t0.
    let first = if t0 % step == 0 { t0 } else { (t0 / step + 1) * step };
    let mut out = Vec::new();
    let mut t = first;
    for _ in 0..=2_000 {
        if t > t1 {
            break;
        }
        out.push(t);
        t += step;
    }
    (out, step)
}

/// Axis tick text, coarser as the step grows.
pub fn format_time_label(ts_ms: i64, step_ms: i64) -> String {
    let Some(dt) = Utc.timestamp_millis_opt(ts_ms).single() else {
        return String::new();
    };
    if step_ms < 7 * DAY_MS {
        dt.format("%b %d").to_string()
    } else if step_ms < 365 * DAY_MS {
        dt.format("%Y-%m").to_string()
    } else {
        dt.format("%Y").to_string()
    }
}

/// Human-readable date for tooltip content.
pub fn format_date(ts_ms: i64) -> String {
    match Utc.timestamp_millis_opt(ts_ms).single() {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => ts_ms.to_string(),
    }
}
