// File: crates/demo/src/main.rs
// Summary: Demo plays the external collaborators: it generates (or loads from
// CSV) the household dataset and renders several chart configurations to PNGs.

use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use skia_safe as skia;
use std::path::{Path, PathBuf};
use trend_core::chart::{Chart, RenderOptions};
use trend_core::marker::Marker;
use trend_core::range::TimeRange;
use trend_core::series::{time_bounds, Currency, DataPoint, Series, SocialClass};
use trend_core::theme;
use trend_core::view::ChartSession;

const DEFAULT_SELECTION: [&str; 3] = ["Smith", "Blackwood", "Wilson"];

fn main() -> Result<()> {
    env_logger::init();

    // Optional CSV path; without one a deterministic synthetic dataset is used.
    let series = match std::env::args().nth(1) {
        Some(raw) => {
            let path = PathBuf::from(&raw);
            println!("Using input file: {}", path.display());
            load_series_csv(&path)
                .with_context(|| format!("failed to load CSV '{}'", path.display()))?
        }
        None => synth_households(),
    };
    println!("Loaded {} series", series.len());
    if series.is_empty() {
        anyhow::bail!("no series loaded");
    }

    let bounds = time_bounds(&series).expect("non-empty series");
    let markers = vec![
        Marker::new(month_ts(2019, 11), "Crisis"),
        Marker::new(month_ts(2020, 9), "Covid"),
    ];

    let mut chart = Chart::new(series, TimeRange::new(bounds.0, bounds.1)?);
    chart.markers = markers;
    chart.selection.reset_to(&DEFAULT_SELECTION);

    let out_dir = PathBuf::from("target/out");

    // 1) Default selection over the full range
    let opts = RenderOptions::default();
    let out = out_dir.join("trends_default.png");
    chart.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    // 2) Light theme
    let mut light = RenderOptions::default();
    light.theme = theme::find("light");
    let out = out_dir.join("trends_light.png");
    chart.render_to_png(&light, &out)?;
    println!("Wrote {}", out.display());

    // 3) Narrow range: the Covid marker falls outside and is omitted
    let zoomed_end = month_ts(2020, 6);
    let mut zoomed = Chart::new(chart.series.clone(), TimeRange::new(bounds.0, zoomed_end)?);
    zoomed.markers = chart.markers.clone();
    zoomed.selection.reset_to(&DEFAULT_SELECTION);
    let out = out_dir.join("trends_zoom.png");
    zoomed.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    // 4) Single-axis variant without data-point circles
    let mut minimal = Chart::new(chart.series.clone(), TimeRange::new(bounds.0, bounds.1)?);
    minimal.markers = chart.markers.clone();
    minimal.selection.reset_to(&DEFAULT_SELECTION);
    minimal.show_points = false;
    minimal.currency_axes = false;
    let out = out_dir.join("trends_minimal.png");
    minimal.render_to_png(&opts, &out)?;
    println!("Wrote {}", out.display());

    // 5) A hovered frame through a mounted session: emphasize Blackwood and
    // open the tooltip on one of its points.
    let mut session = ChartSession::mount(chart, RenderOptions::default());
    let target = session
        .scene()
        .series_visual("Blackwood")
        .and_then(|v| v.points.get(15))
        .map(|p| (p.px, p.py));
    if let Some((px, py)) = target {
        session.on_pointer_move(px, py);
    }
    let bytes = session.render_to_png_bytes()?;
    let out = out_dir.join("trends_highlight.png");
    std::fs::create_dir_all(&out_dir)?;
    std::fs::write(&out, bytes)?;
    println!("Wrote {}", out.display());

    Ok(())
}

fn month_ts(year: i32, month: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("valid month start")
        .timestamp_millis()
}

struct Household {
    id: &'static str,
    class: SocialClass,
    currency: Currency,
    color: skia::Color,
    base: f64,
    slope: f64,
    amp: f64,
    crisis_hit: f64,
    covid_hit: f64,
}

/// Deterministic stand-in for the synthetic data generator: 30 monthly
/// points per household from 2019-01, base growth with a wobble, a crisis
/// shock from month 10, and a covid shock from month 20.
fn synth_households() -> Vec<Series> {
    let households = [
        Household {
            id: "Smith",
            class: SocialClass::Middle,
            currency: Currency::Usd,
            color: skia::Color::from_argb(255, 70, 130, 180),
            base: 100.0,
            slope: 8.0,
            amp: 5.0,
            crisis_hit: 30.0,
            covid_hit: 20.0,
        },
        Household {
            id: "Blackwood",
            class: SocialClass::Upper,
            currency: Currency::Gbp,
            color: skia::Color::from_argb(255, 255, 99, 71),
            base: 80.0,
            slope: 5.0,
            amp: 7.0,
            crisis_hit: 15.0,
            covid_hit: 40.0,
        },
        Household {
            id: "Wilson",
            class: SocialClass::Working,
            currency: Currency::Usd,
            color: skia::Color::from_argb(255, 46, 139, 87),
            base: 60.0,
            slope: 4.0,
            amp: 4.0,
            crisis_hit: 20.0,
            covid_hit: 10.0,
        },
        Household {
            id: "Dubois",
            class: SocialClass::Middle,
            currency: Currency::Eur,
            color: skia::Color::from_argb(255, 230, 126, 34),
            base: 90.0,
            slope: 6.0,
            amp: 6.0,
            crisis_hit: 25.0,
            covid_hit: 15.0,
        },
        Household {
            id: "Kovacs",
            class: SocialClass::Working,
            currency: Currency::Huf,
            color: skia::Color::from_argb(255, 114, 82, 188),
            base: 30_000.0,
            slope: 2_000.0,
            amp: 1_500.0,
            crisis_hit: 8_000.0,
            covid_hit: 5_000.0,
        },
        Household {
            id: "Rossi",
            class: SocialClass::Upper,
            currency: Currency::Eur,
            color: skia::Color::from_argb(255, 0, 128, 128),
            base: 120.0,
            slope: 7.0,
            amp: 5.0,
            crisis_hit: 35.0,
            covid_hit: 25.0,
        },
    ];

    households
        .iter()
        .enumerate()
        .map(|(k, h)| {
            let values = (0..30)
                .map(|i| {
                    let year = 2019 + (i / 12) as i32;
                    let month = 1 + (i % 12) as u32;
                    let wobble = ((i as f64) * 1.7 + k as f64).sin() * h.amp;
                    let mut y = h.base + h.slope * i as f64 + wobble;
                    if i >= 10 {
                        y -= h.crisis_hit;
                    }
                    if i >= 20 {
                        y -= h.covid_hit;
                    }
                    DataPoint::new(month_ts(year, month), y.max(0.0))
                })
                .collect();
            Series::try_new(h.id, values, h.color, h.currency, h.class).expect("sorted synth data")
        })
        .collect()
}

/// Expected columns (header names, any order): household, class, currency,
/// date (%Y-%m-%d), value. Rows grouped by household in first-seen order.
fn load_series_csv(path: &Path) -> Result<Vec<Series>> {
    let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect();
    let idx = |name: &str| -> Option<usize> { headers.iter().position(|h| h == name) };

    let i_household = idx("household").context("missing 'household' column")?;
    let i_class = idx("class");
    let i_currency = idx("currency");
    let i_date = idx("date").context("missing 'date' column")?;
    let i_value = idx("value").context("missing 'value' column")?;

    let palette = [
        skia::Color::from_argb(255, 70, 130, 180),
        skia::Color::from_argb(255, 255, 99, 71),
        skia::Color::from_argb(255, 46, 139, 87),
        skia::Color::from_argb(255, 230, 126, 34),
        skia::Color::from_argb(255, 114, 82, 188),
        skia::Color::from_argb(255, 0, 128, 128),
    ];

    let mut order: Vec<String> = Vec::new();
    let mut rows: Vec<(SocialClass, Currency, Vec<DataPoint>)> = Vec::new();

    for rec in rdr.records() {
        let rec = rec?;
        let household = rec.get(i_household).unwrap_or("").trim().to_owned();
        if household.is_empty() {
            continue;
        }
        let date = rec.get(i_date).unwrap_or("").trim();
        let ts = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .with_context(|| format!("bad date '{date}'"))?
            .and_hms_opt(0, 0, 0)
            .expect("midnight exists")
            .and_utc()
            .timestamp_millis();
        let value: f64 = rec
            .get(i_value)
            .unwrap_or("")
            .trim()
            .parse()
            .with_context(|| format!("bad value for {household} at {date}"))?;

        let pos = match order.iter().position(|h| h == &household) {
            Some(pos) => pos,
            None => {
                let class = i_class
                    .and_then(|ix| rec.get(ix))
                    .map(parse_class)
                    .unwrap_or(SocialClass::Middle);
                let currency = i_currency
                    .and_then(|ix| rec.get(ix))
                    .map(parse_currency)
                    .unwrap_or(Currency::Usd);
                order.push(household.clone());
                rows.push((class, currency, Vec::new()));
                order.len() - 1
            }
        };
        rows[pos].2.push(DataPoint::new(ts, value));
    }

    order
        .into_iter()
        .zip(rows)
        .enumerate()
        .map(|(i, (id, (class, currency, mut values)))| {
            values.sort_by_key(|p| p.x);
            Series::try_new(id, values, palette[i % palette.len()], currency, class)
                .map_err(Into::into)
        })
        .collect()
}

fn parse_class(s: &str) -> SocialClass {
    match s.trim().to_lowercase().as_str() {
        "working" => SocialClass::Working,
        "upper" => SocialClass::Upper,
        _ => SocialClass::Middle,
    }
}

fn parse_currency(s: &str) -> Currency {
    match s.trim().to_uppercase().as_str() {
        "EUR" => Currency::Eur,
        "GBP" => Currency::Gbp,
        "HUF" => Currency::Huf,
        _ => Currency::Usd,
    }
}
