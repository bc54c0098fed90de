// File: crates/trend-core/src/scene.rs
// Summary: Laid-out render scene: per-series visuals, labels, axes, markers,
// and the (series id, element kind) registry used for emphasis and hit tests.

use std::collections::HashMap;

use skia_safe as skia;

use crate::label::LabelLayout;
use crate::marker::Marker;
use crate::scale::Scales;
use crate::series::Currency;
use crate::types::{RectF, POINT_HIT_RADIUS};

/// Kinds of visual elements a series contributes to a scene. Emphasis and
/// dimming resolve through direct `(id, kind)` lookups instead of scanning
/// everything drawn, so multiple chart instances stay independent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    HoverBuffer,
    LinePath,
    PointMarkers,
    LabelBox,
    LabelText,
    LeaderLine,
}

/// One rendered data point with enough context to fill the tooltip.
#[derive(Clone, Copy, Debug)]
pub struct ScenePoint {
    pub px: f32,
    pub py: f32,
    pub ts: i64,
    pub value_ref: f64,
}

/// Everything drawn for one visible series. The polyline doubles as the
/// hover-buffer geometry: the buffer is the same path hit-tested at the
/// configured width instead of the visual stroke width.
#[derive(Clone, Debug)]
pub struct SeriesVisual {
    pub id: String,
    pub color: skia::Color,
    pub currency: Currency,
    pub polyline: Vec<(f32, f32)>,
    pub points: Vec<ScenePoint>,
}

#[derive(Clone, Debug)]
pub struct MarkerVisual {
    pub marker: Marker,
    pub px: f32,
}

/// One pre-built secondary value axis: the shared tick positions labeled in
/// a currency's native unit. Painted at zero opacity until a series of that
/// currency is highlighted, so hovering never rebuilds an axis.
#[derive(Clone, Debug)]
pub struct CurrencyAxisVisual {
    pub currency: Currency,
    pub ticks: Vec<(f32, String)>,
}

/// What the pointer is over.
#[derive(Clone, Debug, PartialEq)]
pub struct HitTarget {
    pub series_id: String,
    /// Index into the series' `points` when inside a point's hit circle.
    pub point: Option<usize>,
}

/// The output of one full layout pass. A new scene wholly replaces the
/// previous one; nothing drawn earlier survives into the next pass.
pub struct Scene {
    pub plot: RectF,
    pub scales: Scales,
    pub series: Vec<SeriesVisual>,
    pub labels: Vec<LabelLayout>,
    pub markers: Vec<MarkerVisual>,
    pub time_ticks: Vec<(f32, String)>,
    pub value_ticks: Vec<(f32, String)>,
    pub currency_axes: Vec<CurrencyAxisVisual>,
    registry: HashMap<(String, ElementKind), usize>,
}

impl Scene {
    pub(crate) fn new(plot: RectF, scales: Scales) -> Self {
        Self {
            plot,
            scales,
            series: Vec::new(),
            labels: Vec::new(),
            markers: Vec::new(),
            time_ticks: Vec::new(),
            value_ticks: Vec::new(),
            currency_axes: Vec::new(),
            registry: HashMap::new(),
        }
    }

    pub(crate) fn push_series(&mut self, visual: SeriesVisual) {
        let idx = self.series.len();
        for kind in [ElementKind::HoverBuffer, ElementKind::LinePath, ElementKind::PointMarkers] {
            self.registry.insert((visual.id.clone(), kind), idx);
        }
        self.series.push(visual);
    }

    pub(crate) fn push_label(&mut self, label: LabelLayout) {
        let idx = self.labels.len();
        for kind in [ElementKind::LabelBox, ElementKind::LabelText, ElementKind::LeaderLine] {
            self.registry.insert((label.series_id.clone(), kind), idx);
        }
        self.labels.push(label);
    }

    /// Direct registry lookup; the replacement for DOM-wide class selectors.
    pub fn element(&self, id: &str, kind: ElementKind) -> Option<usize> {
        self.registry.get(&(id.to_owned(), kind)).copied()
    }

    pub fn series_visual(&self, id: &str) -> Option<&SeriesVisual> {
        self.element(id, ElementKind::LinePath).and_then(|i| self.series.get(i))
    }

    pub fn label_for(&self, id: &str) -> Option<&LabelLayout> {
        self.element(id, ElementKind::LabelBox).and_then(|i| self.labels.get(i))
    }

    /// Pointer hit test. Series are probed in reverse draw order so the one
    /// painted on top wins where hover buffers overlap; within a hit series,
    /// a nearby data point upgrades the target to that point's hit circle.
    pub fn hit_test(&self, x: f32, y: f32, buffer_width: f32) -> Option<HitTarget> {
        if !self.plot.contains(x, y) {
            return None;
        }
        let half = (buffer_width * 0.5).max(1.0);
        for visual in self.series.iter().rev() {
            if !polyline_within(&visual.polyline, x, y, half) {
                continue;
            }
            let point = visual
                .points
                .iter()
                .position(|p| dist_sq(p.px, p.py, x, y) <= POINT_HIT_RADIUS * POINT_HIT_RADIUS);
            return Some(HitTarget { series_id: visual.id.clone(), point });
        }
        None
    }
}

#[inline]
fn dist_sq(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

fn dist_sq_to_segment(px: f32, py: f32, a: (f32, f32), b: (f32, f32)) -> f32 {
    let (ax, ay) = a;
    let (bx, by) = b;
    let dx = bx - ax;
    let dy = by - ay;
    let len_sq = dx * dx + dy * dy;
    if len_sq <= f32::EPSILON {
        return dist_sq(px, py, ax, ay);
    }
    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    dist_sq(px, py, ax + t * dx, ay + t * dy)
}

fn polyline_within(polyline: &[(f32, f32)], x: f32, y: f32, half_width: f32) -> bool {
    let limit = half_width * half_width;
    if polyline.len() == 1 {
        return dist_sq(x, y, polyline[0].0, polyline[0].1) <= limit;
    }
    polyline
        .windows(2)
        .any(|seg| dist_sq_to_segment(x, y, seg[0], seg[1]) <= limit)
}
