// File: crates/trend-core/src/label.rs
// Summary: End-of-line label placement: fixed slots, leader lines, contrast text.

use skia_safe as skia;

use crate::text::TextShaper;
use crate::types::{RectF, LABEL_PADDING, LABEL_SLOT_SPACING};

pub const LABEL_TEXT_SIZE: f32 = 12.0;

/// Horizontal gap between the plot's right edge and the label column.
const GUTTER_GAP: f32 = 8.0;

const LUMINANCE_THRESHOLD: f32 = 186.0;

/// Perceptual luminance of an sRGB color over 0..255 channels.
pub fn luminance(color: skia::Color) -> f32 {
    0.299 * color.r() as f32 + 0.587 * color.g() as f32 + 0.114 * color.b() as f32
}

/// Black text on light fills, white on dark ones.
pub fn contrast_text_color(fill: skia::Color) -> skia::Color {
    if luminance(fill) >= LUMINANCE_THRESHOLD {
        skia::Color::BLACK
    } else {
        skia::Color::WHITE
    }
}

/// Where a series' label wants its leader line anchored: the pixel position
/// of its last visible point.
#[derive(Clone, Debug)]
pub struct LabelEntry {
    pub series_id: String,
    pub color: skia::Color,
    pub anchor_px: (f32, f32),
}

/// One placed label: background box, text origin/colors, dashed leader line.
#[derive(Clone, Debug)]
pub struct LabelLayout {
    pub series_id: String,
    pub slot: usize,
    pub rect: RectF,
    pub text: String,
    pub text_pos: (f32, f32),
    pub text_color: skia::Color,
    pub fill: skia::Color,
    pub leader_from: (f32, f32),
    pub leader_to: (f32, f32),
}

/// Allocate label slots for the visible series, in data-source order (never
/// hover-dependent): slot N sits at `plot.top + N * LABEL_SLOT_SPACING` in
/// the right gutter, independent of where the series' line ends vertically.
///
/// Entries must only contain series with at least one visible point. A
/// failed text measurement skips that label (the slot stays reserved so the
/// remaining layout is unaffected).
pub fn layout_labels(shaper: &TextShaper, entries: &[LabelEntry], plot: RectF) -> Vec<LabelLayout> {
    let mut out = Vec::with_capacity(entries.len());
    for (slot, entry) in entries.iter().enumerate() {
        let Some(text_w) = shaper.measure_width(&entry.series_id, LABEL_TEXT_SIZE, true) else {
            log::warn!("label measurement failed for '{}'; skipping", entry.series_id);
            continue;
        };
        let box_h = LABEL_TEXT_SIZE + LABEL_PADDING;
        let box_y = plot.top + slot as f32 * LABEL_SLOT_SPACING;
        let rect = RectF::from_ltwh(
            plot.right + GUTTER_GAP,
            box_y,
            text_w + 2.0 * LABEL_PADDING,
            box_h,
        );
        out.push(LabelLayout {
            series_id: entry.series_id.clone(),
            slot,
            rect,
            text: entry.series_id.clone(),
            text_pos: (rect.left + LABEL_PADDING, box_y + box_h * 0.5 + LABEL_TEXT_SIZE * 0.35),
            text_color: contrast_text_color(entry.color),
            fill: entry.color,
            leader_from: entry.anchor_px,
            leader_to: (rect.left, box_y + box_h * 0.5),
        });
    }
    out
}
