// File: crates/trend-core/src/chart.rs
// Summary: Chart orchestration: the layout pass (filter, normalize, scale,
// place) and the read-only paint pass over a laid-out scene.

use anyhow::Result;
use skia_safe as skia;

use crate::axis::{format_time_label, format_value, time_ticks, value_ticks};
use crate::currency::ExchangeRates;
use crate::highlight::{Emphasis, HighlightController};
use crate::label::{layout_labels, LabelEntry};
use crate::marker::{visible_markers, Marker};
use crate::range::{visible_slice, TimeRange};
use crate::scale::Scales;
use crate::scene::{CurrencyAxisVisual, MarkerVisual, Scene, ScenePoint, SeriesVisual};
use crate::selection::Selection;
use crate::series::{Currency, Series};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::tooltip::Tooltip;
use crate::types::{clamp, Insets, RectF, HEIGHT, HOVER_BUFFER_WIDTH, WIDTH};

const AXIS_TEXT_SIZE: f32 = 11.0;
const VALUE_TICK_TARGET: usize = 6;
const TIME_TICK_MIN_PX: f32 = 72.0;
const LINE_STROKE_WIDTH: f32 = 2.0;
const ACTIVE_STROKE_WIDTH: f32 = 3.0;
const POINT_RADIUS: f32 = 3.5;
const TOOLTIP_TEXT_SIZE: f32 = 12.0;
const TOOLTIP_PADDING: f32 = 8.0;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    pub insets: Insets,
    pub theme: Theme,
    /// Disable all text rendering (axis ticks, labels) for deterministic
    /// snapshot output.
    pub draw_labels: bool,
    /// Paint the normally invisible hover buffers for diagnostics.
    pub debug_hit_regions: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::dark(),
            draw_labels: true,
            debug_hit_regions: false,
        }
    }
}

/// The full input of a render pass: immutable series data plus the current
/// selection, range, rate table, markers, and variant flags. Pointer state
/// lives outside (HighlightController / Tooltip) and only affects paint.
pub struct Chart {
    pub series: Vec<Series>,
    pub selection: Selection,
    pub range: TimeRange,
    pub rates: ExchangeRates,
    pub markers: Vec<Marker>,
    pub hover_buffer_width: f32,
    /// Draw per-point circles (and enable point tooltips).
    pub show_points: bool,
    /// Pre-build per-currency secondary axes.
    pub currency_axes: bool,
}

impl Chart {
    pub fn new(series: Vec<Series>, range: TimeRange) -> Self {
        Self {
            series,
            selection: Selection::default(),
            range,
            rates: ExchangeRates::default(),
            markers: Vec::new(),
            hover_buffer_width: HOVER_BUFFER_WIDTH,
            show_points: true,
            currency_axes: true,
        }
    }

    pub fn plot_rect(opts: &RenderOptions) -> RectF {
        RectF::from_ltrb(
            opts.insets.left as f32,
            opts.insets.top as f32,
            (opts.width - opts.insets.right as i32) as f32,
            (opts.height - opts.insets.bottom as i32) as f32,
        )
    }

    /// Series that are both selected and have at least one visible point,
    /// in data-source order (stable under selection churn).
    fn visible_series(&self) -> Vec<&Series> {
        self.series
            .iter()
            .filter(|s| self.selection.contains(&s.id) && !visible_slice(s, self.range).is_empty())
            .collect()
    }

    /// The full layout pass. Returns a fresh scene; the caller swaps it in
    /// for whatever was rendered before, so stale elements cannot pile up
    /// across renders.
    pub fn layout(&self, shaper: &TextShaper, opts: &RenderOptions) -> Scene {
        let plot = Self::plot_rect(opts);
        let scales = Scales::compute(&self.series, &self.selection, self.range, &self.rates, plot);
        let mut scene = Scene::new(plot, scales);

        // Axis ticks
        let (tticks, tstep) = time_ticks(
            self.range.start,
            self.range.end,
            scales.time.px_per_ms(),
            TIME_TICK_MIN_PX,
        );
        scene.time_ticks = tticks
            .iter()
            .map(|&t| (scales.time.to_px(t), format_time_label(t, tstep)))
            .collect();
        let (vticks, vstep) = value_ticks(scales.value.vmax, VALUE_TICK_TARGET);
        scene.value_ticks = vticks
            .iter()
            .map(|&v| (scales.value.to_px(v), format_value(v, vstep)))
            .collect();

        let visible = self.visible_series();

        // Secondary axes: one per currency present in the selection, labeled
        // in native units over the same pixel ticks.
        if self.currency_axes {
            for currency in Currency::ALL {
                if !visible.iter().any(|s| s.currency == currency) {
                    continue;
                }
                let rate = self.rates.rate(currency).unwrap_or(1.0);
                let native_step = vstep / rate;
                let ticks = vticks
                    .iter()
                    .map(|&v| (scales.value.to_px(v), format_value(v / rate, native_step)))
                    .collect();
                scene.currency_axes.push(CurrencyAxisVisual { currency, ticks });
            }
        }

        // Series geometry: shared polyline for the visible stroke and the
        // wider transparent hover buffer.
        for s in &visible {
            let pts = visible_slice(s, self.range);
            let polyline: Vec<(f32, f32)> = pts
                .iter()
                .map(|p| {
                    (
                        scales.time.to_px(p.x),
                        scales.value.to_px(self.rates.normalize(p.y, s.currency)),
                    )
                })
                .collect();
            let points = if self.show_points {
                pts.iter()
                    .zip(polyline.iter())
                    .map(|(p, &(px, py))| ScenePoint {
                        px,
                        py,
                        ts: p.x,
                        value_ref: self.rates.normalize(p.y, s.currency),
                    })
                    .collect()
            } else {
                Vec::new()
            };
            scene.push_series(SeriesVisual {
                id: s.id.clone(),
                color: s.color,
                currency: s.currency,
                polyline,
                points,
            });
        }

        // End-of-line labels, slots in data-source order.
        let entries: Vec<LabelEntry> = scene
            .series
            .iter()
            .filter_map(|v| {
                v.polyline.last().map(|&anchor| LabelEntry {
                    series_id: v.id.clone(),
                    color: v.color,
                    anchor_px: anchor,
                })
            })
            .collect();
        for label in layout_labels(shaper, &entries, plot) {
            scene.push_label(label);
        }

        // Markers outside the range are omitted entirely, not clipped.
        scene.markers = visible_markers(&self.markers, self.range)
            .into_iter()
            .map(|m| {
                let px = scales.time.to_px(m.at);
                MarkerVisual { marker: m, px }
            })
            .collect();

        scene
    }

    /// Paint a laid-out scene. Reads highlight/tooltip state, never mutates
    /// it, and never re-runs layout: hover changes are attribute toggles.
    pub fn paint(
        &self,
        scene: &Scene,
        highlight: &HighlightController,
        tooltip: &Tooltip,
        canvas: &skia::Canvas,
        shaper: &TextShaper,
        opts: &RenderOptions,
    ) {
        let theme = &opts.theme;
        canvas.clear(theme.background);

        draw_grid(canvas, scene, theme);
        draw_axes(canvas, scene, shaper, highlight, self.currency_axes, opts);

        for visual in &scene.series {
            let emphasis = highlight.emphasis(&visual.id);
            let alpha = match emphasis {
                Emphasis::Dimmed => theme.dim_alpha,
                _ => 255,
            };

            // The hover buffer shares the line geometry and is normally
            // invisible; its job is hit testing at the configured width.
            if opts.debug_hit_regions {
                stroke_polyline(
                    canvas,
                    &visual.polyline,
                    theme.hit_region_debug,
                    self.hover_buffer_width,
                    false,
                );
            }

            let width = if emphasis == Emphasis::Active {
                ACTIVE_STROKE_WIDTH
            } else {
                LINE_STROKE_WIDTH
            };
            stroke_polyline(canvas, &visual.polyline, with_alpha(visual.color, alpha), width, false);

            // Data points fade in only on the active series.
            if self.show_points && emphasis == Emphasis::Active {
                let mut paint = skia::Paint::default();
                paint.set_anti_alias(true);
                paint.set_color(visual.color);
                for p in &visual.points {
                    canvas.draw_circle((p.px, p.py), POINT_RADIUS, &paint);
                }
            }
        }

        for label in &scene.labels {
            let emphasis = highlight.emphasis(&label.series_id);
            let alpha = match emphasis {
                Emphasis::Dimmed => theme.dim_alpha,
                _ => 255,
            };

            stroke_polyline(
                canvas,
                &[label.leader_from, label.leader_to],
                with_alpha(label.fill, alpha),
                1.0,
                true,
            );

            let mut box_paint = skia::Paint::default();
            box_paint.set_anti_alias(true);
            box_paint.set_color(with_alpha(label.fill, alpha));
            let rect = skia::Rect::from_ltrb(
                label.rect.left,
                label.rect.top,
                label.rect.right,
                label.rect.bottom,
            );
            canvas.draw_round_rect(rect, 3.0, 3.0, &box_paint);

            if opts.draw_labels {
                shaper.draw_left(
                    canvas,
                    &label.text,
                    label.text_pos.0,
                    label.text_pos.1,
                    crate::label::LABEL_TEXT_SIZE,
                    with_alpha(label.text_color, alpha),
                    true,
                );
            }
        }

        draw_markers(canvas, scene, shaper, opts);
        draw_tooltip(canvas, tooltip, shaper, opts);
    }

    /// Render the chart (idle pointer state) to a PNG at `output_png_path`
    /// using a CPU raster surface.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// In-memory PNG of the idle chart.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let shaper = TextShaper::new();
        let scene = self.layout(&shaper, opts);
        let highlight = HighlightController::new();
        let tooltip = Tooltip::default();
        let mut surface = raster_surface(self, &scene, &highlight, &tooltip, &shaper, opts)?;
        encode_png(&mut surface)
    }

    /// RGBA8 buffer of the idle chart: (pixels, width, height, stride).
    pub fn render_to_rgba8(&self, opts: &RenderOptions) -> Result<(Vec<u8>, i32, i32, usize)> {
        let shaper = TextShaper::new();
        let scene = self.layout(&shaper, opts);
        let highlight = HighlightController::new();
        let tooltip = Tooltip::default();
        let mut surface = raster_surface(self, &scene, &highlight, &tooltip, &shaper, opts)?;
        read_rgba8(&mut surface, opts)
    }
}

// ---- paint helpers ----------------------------------------------------------

fn with_alpha(color: skia::Color, alpha: u8) -> skia::Color {
    skia::Color::from_argb(alpha, color.r(), color.g(), color.b())
}

fn stroke_polyline(
    canvas: &skia::Canvas,
    polyline: &[(f32, f32)],
    color: skia::Color,
    width: f32,
    dashed: bool,
) {
    if polyline.len() < 2 {
        return;
    }
    let mut builder = skia::PathBuilder::new();
    builder.move_to(polyline[0]);
    for &p in polyline.iter().skip(1) {
        builder.line_to(p);
    }
    let path = builder.detach();
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    if dashed {
        paint.set_path_effect(skia::dash_path_effect::new(&[5.0, 4.0], 0.0));
    }
    canvas.draw_path(&path, &paint);
}

fn draw_grid(canvas: &skia::Canvas, scene: &Scene, theme: &Theme) {
    let plot = scene.plot;
    let mut paint = skia::Paint::default();
    paint.set_color(theme.grid);
    paint.set_anti_alias(true);
    paint.set_stroke_width(1.0);
    for &(px, _) in &scene.time_ticks {
        canvas.draw_line((px, plot.top), (px, plot.bottom), &paint);
    }
    for &(py, _) in &scene.value_ticks {
        canvas.draw_line((plot.left, py), (plot.right, py), &paint);
    }
}

fn draw_axes(
    canvas: &skia::Canvas,
    scene: &Scene,
    shaper: &TextShaper,
    highlight: &HighlightController,
    currency_axes: bool,
    opts: &RenderOptions,
) {
    let theme = &opts.theme;
    let plot = scene.plot;

    let mut axis_paint = skia::Paint::default();
    axis_paint.set_color(theme.axis_line);
    axis_paint.set_anti_alias(true);
    axis_paint.set_stroke_width(1.5);
    canvas.draw_line((plot.left, plot.bottom), (plot.right, plot.bottom), &axis_paint);
    canvas.draw_line((plot.left, plot.top), (plot.left, plot.bottom), &axis_paint);

    if !opts.draw_labels {
        return;
    }

    // Which pre-built currency axis, if any, is at full opacity right now.
    let active_axis = if currency_axes {
        highlight
            .active()
            .and_then(|id| scene.series_visual(id))
            .map(|v| v.currency)
            .and_then(|c| scene.currency_axes.iter().find(|a| a.currency == c))
    } else {
        None
    };

    for &(px, ref text) in &scene.time_ticks {
        let w = shaper
            .measure_width(text, AXIS_TEXT_SIZE, false)
            .unwrap_or(text.len() as f32 * AXIS_TEXT_SIZE * 0.6);
        shaper.draw_left(
            canvas,
            text,
            px - w * 0.5,
            plot.bottom + AXIS_TEXT_SIZE + 8.0,
            AXIS_TEXT_SIZE,
            theme.tick,
            false,
        );
    }

    // Primary (normalized) labels dim while a currency axis is showing.
    let primary_color = if active_axis.is_some() {
        with_alpha(theme.tick, theme.dim_alpha)
    } else {
        theme.tick
    };
    for &(py, ref text) in &scene.value_ticks {
        let w = shaper
            .measure_width(text, AXIS_TEXT_SIZE, false)
            .unwrap_or(text.len() as f32 * AXIS_TEXT_SIZE * 0.6);
        shaper.draw_left(
            canvas,
            text,
            plot.left - w - 8.0,
            py + AXIS_TEXT_SIZE * 0.35,
            AXIS_TEXT_SIZE,
            primary_color,
            false,
        );
    }

    // All currency axes exist in the scene; only the active one is painted
    // visibly (the rest stay at zero opacity, i.e. untouched pixels).
    if let Some(axis) = active_axis {
        for &(py, ref text) in &axis.ticks {
            shaper.draw_left(
                canvas,
                text,
                plot.left + 6.0,
                py + AXIS_TEXT_SIZE * 0.35,
                AXIS_TEXT_SIZE,
                theme.axis_label,
                false,
            );
        }
        shaper.draw_left(
            canvas,
            axis.currency.code(),
            plot.left + 6.0,
            plot.top - 6.0,
            AXIS_TEXT_SIZE,
            theme.axis_label,
            true,
        );
    }
}

fn draw_markers(canvas: &skia::Canvas, scene: &Scene, shaper: &TextShaper, opts: &RenderOptions) {
    let theme = &opts.theme;
    let plot = scene.plot;
    for mv in &scene.markers {
        stroke_polyline(
            canvas,
            &[(mv.px, plot.top), (mv.px, plot.bottom)],
            theme.marker_line,
            1.0,
            true,
        );
        if opts.draw_labels {
            let w = shaper
                .measure_width(&mv.marker.label, AXIS_TEXT_SIZE, true)
                .unwrap_or(mv.marker.label.len() as f32 * AXIS_TEXT_SIZE * 0.6);
            shaper.draw_left(
                canvas,
                &mv.marker.label,
                mv.px - w * 0.5,
                plot.top - 10.0,
                AXIS_TEXT_SIZE,
                theme.marker_label,
                true,
            );
        }
    }
}

fn draw_tooltip(canvas: &skia::Canvas, tooltip: &Tooltip, shaper: &TextShaper, opts: &RenderOptions) {
    if !tooltip.is_visible() || tooltip.lines().is_empty() {
        return;
    }
    let theme = &opts.theme;
    let line_h = TOOLTIP_TEXT_SIZE + 4.0;
    let mut max_w = 0.0f32;
    for line in tooltip.lines() {
        let w = shaper
            .measure_width(line, TOOLTIP_TEXT_SIZE, false)
            .unwrap_or(line.len() as f32 * TOOLTIP_TEXT_SIZE * 0.6);
        max_w = max_w.max(w);
    }
    let box_w = max_w + 2.0 * TOOLTIP_PADDING;
    let box_h = tooltip.lines().len() as f32 * line_h + 2.0 * TOOLTIP_PADDING;

    let (mut x, mut y) = tooltip.position();
    x = clamp(x, 0.0, (opts.width as f32 - box_w).max(0.0));
    y = clamp(y, 0.0, (opts.height as f32 - box_h).max(0.0));

    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_color(theme.tooltip_bg);
    canvas.draw_round_rect(skia::Rect::from_xywh(x, y, box_w, box_h), 4.0, 4.0, &paint);

    for (i, line) in tooltip.lines().iter().enumerate() {
        shaper.draw_left(
            canvas,
            line,
            x + TOOLTIP_PADDING,
            y + TOOLTIP_PADDING + (i as f32 + 1.0) * line_h - 4.0,
            TOOLTIP_TEXT_SIZE,
            theme.tooltip_text,
            i == 0,
        );
    }
}

// ---- surface pipeline -------------------------------------------------------

pub(crate) fn raster_surface(
    chart: &Chart,
    scene: &Scene,
    highlight: &HighlightController,
    tooltip: &Tooltip,
    shaper: &TextShaper,
    opts: &RenderOptions,
) -> Result<skia::Surface> {
    let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
        .ok_or_else(|| anyhow::anyhow!("failed to create raster surface"))?;
    chart.paint(scene, highlight, tooltip, surface.canvas(), shaper, opts);
    Ok(surface)
}

pub(crate) fn encode_png(surface: &mut skia::Surface) -> Result<Vec<u8>> {
    let image = surface.image_snapshot();
    #[allow(deprecated)]
    let data = image
        .encode_to_data(skia::EncodedImageFormat::PNG)
        .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
    Ok(data.as_bytes().to_vec())
}

pub(crate) fn read_rgba8(
    surface: &mut skia::Surface,
    opts: &RenderOptions,
) -> Result<(Vec<u8>, i32, i32, usize)> {
    let info = skia::ImageInfo::new(
        (opts.width, opts.height),
        skia::ColorType::RGBA8888,
        skia::AlphaType::Unpremul,
        None,
    );
    let row_bytes = opts.width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * opts.height as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        anyhow::bail!("failed to read back RGBA pixels");
    }
    Ok((pixels, opts.width, opts.height, row_bytes))
}
