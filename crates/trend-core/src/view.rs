// File: crates/trend-core/src/view.rs
// Summary: Mount-scoped chart session: owns the scene cache, highlight state
// machine, and the shared tooltip panel; routes external events.

use anyhow::Result;

use crate::chart::{encode_png, raster_surface, read_rgba8, Chart, RenderOptions};
use crate::highlight::HighlightController;
use crate::range::TimeRange;
use crate::selection::CapWarning;
use crate::series::time_bounds;
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::tooltip::{Tooltip, TooltipController};

/// One mounted chart. Everything that must exist exactly once per mount
/// lives here: the tooltip panel, the text shaper, the highlight state, and
/// the cached scene. Dropping the session is the unmount.
///
/// A relayout happens only when range, selection, or the hover-buffer width
/// change; pointer events toggle visual state and request a repaint at most.
pub struct ChartSession {
    chart: Chart,
    opts: RenderOptions,
    shaper: TextShaper,
    scene: Option<crate::scene::Scene>,
    highlight: HighlightController,
    tooltip: Tooltip,
    bounds: Option<(i64, i64)>,
}

impl ChartSession {
    /// Mount the chart. The tooltip panel is created here, once, and reused
    /// for every hover until the session drops.
    pub fn mount(mut chart: Chart, opts: RenderOptions) -> Self {
        let bounds = time_bounds(&chart.series);
        if let Some(b) = bounds {
            chart.range = chart.range.clamp_to(b);
        }
        Self {
            chart,
            opts,
            shaper: TextShaper::new(),
            scene: None,
            highlight: HighlightController::new(),
            tooltip: Tooltip::mount(),
            bounds,
        }
    }

    pub fn chart(&self) -> &Chart {
        &self.chart
    }

    pub fn options(&self) -> &RenderOptions {
        &self.opts
    }

    pub fn highlight(&self) -> &HighlightController {
        &self.highlight
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    /// Absolute time bounds of the dataset, when it has any points.
    pub fn data_bounds(&self) -> Option<(i64, i64)> {
        self.bounds
    }

    fn invalidate(&mut self) {
        self.scene = None;
    }

    fn ensure_scene(&mut self) {
        if self.scene.is_none() {
            log::debug!(
                "relayout: {} selected, range {}..{}",
                self.chart.selection.len(),
                self.chart.range.start,
                self.chart.range.end
            );
            self.scene = Some(self.chart.layout(&self.shaper, &self.opts));
        }
    }

    /// The current scene, relayouting first if a triggering input changed.
    pub fn scene(&mut self) -> &crate::scene::Scene {
        self.ensure_scene();
        self.scene.as_ref().expect("scene laid out")
    }

    /// Selection UI callback: replace the selection with `ids` (size 0..N).
    /// Returns the soft-cap warning, if one fired; whether the change stuck
    /// is `warning.applied` (policy dependent).
    pub fn on_selection_change(&mut self, ids: &[&str]) -> Option<CapWarning> {
        let warning = self.chart.selection.replace(ids);
        let applied = warning.as_ref().map(|w| w.applied).unwrap_or(true);
        if applied {
            self.drop_hover_state();
            self.invalidate();
        }
        warning
    }

    /// Range UI callback: applied immediately, no commit event awaited.
    /// The window is clamped to the data's absolute bounds.
    pub fn on_range_change(&mut self, start_ms: i64, end_ms: i64) {
        let (lo, hi) = (start_ms.min(end_ms), start_ms.max(end_ms));
        let mut range = TimeRange { start: lo, end: hi };
        if let Some(b) = self.bounds {
            range = range.clamp_to(b);
        }
        if range != self.chart.range {
            self.chart.range = range;
            self.drop_hover_state();
            self.invalidate();
        }
    }

    /// Runtime knob: widen or narrow every series' hover buffer.
    pub fn set_hover_buffer_width(&mut self, width: f32) {
        let width = width.clamp(1.0, 64.0);
        if (width - self.chart.hover_buffer_width).abs() > f32::EPSILON {
            self.chart.hover_buffer_width = width;
            self.invalidate();
        }
    }

    /// Theme swaps repaint but never relayout (geometry is theme-free).
    pub fn set_theme(&mut self, theme: Theme) {
        self.opts.theme = theme;
    }

    pub fn set_canvas_size(&mut self, width: i32, height: i32) {
        if width != self.opts.width || height != self.opts.height {
            self.opts.width = width.max(1);
            self.opts.height = height.max(1);
            self.invalidate();
        }
    }

    /// Pointer moved to canvas position (x, y). Updates highlight and
    /// tooltip state only; returns whether a repaint is needed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.ensure_scene();
        let scene = self.scene.as_ref().expect("scene laid out");
        let hit = scene.hit_test(x, y, self.chart.hover_buffer_width);
        let current = self.highlight.active().map(str::to_owned);
        let mut repaint = false;

        match hit {
            Some(target) => {
                if current.as_deref() != Some(target.series_id.as_str()) {
                    // The pointer has left whatever owned the highlight;
                    // a matching leave precedes the new enter.
                    if let Some(prev) = current.as_deref() {
                        repaint |= self.highlight.pointer_leave(prev);
                    }
                    repaint |= self.highlight.pointer_enter(&target.series_id);
                }
                let owns = self.highlight.active() == Some(target.series_id.as_str());
                match target.point.filter(|_| owns) {
                    Some(idx) => {
                        if let Some(visual) = scene.series_visual(&target.series_id) {
                            if let Some(p) = visual.points.get(idx) {
                                TooltipController::show_point(
                                    &mut self.tooltip,
                                    (x, y),
                                    p.value_ref,
                                    visual.currency,
                                    p.ts,
                                );
                                repaint = true;
                            }
                        }
                    }
                    None => {
                        if self.tooltip.is_visible() {
                            TooltipController::hide(&mut self.tooltip);
                            repaint = true;
                        }
                    }
                }
            }
            None => {
                if let Some(prev) = current.as_deref() {
                    repaint |= self.highlight.pointer_leave(prev);
                }
                if self.tooltip.is_visible() {
                    TooltipController::hide(&mut self.tooltip);
                    repaint = true;
                }
            }
        }
        repaint
    }

    /// Pointer left the chart entirely: highlight resets, tooltip hides.
    pub fn on_pointer_leave(&mut self) -> bool {
        let mut repaint = self.highlight.clear();
        if self.tooltip.is_visible() {
            TooltipController::hide(&mut self.tooltip);
            repaint = true;
        }
        repaint
    }

    fn drop_hover_state(&mut self) {
        self.highlight.clear();
        TooltipController::hide(&mut self.tooltip);
    }

    /// RGBA8 frame of the current state: (pixels, width, height, stride).
    pub fn render_to_rgba8(&mut self) -> Result<(Vec<u8>, i32, i32, usize)> {
        self.ensure_scene();
        let scene = self.scene.as_ref().expect("scene laid out");
        let mut surface =
            raster_surface(&self.chart, scene, &self.highlight, &self.tooltip, &self.shaper, &self.opts)?;
        read_rgba8(&mut surface, &self.opts)
    }

    /// PNG of the current state, highlight and tooltip included.
    pub fn render_to_png_bytes(&mut self) -> Result<Vec<u8>> {
        self.ensure_scene();
        let scene = self.scene.as_ref().expect("scene laid out");
        let mut surface =
            raster_surface(&self.chart, scene, &self.highlight, &self.tooltip, &self.shaper, &self.opts)?;
        encode_png(&mut surface)
    }
}
