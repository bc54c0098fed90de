// File: crates/trend-core/src/tooltip.rs
// Summary: Shared floating tooltip panel, created once per mount and reused.

use crate::axis::format_date;
use crate::series::Currency;

/// Offset of the panel's top-left corner from the pointer, in pixels.
pub const TOOLTIP_OFFSET: (f32, f32) = (14.0, -10.0);

/// The one floating info panel of a chart mount. Hiding it keeps the value
/// around for reuse; it is only dropped when the session unmounts, so no
/// per-hover churn and no leaks across remounts.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
    visible: bool,
    anchor: (f32, f32),
    lines: Vec<String>,
}

impl Tooltip {
    pub(crate) fn mount() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Top-left position of the panel: pointer plus the fixed offset.
    pub fn position(&self) -> (f32, f32) {
        (self.anchor.0 + TOOLTIP_OFFSET.0, self.anchor.1 + TOOLTIP_OFFSET.1)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Fills and moves the shared panel from hover events. Content is derived
/// from the hovered point; the data model is never touched.
pub struct TooltipController;

impl TooltipController {
    /// Pointer entered a data point's hit circle: populate and show.
    pub fn show_point(
        tooltip: &mut Tooltip,
        pointer: (f32, f32),
        value_ref: f64,
        currency: Currency,
        ts_ms: i64,
    ) {
        tooltip.visible = true;
        tooltip.anchor = pointer;
        tooltip.lines = vec![
            format!("{:.2} USD", value_ref),
            format!("{} \u{00b7} {}", currency.code(), format_date(ts_ms)),
        ];
    }

    /// Pointer moved within the same hit circle: follow it.
    pub fn follow(tooltip: &mut Tooltip, pointer: (f32, f32)) {
        if tooltip.visible {
            tooltip.anchor = pointer;
        }
    }

    /// Pointer left the point: hide, keeping the panel for reuse.
    pub fn hide(tooltip: &mut Tooltip) {
        tooltip.visible = false;
    }
}
