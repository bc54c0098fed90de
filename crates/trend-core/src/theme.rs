// File: crates/trend-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use skia_safe as skia;

#[derive(Clone, Copy, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: skia::Color,
    pub grid: skia::Color,
    pub axis_line: skia::Color,
    pub axis_label: skia::Color,
    pub tick: skia::Color,
    pub marker_line: skia::Color,
    pub marker_label: skia::Color,
    pub tooltip_bg: skia::Color,
    pub tooltip_text: skia::Color,
    /// Alpha applied to every element of a dimmed series.
    pub dim_alpha: u8,
    /// Fill used when hover buffers are painted for diagnostics.
    pub hit_region_debug: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: skia::Color::from_argb(255, 18, 18, 20),
            grid: skia::Color::from_argb(255, 40, 40, 45),
            axis_line: skia::Color::from_argb(255, 180, 180, 190),
            axis_label: skia::Color::from_argb(255, 235, 235, 245),
            tick: skia::Color::from_argb(255, 150, 150, 160),
            marker_line: skia::Color::from_argb(255, 128, 128, 136),
            marker_label: skia::Color::from_argb(255, 210, 210, 220),
            tooltip_bg: skia::Color::from_argb(235, 32, 32, 38),
            tooltip_text: skia::Color::from_argb(255, 235, 235, 245),
            dim_alpha: 64,
            hit_region_debug: skia::Color::from_argb(40, 255, 230, 70),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: skia::Color::from_argb(255, 250, 250, 252),
            grid: skia::Color::from_argb(255, 230, 230, 235),
            axis_line: skia::Color::from_argb(255, 60, 60, 70),
            axis_label: skia::Color::from_argb(255, 20, 20, 30),
            tick: skia::Color::from_argb(255, 100, 100, 110),
            marker_line: skia::Color::from_argb(255, 150, 150, 158),
            marker_label: skia::Color::from_argb(255, 60, 60, 70),
            tooltip_bg: skia::Color::from_argb(240, 255, 255, 255),
            tooltip_text: skia::Color::from_argb(255, 20, 20, 30),
            dim_alpha: 56,
            hit_region_debug: skia::Color::from_argb(36, 30, 120, 240),
        }
    }

    pub fn high_contrast_dark() -> Self {
        Self {
            name: "high-contrast-dark",
            background: skia::Color::from_argb(255, 0x00, 0x00, 0x00),
            grid: skia::Color::from_argb(255, 0x22, 0x22, 0x22),
            axis_line: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            axis_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tick: skia::Color::from_argb(255, 0xcc, 0xcc, 0xcc),
            marker_line: skia::Color::from_argb(255, 0xff, 0xff, 0x00),
            marker_label: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            tooltip_bg: skia::Color::from_argb(255, 0x11, 0x11, 0x11),
            tooltip_text: skia::Color::from_argb(255, 0xff, 0xff, 0xff),
            dim_alpha: 80,
            hit_region_debug: skia::Color::from_argb(48, 0x00, 0xff, 0xff),
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light(), Theme::high_contrast_dark()]
}

/// Find a theme by its `name`, falling back to dark.
pub fn find(name: &str) -> Theme {
    for t in presets() {
        if t.name.eq_ignore_ascii_case(name) {
            return t;
        }
    }
    Theme::dark()
}
