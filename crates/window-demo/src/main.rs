// File: crates/window-demo/src/main.rs
// Summary: Minimal windowed demo that renders the chart session to a window
// via RGBA blit (CPU) using winit + softbuffer. Keyboard plays the selection
// and range collaborators; the pointer drives highlight and tooltip.

use chrono::{TimeZone, Utc};
use skia_safe as skia;
use std::num::NonZeroU32;
use trend_core::chart::{Chart, RenderOptions};
use trend_core::marker::Marker;
use trend_core::range::TimeRange;
use trend_core::series::{time_bounds, Currency, DataPoint, Series, SocialClass};
use trend_core::theme;
use trend_core::view::ChartSession;
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

const DEFAULT_SELECTION: [&str; 3] = ["Smith", "Blackwood", "Wilson"];
const HOUSEHOLD_KEYS: [VirtualKeyCode; 6] = [
    VirtualKeyCode::Key1,
    VirtualKeyCode::Key2,
    VirtualKeyCode::Key3,
    VirtualKeyCode::Key4,
    VirtualKeyCode::Key5,
    VirtualKeyCode::Key6,
];

fn main() {
    env_logger::init();

    let series = synth_households();
    let all_ids: Vec<String> = series.iter().map(|s| s.id.clone()).collect();
    let bounds = time_bounds(&series).expect("synthetic data is non-empty");

    let mut chart = Chart::new(series, TimeRange { start: bounds.0, end: bounds.1 });
    chart.markers = vec![
        Marker::new(month_ts(2019, 11), "Crisis"),
        Marker::new(month_ts(2020, 9), "Covid"),
    ];
    chart.selection.reset_to(&DEFAULT_SELECTION);

    let mut session = ChartSession::mount(chart, RenderOptions::default());

    // Local mirrors of the collaborator state (the "modal" and the "slider")
    let mut local_selection: Vec<String> =
        DEFAULT_SELECTION.iter().map(|s| (*s).to_string()).collect();
    let mut cur_range = (bounds.0, bounds.1);
    let mut buffer_width = session.chart().hover_buffer_width;
    let mut theme_idx = 0usize;

    // Window + softbuffer setup
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title("Trendline — Window Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(960.0, 540.0))
        .build(&event_loop)
        .expect("build window");

    let context = unsafe { softbuffer::Context::new(&window) }.expect("softbuffer context");
    let mut surface =
        unsafe { softbuffer::Surface::new(&context, &window) }.expect("softbuffer surface");

    let mut size = window.inner_size();

    event_loop.run(move |event, _, cf| {
        *cf = ControlFlow::Wait;
        match event {
            Event::WindowEvent { event, window_id: _ } => match event {
                WindowEvent::CloseRequested => {
                    *cf = ControlFlow::Exit;
                }
                WindowEvent::Resized(new_size) => {
                    size = new_size;
                    session.set_canvas_size(size.width.max(1) as i32, size.height.max(1) as i32);
                    window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    if session.on_pointer_move(position.x as f32, position.y as f32) {
                        window.request_redraw();
                    }
                }
                WindowEvent::CursorLeft { .. } => {
                    if session.on_pointer_leave() {
                        window.request_redraw();
                    }
                }
                WindowEvent::KeyboardInput { input, .. } => {
                    if input.state != ElementState::Pressed {
                        return;
                    }
                    let Some(key) = input.virtual_keycode else { return };
                    let mut changed = true;
                    match key {
                        k if HOUSEHOLD_KEYS.contains(&k) => {
                            let idx = HOUSEHOLD_KEYS.iter().position(|h| *h == k).unwrap();
                            if let Some(id) = all_ids.get(idx) {
                                toggle(&mut local_selection, id);
                                let ids: Vec<&str> =
                                    local_selection.iter().map(String::as_str).collect();
                                if let Some(warning) = session.on_selection_change(&ids) {
                                    log::warn!("{}", warning.message());
                                    if !warning.applied {
                                        // Rejected: roll the local mirror back
                                        toggle(&mut local_selection, id);
                                    }
                                }
                            }
                        }
                        VirtualKeyCode::R => {
                            local_selection =
                                DEFAULT_SELECTION.iter().map(|s| (*s).to_string()).collect();
                            let ids: Vec<&str> =
                                local_selection.iter().map(String::as_str).collect();
                            session.on_selection_change(&ids);
                            cur_range = bounds;
                            session.on_range_change(cur_range.0, cur_range.1);
                        }
                        VirtualKeyCode::Left | VirtualKeyCode::Right => {
                            let span = cur_range.1 - cur_range.0;
                            let step = span / 10;
                            let delta = if key == VirtualKeyCode::Left { -step } else { step };
                            cur_range = (cur_range.0 + delta, cur_range.1 + delta);
                            session.on_range_change(cur_range.0, cur_range.1);
                            cur_range = (session.chart().range.start, session.chart().range.end);
                        }
                        VirtualKeyCode::Up | VirtualKeyCode::Down => {
                            let span = cur_range.1 - cur_range.0;
                            let step = span / 10;
                            let delta = if key == VirtualKeyCode::Up { step } else { -step };
                            cur_range = (cur_range.0 + delta, cur_range.1 - delta);
                            if cur_range.1 <= cur_range.0 {
                                cur_range = (cur_range.0, cur_range.0 + 1);
                            }
                            session.on_range_change(cur_range.0, cur_range.1);
                            cur_range = (session.chart().range.start, session.chart().range.end);
                        }
                        VirtualKeyCode::LBracket => {
                            buffer_width = (buffer_width - 2.0).max(4.0);
                            session.set_hover_buffer_width(buffer_width);
                        }
                        VirtualKeyCode::RBracket => {
                            buffer_width = (buffer_width + 2.0).min(40.0);
                            session.set_hover_buffer_width(buffer_width);
                        }
                        VirtualKeyCode::T => {
                            let presets = theme::presets();
                            theme_idx = (theme_idx + 1) % presets.len();
                            session.set_theme(presets[theme_idx]);
                        }
                        _ => changed = false,
                    }
                    if changed {
                        window.set_title(&format!(
                            "Trendline — {} selected, buffer {:.0}px",
                            session.chart().selection.len(),
                            buffer_width
                        ));
                        window.request_redraw();
                    }
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let w = size.width.max(1);
                let h = size.height.max(1);
                surface
                    .resize(NonZeroU32::new(w).unwrap(), NonZeroU32::new(h).unwrap())
                    .ok();

                let (rgba, _fw, _fh, _stride) =
                    session.render_to_rgba8().expect("render rgba");
                let mut frame = surface.buffer_mut().expect("frame");
                let max_px = frame.len().min(rgba.len() / 4).min((w * h) as usize);
                for (i, px) in rgba.chunks_exact(4).take(max_px).enumerate() {
                    let r = px[0] as u32;
                    let g = px[1] as u32;
                    let b = px[2] as u32;
                    let a = px[3] as u32;
                    // Softbuffer expects ARGB/BGRA depending on platform; ARGB is common.
                    frame[i] = (a << 24) | (r << 16) | (g << 8) | b;
                }
                if let Err(e) = frame.present() {
                    eprintln!("present error: {e:?}");
                }
            }
            _ => {}
        }
    });
}

fn toggle(selection: &mut Vec<String>, id: &str) {
    if let Some(pos) = selection.iter().position(|s| s == id) {
        selection.remove(pos);
    } else {
        selection.push(id.to_string());
    }
}

fn month_ts(year: i32, month: u32) -> i64 {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("valid month start")
        .timestamp_millis()
}

/// Same deterministic generator as the headless demo: 30 monthly points per
/// household with crisis and covid shocks.
fn synth_households() -> Vec<Series> {
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

    let specs = [
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

    specs
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
