use std::sync::Arc;
use std::time::Instant;

use chrono::{Local, Timelike};
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use clockface::{palette, Clock, ClockConfig, ClockTime, EventEntry, RasterSurface};

/// Redraw cadence of the external scheduler.
const FRAMES_PER_SECOND: f64 = 30.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = ClockConfig::builder().effect_width(2).use_12(false).build();
    let mut clock = Clock::new(config);
    clock.set_events(demo_events());

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("clockface")
        .with_inner_size(LogicalSize::new(500.0, 500.0))
        .build(&event_loop)?;
    let window = Arc::new(window);
    let window_clone = window.clone();

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let mut surface = RasterSurface::new(size.width as usize, size.height as usize);
    match load_system_font() {
        Some(data) => {
            if let Err(err) = surface.install_font(data) {
                log::warn!("system font rejected: {err}");
            }
        }
        None => log::warn!("no system sans-serif font found; labels disabled"),
    }
    clock.resize(size.width as f64, size.height as f64);

    let frame_duration = std::time::Duration::from_secs_f64(1.0 / FRAMES_PER_SECOND);
    let mut last_frame = Instant::now();

    event_loop.run(move |event, window_target| {
        window_target.set_control_flow(ControlFlow::Poll);
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    if new_size.width > 0 && new_size.height > 0 {
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        surface.resize(new_size.width as usize, new_size.height as usize);
                        clock.resize(new_size.width as f64, new_size.height as f64);
                    }
                }
                WindowEvent::RedrawRequested => {
                    clock.render_frame(&mut surface, local_time());
                    pixels.frame_mut().copy_from_slice(surface.frame());
                    if let Err(err) = pixels.render() {
                        log::error!("render failed: {err}");
                        window_target.exit();
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                if last_frame.elapsed() >= frame_duration {
                    window_clone.request_redraw();
                    last_frame = Instant::now();
                }
            }
            _ => {}
        }
    })?;

    Ok(())
}

/// Sample the local wall clock.
fn local_time() -> ClockTime {
    let now = Local::now();
    ClockTime::new(
        now.hour(),
        now.minute(),
        now.second(),
        now.timestamp_subsec_millis().min(999),
    )
}

/// Find a sans-serif face among the installed system fonts.
fn load_system_font() -> Option<Vec<u8>> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    let query = fontdb::Query {
        families: &[fontdb::Family::SansSerif],
        weight: fontdb::Weight::NORMAL,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };
    let id = db.query(&query)?;
    db.with_face_data(id, |data, _index| data.to_vec())
}

/// Sample schedule rendered as arc bands around the hour legend.
fn demo_events() -> Vec<EventEntry> {
    vec![
        EventEntry {
            hour_ranges: vec![(8.0, 12.0), (13.0, 17.0)],
            level: 2,
            color: palette::EVENT[6],
        },
        EventEntry {
            hour_ranges: vec![(11.0, 12.0), (13.0, 20.0)],
            level: 1,
            color: palette::EVENT[9],
        },
        EventEntry {
            hour_ranges: vec![(22.0, 5.0)],
            level: 3,
            color: palette::EVENT[3],
        },
        EventEntry {
            hour_ranges: vec![(7.9, 9.0)],
            level: 4,
            color: palette::EVENT[11],
        },
    ]
}
