use std::f64::consts::TAU;

use log::warn;
use rusttype::{point, Font, Scale};
use thiserror::Error;

use crate::config::{palette, Color};
use crate::surface::{FontSpec, Surface, TextSize};

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("font data could not be decoded")]
    FontDecode,
}

/// 2D affine transform, canvas layout: x' = a·x + c·y + e, y' = b·x + d·y + f.
#[derive(Debug, Clone, Copy)]
struct Transform {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Transform {
    fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.e += self.a * dx + self.c * dy;
        self.f += self.b * dx + self.d * dy;
    }

    fn rotate(&mut self, radians: f64) {
        let (sin, cos) = radians.sin_cos();
        let Self { a, b, c, d, .. } = *self;
        self.a = a * cos + c * sin;
        self.b = b * cos + d * sin;
        self.c = c * cos - a * sin;
        self.d = d * cos - b * sin;
    }
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    transform: Transform,
    fill: Color,
    alpha: f64,
    font_px: f64,
}

impl DrawState {
    fn new() -> Self {
        Self {
            transform: Transform::identity(),
            fill: palette::SHADOW,
            alpha: 1.0,
            font_px: 10.0,
        }
    }
}

/// Software-rasterizing [`Surface`] over an owned RGBA8 frame.
///
/// Paths are flattened to device-space polylines as they are built (the
/// current transform applies at append time) and filled with an even-odd
/// scanline pass; pixels blend source-over at the current global alpha.
/// Text goes through `rusttype` against a single installed typeface — the
/// face serves every requested family and weight. Without a typeface,
/// text operations are logged no-ops.
pub struct RasterSurface {
    width: usize,
    height: usize,
    frame: Vec<u8>,
    background: Color,
    typeface: Option<Font<'static>>,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<(f64, f64)>,
    warned_no_font: bool,
}

impl RasterSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let mut surface = Self {
            width,
            height,
            frame: vec![0; width * height * 4],
            background: palette::LIGHT,
            typeface: None,
            state: DrawState::new(),
            stack: Vec::new(),
            path: Vec::new(),
            warned_no_font: false,
        };
        surface.clear();
        surface
    }

    /// Decode and install the typeface used for labels.
    pub fn install_font(&mut self, data: Vec<u8>) -> Result<(), SurfaceError> {
        self.typeface = Some(Font::try_from_vec(data).ok_or(SurfaceError::FontDecode)?);
        Ok(())
    }

    pub fn has_font(&self) -> bool {
        self.typeface.is_some()
    }

    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// Reallocate the frame for a new viewport. Drawing state is kept.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.frame = vec![0; width * height * 4];
        self.clear();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The RGBA8 frame, row-major, `width * height * 4` bytes.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Color of a single pixel; out-of-bounds reads the background.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return self.background;
        }
        let idx = (y * self.width + x) * 4;
        Color::new(self.frame[idx], self.frame[idx + 1], self.frame[idx + 2])
    }

    fn blend_pixel(&mut self, x: i64, y: i64, color: Color, alpha: f64) {
        if x < 0 || y < 0 || alpha <= 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        let idx = (y * self.width + x) * 4;
        let dst = &mut self.frame[idx..idx + 4];
        dst[0] = (color.r as f64 * a + dst[0] as f64 * (1.0 - a)).round() as u8;
        dst[1] = (color.g as f64 * a + dst[1] as f64 * (1.0 - a)).round() as u8;
        dst[2] = (color.b as f64 * a + dst[2] as f64 * (1.0 - a)).round() as u8;
        dst[3] = 0xff;
    }

    fn push_point(&mut self, x: f64, y: f64) {
        let device = self.state.transform.apply(x, y);
        self.path.push(device);
    }

    fn warn_no_font(&mut self) {
        if !self.warned_no_font {
            warn!("no typeface installed; labels will not be drawn");
            self.warned_no_font = true;
        }
    }
}

/// Signed sweep for canvas arc semantics: clockwise sweeps lift `end` by
/// full turns until it is at or past `start`, counterclockwise mirrored,
/// and a span of 2π or more in either direction is a full circle.
fn arc_sweep(start: f64, end: f64, counterclockwise: bool) -> f64 {
    let span = end - start;
    if span.abs() >= TAU {
        return if counterclockwise { -TAU } else { TAU };
    }
    if counterclockwise {
        -((start - end).rem_euclid(TAU))
    } else {
        span.rem_euclid(TAU)
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (f64, f64) {
        (self.width as f64, self.height as f64)
    }

    fn clear(&mut self) {
        let (r, g, b) = self.background.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform.translate(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.state.transform.rotate(radians);
    }

    fn set_fill(&mut self, color: Color) {
        self.state.fill = color;
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
    }

    fn set_font_size(&mut self, px: f64) {
        self.state.font_px = px;
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.push_point(x, y);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, counterclockwise: bool) {
        let sweep = arc_sweep(start, end, counterclockwise);
        // Chord length ~3 px keeps the flattening error well under a pixel
        // at clock scales.
        let steps = ((sweep.abs() * radius.max(1.0) / 3.0).ceil() as usize).clamp(8, 720);
        for i in 0..=steps {
            let theta = start + sweep * i as f64 / steps as f64;
            self.push_point(cx + radius * theta.cos(), cy + radius * theta.sin());
        }
    }

    fn close_path(&mut self) {
        // The scanline fill always closes the polygon implicitly.
    }

    fn fill(&mut self) {
        if self.path.len() < 3 {
            return;
        }
        let pts = self.path.clone();
        let fill = self.state.fill;
        let alpha = self.state.alpha;

        let top = pts.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let bottom = pts.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        let min_y = top.floor().max(0.0) as i64;
        let max_y = bottom.ceil().min(self.height as f64) as i64;

        let mut crossings: Vec<f64> = Vec::new();
        for y in min_y..max_y {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for i in 0..pts.len() {
                let (x0, y0) = pts[i];
                let (x1, y1) = pts[(i + 1) % pts.len()];
                if (y0 <= yc) != (y1 <= yc) {
                    crossings.push(x0 + (yc - y0) / (y1 - y0) * (x1 - x0));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                let x0 = pair[0].round() as i64;
                let x1 = pair[1].round() as i64;
                for x in x0..x1 {
                    self.blend_pixel(x, y, fill, alpha);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let Some(typeface) = self.typeface.clone() else {
            self.warn_no_font();
            return;
        };
        let scale = Scale::uniform(self.state.font_px as f32);
        // Labels are axis-aligned: only the translation of the current
        // transform applies to the anchor.
        let (ax, ay) = self.state.transform.apply(x, y);
        let fill = self.state.fill;
        let alpha = self.state.alpha;
        let glyphs: Vec<_> = typeface
            .layout(text, scale, point(ax as f32, ay as f32))
            .collect();
        for glyph in glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                glyph.draw(|gx, gy, coverage| {
                    self.blend_pixel(
                        bb.min.x as i64 + gx as i64,
                        bb.min.y as i64 + gy as i64,
                        fill,
                        coverage as f64 * alpha,
                    );
                });
            }
        }
    }

    fn measure_text(&mut self, font: &FontSpec, text: &str) -> TextSize {
        let Some(typeface) = &self.typeface else {
            self.warn_no_font();
            return TextSize::ZERO;
        };
        let scale = Scale::uniform(font.size_px as f32);
        let v_metrics = typeface.v_metrics(scale);
        let glyphs: Vec<_> = typeface.layout(text, scale, point(0.0, 0.0)).collect();
        let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
        for glyph in &glyphs {
            if let Some(bb) = glyph.pixel_bounding_box() {
                min_x = min_x.min(bb.min.x);
                max_x = max_x.max(bb.max.x);
            }
        }
        let width = if max_x > min_x {
            (max_x - min_x) as f64
        } else {
            0.0
        };
        TextSize {
            width,
            height: (v_metrics.ascent - v_metrics.descent) as f64,
        }
    }
}
