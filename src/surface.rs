use std::ops::{Deref, DerefMut};

use crate::config::Color;

/// Measured extent of a rendered label, in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSize {
    pub width: f64,
    pub height: f64,
}

impl TextSize {
    pub const ZERO: TextSize = TextSize {
        width: 0.0,
        height: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Everything that affects the rendered size of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub family: &'static str,
    pub size_px: f64,
    pub weight: FontWeight,
}

pub const SANS_SERIF: &str = "Sans-Serif";

impl FontSpec {
    pub fn sans(size_px: f64) -> Self {
        Self {
            family: SANS_SERIF,
            size_px,
            weight: FontWeight::Normal,
        }
    }
}

/// The 2D drawing context the renderer draws against.
///
/// Coordinates are in user space: the current transform (built from
/// `translate`/`rotate`) applies to path points and text anchors as they
/// are issued. `save`/`restore` snapshot the transform together with the
/// fill color, global alpha and font size; prefer [`saved`] over calling
/// them directly.
pub trait Surface {
    /// Current surface extent in pixels as `(width, height)`.
    fn size(&self) -> (f64, f64);

    /// Reset every pixel to the background. Ignores the current transform.
    fn clear(&mut self);

    fn save(&mut self);
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);

    fn set_fill(&mut self, color: Color);
    fn set_alpha(&mut self, alpha: f64);
    fn set_font_size(&mut self, px: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);

    /// Append a sampled circular arc to the current path.
    ///
    /// Sweep semantics follow the 2D canvas convention: going clockwise
    /// (`counterclockwise = false`, the increasing-angle direction in
    /// y-down screen space) the end angle is lifted by full turns until it
    /// is at or past the start angle, so `end < start` wraps through 2π
    /// rather than producing an empty or inverted arc. Counterclockwise is
    /// the mirror image, and any span of 2π or more is a full circle.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, counterclockwise: bool);

    fn close_path(&mut self);

    /// Fill the current path with the current fill color and alpha.
    fn fill(&mut self);

    /// Draw `text` with its left edge at `x` and its baseline at `y`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    /// Measure `text` without drawing it. Expensive; callers go through
    /// [`crate::metrics::TextMetricsCache`].
    fn measure_text(&mut self, font: &FontSpec, text: &str) -> TextSize;
}

/// Scope guard around `save`/`restore`: restores the surface state when
/// dropped, on every exit path.
pub struct Saved<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
}

/// Save the surface state and hand back a guard that restores it on drop.
pub fn saved<S: Surface + ?Sized>(surface: &mut S) -> Saved<'_, S> {
    surface.save();
    Saved { surface }
}

impl<S: Surface + ?Sized> Deref for Saved<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: Surface + ?Sized> DerefMut for Saved<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: Surface + ?Sized> Drop for Saved<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
