use std::f64::consts::TAU;

use crate::config::Color;
use crate::effect::{with_effect, EffectStyle};
use crate::geometry::{self, HandSpec};
use crate::metrics::TextMetricsCache;
use crate::surface::{FontSpec, Surface};

#[cfg(test)]
#[path = "draw_test.rs"]
mod draw_test;

/// How far the hand polygon extends behind the pivot, in pixels.
const HAND_BACK: f64 = -15.0;

/// Opacity of event arc bands, applied inside every effect pass.
const BAND_ALPHA: f64 = 0.4;

/// Per-frame drawing context: the surface, the metrics cache, the current
/// clock radius and the effect parameters, threaded through every
/// primitive.
pub struct Painter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    metrics: &'a mut TextMetricsCache,
    radius: f64,
    effect: EffectStyle,
}

impl<'a, S: Surface + ?Sized> Painter<'a, S> {
    pub fn new(
        surface: &'a mut S,
        metrics: &'a mut TextMetricsCache,
        radius: f64,
        effect: EffectStyle,
    ) -> Self {
        Self {
            surface,
            metrics,
            radius,
            effect,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Rotate to the value's angle and fill the tapered hand polygon: a
    /// short stub behind the pivot widening to `spec.width`, narrowing to
    /// a 2 px tip at `radius * spec.length`.
    pub fn hand(&mut self, value: f64, spec: &HandSpec) {
        let theta = geometry::angle_of(value, spec);
        let tip = self.radius * spec.length;
        let width = spec.width;
        with_effect(&mut *self.surface, &self.effect, spec.color, |s| {
            s.rotate(theta);
            s.begin_path();
            s.move_to(HAND_BACK, -width);
            s.line_to(HAND_BACK, width);
            s.line_to(tip, 1.0);
            s.line_to(tip, -1.0);
            s.fill();
        });
    }

    /// Filled dot of `dot_radius` pixels at polar position
    /// `(radius * length, angle)`.
    pub fn tick(&mut self, angle: f64, dot_radius: f64, length: f64, color: Color) {
        let cx = self.radius * length * angle.cos();
        let cy = self.radius * length * angle.sin();
        with_effect(&mut *self.surface, &self.effect, color, |s| {
            s.begin_path();
            s.arc(cx, cy, dot_radius, 0.0, TAU, true);
            s.close_path();
            s.fill();
        });
    }

    /// Text centered on its polar anchor, with the baseline dropped a
    /// quarter of the text height below center to balance cap height
    /// against descenders.
    pub fn label(&mut self, text: &str, angle: f64, font_px: f64, length: f64, color: Color) {
        let font = FontSpec::sans(font_px);
        let size = self.metrics.measure(&mut *self.surface, &font, text);
        let x0 = self.radius * length * angle.cos();
        let y0 = self.radius * length * angle.sin();
        let x = x0 - size.width / 2.0;
        let y = y0 + size.height / 4.0;
        with_effect(&mut *self.surface, &self.effect, color, |s| {
            s.set_font_size(font_px);
            s.fill_text(text, x, y);
        });
    }

    /// Annulus segment between the angles of `value1` and `value2` against
    /// `spec`, radially bounded by `length_min..length_max` fractions of
    /// the clock radius. The outer arc sweeps value1→value2 clockwise, the
    /// inner arc sweeps back counterclockwise; with the shared endpoints
    /// the path closes into a single band, which is what makes the fill
    /// come out right.
    pub fn arc_band(
        &mut self,
        value1: f64,
        value2: f64,
        spec: &HandSpec,
        length_min: f64,
        length_max: f64,
        color: Color,
    ) {
        let theta1 = geometry::angle_of(value1, spec);
        let theta2 = geometry::angle_of(value2, spec);
        let radius_min = self.radius * length_min;
        let radius_max = self.radius * length_max;
        with_effect(&mut *self.surface, &self.effect, color, |s| {
            s.set_alpha(BAND_ALPHA);
            s.begin_path();
            s.arc(0.0, 0.0, radius_max, theta1, theta2, false);
            s.arc(0.0, 0.0, radius_min, theta2, theta1, true);
            s.close_path();
            s.fill();
        });
    }
}
