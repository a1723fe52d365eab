use log::debug;

use crate::config::{palette, ClockConfig, Color, EventEntry, LegendSpec};
use crate::draw::Painter;
use crate::effect::EffectStyle;
use crate::geometry::{self, HandSpec};
use crate::metrics::TextMetricsCache;
use crate::surface::{saved, Surface};

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

/// Legend tick dot radius in pixels.
const TICK_DOT_RADIUS: f64 = 1.0;

/// One sample of the wall clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClockTime {
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
    pub milliseconds: u32,
}

impl ClockTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    pub fn fractional_seconds(&self) -> f64 {
        self.seconds as f64 + self.milliseconds as f64 / 1000.0
    }

    pub fn fractional_minutes(&self) -> f64 {
        self.minutes as f64 + self.fractional_seconds() / 60.0
    }

    pub fn fractional_hours(&self) -> f64 {
        self.hours as f64 + self.fractional_minutes() / 60.0
    }
}

/// All render state of one clock instance.
///
/// Constructed once from a [`ClockConfig`] and owned by the caller; the
/// resize collaborator mutates dimensions, radius and label sizes in
/// place, everything else stays fixed for the clock's lifetime. Rendering
/// reads the state and only touches the text metrics cache.
pub struct Clock {
    width: f64,
    height: f64,
    radius: f64,
    hour: HandSpec,
    minute: HandSpec,
    second: HandSpec,
    hour_legend: LegendSpec,
    minute_legend: LegendSpec,
    hour_label_px: f64,
    minute_label_px: f64,
    legend_color: Color,
    effect: EffectStyle,
    events: Vec<EventEntry>,
    metrics: TextMetricsCache,
}

impl Clock {
    pub fn new(config: ClockConfig) -> Self {
        let hour = if config.use_12 {
            HandSpec::hour_12(config.color_hour)
        } else {
            HandSpec::hour_24(config.color_hour)
        };
        debug!(
            "clock configured: {}x{}, {}-hour dial, effect width {}",
            config.width,
            config.height,
            hour.domain_size(),
            config.effect_width
        );
        Self {
            width: config.width,
            height: config.height,
            radius: config.width.min(config.height) / 2.0,
            hour,
            minute: HandSpec::minute(config.color_minute),
            second: HandSpec::second(config.color_second),
            hour_legend: LegendSpec::hour(),
            minute_legend: LegendSpec::minute(),
            hour_label_px: config.h_size,
            minute_label_px: config.m_size,
            legend_color: palette::ELEMENT,
            effect: EffectStyle {
                width: config.effect_width,
                shadow: palette::SHADOW,
                light: palette::LIGHT,
            },
            events: Vec::new(),
            metrics: TextMetricsCache::new(),
        }
    }

    /// Adopt a new viewport: recompute the clock radius and scale the
    /// legend label sizes to it.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.radius = width.min(height) / 2.0;
        self.hour_label_px = (self.radius * self.hour_legend.size_ratio).floor();
        self.minute_label_px = (self.radius * self.minute_legend.size_ratio).floor();
        debug!(
            "clock resized to {}x{}, radius {}",
            width, height, self.radius
        );
    }

    pub fn set_events(&mut self, events: Vec<EventEntry>) {
        self.events = events;
    }

    pub fn events(&self) -> &[EventEntry] {
        &self.events
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn hour_hand(&self) -> &HandSpec {
        &self.hour
    }

    pub fn minute_hand(&self) -> &HandSpec {
        &self.minute
    }

    pub fn second_hand(&self) -> &HandSpec {
        &self.second
    }

    pub fn hour_label_px(&self) -> f64 {
        self.hour_label_px
    }

    pub fn minute_label_px(&self) -> f64 {
        self.minute_label_px
    }

    pub fn metrics(&self) -> &TextMetricsCache {
        &self.metrics
    }

    /// Render one frame for the given wall-clock sample.
    ///
    /// Back to front: hour legend, minute legend, event overlay, then the
    /// hour, minute and second hands, so the hands sit above everything
    /// else. The whole frame runs under a state guard; the surface comes
    /// back with the transform and style it went in with.
    pub fn render_frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: ClockTime) {
        let mut frame = saved(surface);
        frame.clear();
        let (width, height) = frame.size();
        frame.translate(width / 2.0, height / 2.0);

        let seconds = now.fractional_seconds();
        let minutes = now.fractional_minutes();
        let hours = now.fractional_hours();

        let mut painter = Painter::new(&mut *frame, &mut self.metrics, self.radius, self.effect);
        draw_legend(
            &mut painter,
            &self.hour,
            &self.hour_legend,
            self.hour_label_px,
            self.legend_color,
        );
        draw_legend(
            &mut painter,
            &self.minute,
            &self.minute_legend,
            self.minute_label_px,
            self.legend_color,
        );
        draw_events(&mut painter, &self.hour, &self.events);
        painter.hand(hours, &self.hour);
        painter.hand(minutes, &self.minute);
        painter.hand(seconds, &self.second);
    }
}

/// Annotate a hand's full domain: a tick, a label, or both per value,
/// depending on `legend.label_every`.
pub fn draw_legend<S: Surface + ?Sized>(
    painter: &mut Painter<'_, S>,
    spec: &HandSpec,
    legend: &LegendSpec,
    font_px: f64,
    color: Color,
) {
    geometry::for_each_legend_value(spec, |value, angle| {
        let ticked = legend.label_every.map_or(true, |n| value % n != 0);
        let labeled = legend.label_every.map_or(true, |n| value % n == 0);
        if ticked {
            painter.tick(angle, TICK_DOT_RADIUS, legend.tick_length, color);
        }
        if labeled {
            painter.label(&value.to_string(), angle, font_px, legend.text_length, color);
        }
    });
}

/// Draw every hour range of every event as an arc band around the hour
/// legend, leveled radially.
pub fn draw_events<S: Surface + ?Sized>(
    painter: &mut Painter<'_, S>,
    hour_spec: &HandSpec,
    events: &[EventEntry],
) {
    for event in events {
        let inner = 0.2 + 0.05 * event.level as f64;
        let outer = 0.3 + 0.05 * event.level as f64;
        for &(hour_min, hour_max) in &event.hour_ranges {
            painter.arc_band(hour_min, hour_max, hour_spec, inner, outer, event.color);
        }
    }
}
