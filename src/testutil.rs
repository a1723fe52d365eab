//! Test doubles shared by the unit tests.

use crate::config::Color;
use crate::surface::{FontSpec, Surface, TextSize};

/// One recorded surface operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Clear,
    Save,
    Restore,
    Translate(f64, f64),
    Rotate(f64),
    SetFill(Color),
    SetAlpha(f64),
    SetFontSize(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
        counterclockwise: bool,
    },
    ClosePath,
    Fill,
    FillText {
        text: String,
        x: f64,
        y: f64,
    },
}

/// Surface double that logs every call and measures text with a
/// deterministic stub (width grows with text length and font size), while
/// counting how often the underlying measurement runs.
pub struct RecordingSurface {
    pub calls: Vec<Call>,
    pub measure_calls: usize,
    size: (f64, f64),
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            calls: Vec::new(),
            measure_calls: 0,
            size: (width, height),
        }
    }

    pub fn rotations(&self) -> Vec<f64> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Rotate(theta) => Some(*theta),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Fill))
            .count()
    }

    pub fn fill_colors(&self) -> Vec<Color> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::SetFill(color) => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::FillText { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn arcs(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Arc { .. }))
            .cloned()
            .collect()
    }

    pub fn saves(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Save))
            .count()
    }

    pub fn restores(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, Call::Restore))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        self.size
    }

    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn save(&mut self) {
        self.calls.push(Call::Save);
    }

    fn restore(&mut self) {
        self.calls.push(Call::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.calls.push(Call::Translate(dx, dy));
    }

    fn rotate(&mut self, radians: f64) {
        self.calls.push(Call::Rotate(radians));
    }

    fn set_fill(&mut self, color: Color) {
        self.calls.push(Call::SetFill(color));
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.calls.push(Call::SetAlpha(alpha));
    }

    fn set_font_size(&mut self, px: f64) {
        self.calls.push(Call::SetFontSize(px));
    }

    fn begin_path(&mut self) {
        self.calls.push(Call::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(Call::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64, counterclockwise: bool) {
        self.calls.push(Call::Arc {
            cx,
            cy,
            radius,
            start,
            end,
            counterclockwise,
        });
    }

    fn close_path(&mut self) {
        self.calls.push(Call::ClosePath);
    }

    fn fill(&mut self) {
        self.calls.push(Call::Fill);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(Call::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn measure_text(&mut self, font: &FontSpec, text: &str) -> TextSize {
        self.measure_calls += 1;
        TextSize {
            width: text.len() as f64 * font.size_px * 0.6,
            height: font.size_px,
        }
    }
}
