use crate::config::{palette, Color};
use crate::surface::{saved, Surface};

#[cfg(test)]
#[path = "effect_test.rs"]
mod effect_test;

/// Parameters of the engraved draw effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectStyle {
    /// Number of shadow and of highlight passes. 0 degrades to a flat fill.
    pub width: u32,
    pub shadow: Color,
    pub light: Color,
}

impl EffectStyle {
    pub fn new(width: u32) -> Self {
        Self {
            width,
            shadow: palette::SHADOW,
            light: palette::LIGHT,
        }
    }
}

impl Default for EffectStyle {
    fn default() -> Self {
        Self::new(2)
    }
}

/// Run `draw` under the engraved effect: `width` shadow passes nudged down
/// by the pass index, `width` highlight passes nudged up, each at half
/// alpha, then one solid pass in `color`. The first shadow and highlight
/// passes sit at offset 0. Every pass runs under a state guard, so the
/// transform, fill, and alpha are restored even if `draw` panics. `draw`
/// is invoked exactly `2 * width + 1` times.
pub fn with_effect<S, F>(surface: &mut S, style: &EffectStyle, color: Color, mut draw: F)
where
    S: Surface + ?Sized,
    F: FnMut(&mut S),
{
    for index in 0..style.width {
        let mut pass = saved(&mut *surface);
        pass.translate(0.0, index as f64);
        pass.set_fill(style.shadow);
        pass.set_alpha(0.5);
        draw(&mut *pass);
    }
    for index in 0..style.width {
        let mut pass = saved(&mut *surface);
        pass.translate(0.0, -(index as f64));
        pass.set_fill(style.light);
        pass.set_alpha(0.5);
        draw(&mut *pass);
    }
    let mut pass = saved(surface);
    pass.set_fill(color);
    draw(&mut *pass);
}
