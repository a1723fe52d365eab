use std::panic::{catch_unwind, AssertUnwindSafe};

use super::*;
use crate::testutil::{Call, RecordingSurface};

const INK: Color = Color::new(0x12, 0x34, 0x56);

#[test]
fn draw_runs_exactly_two_n_plus_one_times() {
    for width in [0u32, 1, 2, 5] {
        let mut surface = RecordingSurface::new(100.0, 100.0);
        let mut runs = 0;
        with_effect(&mut surface, &EffectStyle::new(width), INK, |_| runs += 1);
        assert_eq!(runs, 2 * width + 1, "effect width {width}");
    }
}

#[test]
fn zero_width_degrades_to_a_flat_fill() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    with_effect(&mut surface, &EffectStyle::new(0), INK, |_| {});

    assert_eq!(surface.fill_colors(), vec![INK]);
    assert!(!surface
        .calls
        .iter()
        .any(|call| matches!(call, Call::Translate(..))));
}

#[test]
fn passes_run_shadow_then_light_then_solid() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let style = EffectStyle::new(2);
    with_effect(&mut surface, &style, INK, |_| {});

    assert_eq!(
        surface.fill_colors(),
        vec![style.shadow, style.shadow, style.light, style.light, INK]
    );

    let offsets: Vec<Call> = surface
        .calls
        .iter()
        .filter(|call| matches!(call, Call::Translate(..)))
        .cloned()
        .collect();
    assert_eq!(
        offsets,
        vec![
            Call::Translate(0.0, 0.0),
            Call::Translate(0.0, 1.0),
            Call::Translate(0.0, 0.0),
            Call::Translate(0.0, -1.0),
        ]
    );
}

#[test]
fn offset_passes_run_at_half_alpha_and_the_solid_pass_does_not() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    with_effect(&mut surface, &EffectStyle::new(2), INK, |_| {});

    let alphas = surface
        .calls
        .iter()
        .filter(|call| matches!(call, Call::SetAlpha(_)))
        .count();
    assert_eq!(alphas, 4);

    let last_fill = surface
        .calls
        .iter()
        .rposition(|call| matches!(call, Call::SetFill(_)))
        .unwrap();
    assert!(!surface.calls[last_fill..]
        .iter()
        .any(|call| matches!(call, Call::SetAlpha(_))));
}

#[test]
fn every_pass_is_saved_and_restored() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    with_effect(&mut surface, &EffectStyle::new(3), INK, |_| {});
    assert_eq!(surface.saves(), 7);
    assert_eq!(surface.restores(), 7);
}

#[test]
fn state_is_restored_when_draw_panics() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let result = catch_unwind(AssertUnwindSafe(|| {
        with_effect(&mut surface, &EffectStyle::new(2), INK, |_| panic!("boom"));
    }));
    assert!(result.is_err());
    assert_eq!(surface.saves(), surface.restores());
}
