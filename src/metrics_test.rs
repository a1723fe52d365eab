use super::*;
use crate::surface::{FontSpec, SANS_SERIF};
use crate::testutil::RecordingSurface;

#[test]
fn different_text_gets_independent_entries() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let mut cache = TextMetricsCache::new();
    let font = FontSpec::sans(22.0);

    let narrow = cache.measure(&mut surface, &font, "3");
    let wide = cache.measure(&mut surface, &font, "30");

    assert_ne!(narrow.width, wide.width);
    assert_eq!(surface.measure_calls, 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn repeated_lookup_is_served_from_the_cache() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let mut cache = TextMetricsCache::new();
    let font = FontSpec::sans(22.0);

    let first = cache.measure(&mut surface, &font, "12");
    let second = cache.measure(&mut surface, &font, "12");

    assert_eq!(first, second);
    assert_eq!(surface.measure_calls, 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn size_and_weight_participate_in_the_key() {
    let mut surface = RecordingSurface::new(100.0, 100.0);
    let mut cache = TextMetricsCache::new();

    cache.measure(&mut surface, &FontSpec::sans(22.0), "7");
    cache.measure(&mut surface, &FontSpec::sans(24.0), "7");
    cache.measure(
        &mut surface,
        &FontSpec {
            family: SANS_SERIF,
            size_px: 22.0,
            weight: FontWeight::Bold,
        },
        "7",
    );

    assert_eq!(surface.measure_calls, 3);
    assert_eq!(cache.len(), 3);
}
