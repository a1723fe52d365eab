use std::collections::HashMap;

use crate::surface::{FontSpec, FontWeight, Surface, TextSize};

#[cfg(test)]
#[path = "metrics_test.rs"]
mod metrics_test;

/// The key captures every parameter that affects the rendered size; the
/// size is stored bit-exact so 22.0 px and 22.5 px never share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MetricsKey {
    family: &'static str,
    size_bits: u64,
    weight: FontWeight,
    text: String,
}

/// Memoized text measurement.
///
/// The first lookup for a key performs the surface's expensive off-surface
/// measurement; later lookups return the stored size. There is no eviction:
/// the label alphabet of a clock face (small integers) is finite, so the
/// map stays bounded in practice.
#[derive(Debug, Default)]
pub struct TextMetricsCache {
    entries: HashMap<MetricsKey, TextSize>,
}

impl TextMetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn measure<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        font: &FontSpec,
        text: &str,
    ) -> TextSize {
        let key = MetricsKey {
            family: font.family,
            size_bits: font.size_px.to_bits(),
            weight: font.weight,
            text: text.to_owned(),
        };
        *self
            .entries
            .entry(key)
            .or_insert_with(|| surface.measure_text(font, text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
