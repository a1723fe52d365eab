//! An engraved-style analog clock face rendered onto a 2D raster surface.
//!
//! The core is surface-agnostic: every drawing operation goes through the
//! [`surface::Surface`] trait, with [`raster::RasterSurface`] providing a
//! software rasterizer over an RGBA8 frame. A [`clock::Clock`] holds all
//! render state for one dial; an external scheduler calls
//! [`clock::Clock::render_frame`] once per frame with the current time and
//! forwards viewport changes to [`clock::Clock::resize`].

pub mod clock;
pub mod config;
pub mod draw;
pub mod effect;
pub mod geometry;
pub mod metrics;
pub mod raster;
pub mod surface;

#[cfg(test)]
pub(crate) mod testutil;

pub use clock::{Clock, ClockTime};
pub use config::{palette, ClockConfig, Color, ConfigError, EventEntry, LegendSpec};
pub use draw::Painter;
pub use effect::{with_effect, EffectStyle};
pub use geometry::{angle_of, for_each_legend_value, HandSpec};
pub use metrics::TextMetricsCache;
pub use raster::{RasterSurface, SurfaceError};
pub use surface::{saved, FontSpec, FontWeight, Surface, TextSize};
