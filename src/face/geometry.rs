use glam::Vec2;

use crate::core::ClockSample;

/// Elapsed-second multiplier of the progress fraction, kept as shipped
/// (close to, but not exactly, 1/36) so frames stay pixel-compatible.
pub const PROGRESS_FACTOR: f64 = 0.027777778;

/// Divisor applied after `PROGRESS_FACTOR`
pub const PROGRESS_DIVISOR: f64 = 100.0;

/// Largest surface edge the face will lay out and rasterize
pub const MAX_SURFACE_DIMENSION: u32 = 8192;

/// Fraction of the hour shown by the progress circle, in [0, ~0.9997]
pub fn fraction_of_hour(seconds_into_hour: u32) -> f64 {
    (seconds_into_hour as f64 * PROGRESS_FACTOR) / PROGRESS_DIVISOR
}

/// Layout derived from the surface size.
///
/// Recomputed on every size change; everything scaled from it must be
/// rebuilt at the same time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceGeometry {
    pub width: u32,
    pub height: u32,
    pub center_x: f32,
    pub center_y: f32,
    /// Surface width over the width of the unscaled background image
    pub scale: f32,
}

impl SurfaceGeometry {
    pub fn new(width: u32, height: u32, reference_background_width: u32) -> Self {
        Self {
            width,
            height,
            center_x: width as f32 / 2.0,
            center_y: height as f32 / 2.0,
            scale: width as f32 / reference_background_width.max(1) as f32,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.center_x, self.center_y)
    }

    /// Integer half width, the full-hour radius of the progress circle
    pub fn half_width(&self) -> u32 {
        self.width / 2
    }

    /// Radius of the solid half-hour ring
    pub fn quarter_width(&self) -> u32 {
        self.width / 4
    }

    /// Radius of the inner dashed ring
    pub fn eighth_width(&self) -> u32 {
        self.width / 8
    }

    /// Radius of the progress circle for `sample`
    pub fn progress_radius(&self, sample: &ClockSample) -> f32 {
        (self.half_width() as f64 * fraction_of_hour(sample.seconds_into_hour())) as f32
    }
}
