use log::{debug, warn};

use super::geometry::{SurfaceGeometry, MAX_SURFACE_DIMENSION};
use super::markers::{BitmapMarkers, HourMarkers, MarkerSprites, WedgeMarkers};
use super::mode::RenderMode;
use super::paints::FacePaints;
use crate::config::{FaceConfig, MarkerVariant};
use crate::core::{Bitmap, ClockSample};
use crate::traits::FaceCanvas;

/// Ring rotation applied before the first two rings
pub const RING_TILT_DEGREES: f32 = -3.0;

/// Extra rotation applied before the outer ring
pub const OUTER_RING_TURN_DEGREES: f32 = 8.0;

/// Decoded, unscaled images the face is drawn from
#[derive(Debug, Clone, PartialEq)]
pub enum SpriteSet {
    Bitmap {
        background: Bitmap,
        markers: MarkerSprites,
    },
    Wedge {
        background: Bitmap,
        /// Shown instead of `background` in reduced mode
        gray_background: Bitmap,
    },
}

impl SpriteSet {
    pub fn variant(&self) -> MarkerVariant {
        match self {
            SpriteSet::Bitmap { .. } => MarkerVariant::Bitmap,
            SpriteSet::Wedge { .. } => MarkerVariant::Wedge,
        }
    }

    pub fn background(&self) -> &Bitmap {
        match self {
            SpriteSet::Bitmap { background, .. } | SpriteSet::Wedge { background, .. } => background,
        }
    }
}

/// Backgrounds scaled to the current surface
#[derive(Debug, Clone)]
struct ScaledBackgrounds {
    background: Bitmap,
    gray_background: Option<Bitmap>,
}

/// Turns a clock sample into draw calls.
///
/// Holds no time state: everything a frame depends on is the sample, the
/// render mode and the geometry cached by the last surface change.
pub struct FaceRenderer {
    paints: FacePaints,
    background: Bitmap,
    gray_background: Option<Bitmap>,
    markers: Box<dyn HourMarkers>,
    geometry: Option<SurfaceGeometry>,
    scaled: Option<ScaledBackgrounds>,
}

impl FaceRenderer {
    pub fn new(sprites: SpriteSet, config: &FaceConfig) -> Self {
        let (background, gray_background, markers) = match sprites {
            SpriteSet::Bitmap { background, markers } => (
                background,
                None,
                Box::new(BitmapMarkers::new(markers, config.legacy_twelfth_slot)) as Box<dyn HourMarkers>,
            ),
            SpriteSet::Wedge {
                background,
                gray_background,
            } => (
                background,
                Some(gray_background),
                Box::new(WedgeMarkers::new(config.wedge_half_base)) as Box<dyn HourMarkers>,
            ),
        };

        Self {
            paints: FacePaints::from_config(config),
            background,
            gray_background,
            markers,
            geometry: None,
            scaled: None,
        }
    }

    /// Recompute geometry and rebuild every size-dependent asset
    pub fn on_surface_changed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            warn!("ignoring empty surface {}x{}", width, height);
            return;
        }
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            warn!(
                "ignoring surface {}x{}, larger than {} pixels per edge",
                width, height, MAX_SURFACE_DIMENSION
            );
            return;
        }

        let geometry = SurfaceGeometry::new(width, height, self.background.width());
        let scale = geometry.scale;

        self.scaled = Some(ScaledBackgrounds {
            background: self.background.scaled(scale),
            gray_background: self.gray_background.as_ref().map(|b| b.scaled(scale)),
        });
        self.markers.resize(&geometry);
        self.geometry = Some(geometry);

        debug!("surface {}x{}, sprite scale {:.3}", width, height, scale);
    }

    /// Draw one frame
    pub fn draw(&self, canvas: &mut dyn FaceCanvas, sample: &ClockSample, mode: RenderMode) {
        let (Some(geometry), Some(scaled)) = (&self.geometry, &self.scaled) else {
            warn!("draw requested before the first surface change, skipping frame");
            return;
        };
        let reduced = mode.is_reduced();

        match (&scaled.gray_background, reduced) {
            (Some(gray), true) => canvas.draw_bitmap(gray, 0.0, 0.0, &self.paints.background),
            _ => canvas.draw_bitmap(&scaled.background, 0.0, 0.0, &self.paints.background),
        }

        canvas.draw_circle(
            geometry.center_x,
            geometry.center_y,
            geometry.progress_radius(sample),
            self.paints.progress(reduced),
        );

        self.markers
            .draw(canvas, geometry, sample.dial_hour(), reduced, &self.paints);

        self.draw_rings(canvas, geometry);
    }

    fn draw_rings(&self, canvas: &mut dyn FaceCanvas, geometry: &SurfaceGeometry) {
        let (cx, cy) = (geometry.center_x, geometry.center_y);
        let quarter = geometry.quarter_width() as f32;
        let eighth = geometry.eighth_width() as f32;

        canvas.save();
        canvas.rotate(RING_TILT_DEGREES, cx, cy);
        canvas.draw_circle(cx, cy, quarter, &self.paints.solid_ring);
        canvas.draw_circle(cx, cy, eighth, &self.paints.dashed_ring);
        canvas.rotate(OUTER_RING_TURN_DEGREES, cx, cy);
        canvas.draw_circle(cx, cy, eighth + quarter, &self.paints.dashed_ring);
        canvas.restore();
    }

    pub fn geometry(&self) -> Option<&SurfaceGeometry> {
        self.geometry.as_ref()
    }

    /// Progress circle radius for `sample` under the current geometry
    pub fn progress_radius(&self, sample: &ClockSample) -> Option<f32> {
        self.geometry.as_ref().map(|g| g.progress_radius(sample))
    }

    /// Current background dimensions, after scaling
    pub fn scaled_background_dimensions(&self) -> Option<(u32, u32)> {
        self.scaled.as_ref().map(|s| s.background.dimensions())
    }

    pub fn variant(&self) -> MarkerVariant {
        self.markers.variant()
    }

    pub fn paints(&self) -> &FacePaints {
        &self.paints
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DrawOp, RecordingCanvas};

    fn bitmap_sprites() -> SpriteSet {
        SpriteSet::Bitmap {
            background: Bitmap::solid("background", 320, 320, [0, 0, 0, 255]),
            markers: MarkerSprites {
                filled_hour: Bitmap::solid("filled", 40, 100, [255, 201, 14, 255]),
                background_hour: Bitmap::solid("background_hour", 40, 100, [30, 30, 30, 255]),
                gray_hour: Bitmap::solid("gray", 40, 100, [199, 199, 199, 255]),
            },
        }
    }

    fn wedge_sprites() -> SpriteSet {
        SpriteSet::Wedge {
            background: Bitmap::solid("background", 320, 320, [0, 0, 60, 255]),
            gray_background: Bitmap::solid("gray_background", 320, 320, [40, 40, 40, 255]),
        }
    }

    fn at(hour: u32, minute: u32, second: u32) -> ClockSample {
        ClockSample::new(hour, minute, second, "UTC").unwrap()
    }

    #[test]
    fn test_draw_before_resize_skips_frame() {
        let renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        let mut canvas = RecordingCanvas::new(400, 400);
        renderer.draw(&mut canvas, &at(3, 30, 0), RenderMode::interactive());
        assert!(canvas.ops().is_empty());
    }

    #[test]
    fn test_oversized_surface_keeps_previous_layout() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);

        renderer.on_surface_changed(40_000, 30_000);
        renderer.on_surface_changed(400, MAX_SURFACE_DIMENSION + 1);
        assert_eq!(renderer.geometry().map(|g| (g.width, g.height)), Some((400, 400)));
        assert_eq!(renderer.scaled_background_dimensions(), Some((400, 400)));
    }

    #[test]
    fn test_draw_order() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);
        let mut canvas = RecordingCanvas::new(400, 400);
        renderer.draw(&mut canvas, &at(3, 30, 0), RenderMode::interactive());

        let ops = canvas.ops();
        assert!(matches!(&ops[0], DrawOp::Bitmap { name, x, y, .. } if name == "background" && *x == 0.0 && *y == 0.0));
        assert!(matches!(&ops[1], DrawOp::Circle { radius, .. } if (*radius - 100.0).abs() < 1e-3));
        assert_eq!(ops.len(), 1 + 1 + 12 + 3);
        assert!(ops[ops.len() - 3..].iter().all(|op| matches!(op, DrawOp::Circle { .. })));
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn test_rings() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);
        let mut canvas = RecordingCanvas::new(400, 400);
        renderer.draw(&mut canvas, &at(0, 0, 0), RenderMode::ambient());

        let rings: Vec<(f32, f32, bool)> = canvas
            .circles()
            .skip(1)
            .map(|op| match op {
                DrawOp::Circle { radius, rotation, paint, .. } => (*radius, *rotation, paint.dash.is_some()),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(rings, vec![(100.0, -3.0, false), (50.0, -3.0, true), (150.0, 5.0, true)]);

        // Rings keep their colour and anti-aliasing in ambient
        assert!(canvas.circles().skip(1).all(|op| op.paint().anti_alias));
    }

    #[test]
    fn test_reduced_progress_circle() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);
        let mut canvas = RecordingCanvas::new(400, 400);
        renderer.draw(&mut canvas, &at(3, 0, 0), RenderMode::ambient());

        let progress = canvas.circles().next().unwrap();
        assert_eq!(progress.paint().color.to_hex(), "#C7C7C7");
        assert!(!progress.paint().anti_alias);
    }

    #[test]
    fn test_wedge_reduced_uses_gray_background() {
        let mut renderer = FaceRenderer::new(wedge_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);

        let mut canvas = RecordingCanvas::new(400, 400);
        renderer.draw(&mut canvas, &at(3, 0, 0), RenderMode::ambient());
        assert_eq!(canvas.bitmaps_named("gray_background").count(), 1);
        assert_eq!(canvas.bitmaps_named("background").count(), 0);

        canvas.clear();
        renderer.draw(&mut canvas, &at(3, 0, 0), RenderMode::interactive());
        assert_eq!(canvas.bitmaps_named("background").count(), 1);
    }

    #[test]
    fn test_resize_is_idempotent() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);
        let first = (*renderer.geometry().unwrap(), renderer.scaled_background_dimensions());
        renderer.on_surface_changed(400, 400);
        let second = (*renderer.geometry().unwrap(), renderer.scaled_background_dimensions());
        assert_eq!(first, second);
        assert_eq!(first.1, Some((400, 400)));
    }

    #[test]
    fn test_zero_size_keeps_previous_geometry() {
        let mut renderer = FaceRenderer::new(bitmap_sprites(), &FaceConfig::default());
        renderer.on_surface_changed(400, 400);
        renderer.on_surface_changed(0, 400);
        assert_eq!(renderer.geometry().unwrap().width, 400);
    }
}
