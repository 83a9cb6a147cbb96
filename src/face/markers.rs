use glam::Vec2;
use log::debug;

use super::geometry::SurfaceGeometry;
use super::paints::FacePaints;
use crate::config::MarkerVariant;
use crate::core::{Bitmap, Path};
use crate::traits::FaceCanvas;

/// Degrees between two hour slots
pub const SLOT_DEGREES: f32 = 30.0;

/// Rotation of the `i`-th unused slot's background sprite at dial hour `h`
pub fn background_slot_angle(dial_hour: u32, i: u32, legacy_twelfth_slot: bool) -> f32 {
    if legacy_twelfth_slot && i == 12 {
        // Shipped at hour 0: the twelfth slot doubled up on the eleventh, 14° further on
        return SLOT_DEGREES * (dial_hour + 18) as f32 + 21.0;
    }
    SLOT_DEGREES * (dial_hour + i + 7) as f32 + 7.0
}

/// Rotation of the `i`-th filled hour sprite; the sprite's edge sits 23° past the slot
pub fn filled_slot_angle(i: u32) -> f32 {
    SLOT_DEGREES * (i + 6) as f32 + 23.0
}

/// Rotation of the `i`-th filled wedge
pub fn wedge_filled_angle(i: u32) -> f32 {
    SLOT_DEGREES * (i + 6) as f32
}

/// Rotation of the separator between slots `i` and `i + 1`
pub fn wedge_separator_angle(i: u32) -> f32 {
    SLOT_DEGREES * (i + 6) as f32 + 15.0
}

/// Rotation of the `i`-th cover wedge at dial hour `h`
pub fn wedge_cover_angle(dial_hour: u32, i: u32) -> f32 {
    SLOT_DEGREES * (dial_hour + i + 7) as f32
}

/// Hour indicator design.
///
/// `dial_hour` is always in 0..=11. Every draw must be bracketed by
/// `save`/`restore` so no rotation leaks into later draws.
pub trait HourMarkers {
    /// Rebuild everything derived from the surface size
    fn resize(&mut self, geometry: &SurfaceGeometry);

    fn draw(
        &self,
        canvas: &mut dyn FaceCanvas,
        geometry: &SurfaceGeometry,
        dial_hour: u32,
        reduced: bool,
        paints: &FacePaints,
    );

    fn variant(&self) -> MarkerVariant;
}

/// The three marker sprites of the bitmap design
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSprites {
    pub filled_hour: Bitmap,
    pub background_hour: Bitmap,
    pub gray_hour: Bitmap,
}

impl MarkerSprites {
    fn scaled(&self, scale: f32) -> Self {
        Self {
            filled_hour: self.filled_hour.scaled(scale),
            background_hour: self.background_hour.scaled(scale),
            gray_hour: self.gray_hour.scaled(scale),
        }
    }
}

/// Markers drawn from sprites anchored at the face center
pub struct BitmapMarkers {
    originals: MarkerSprites,
    scaled: Option<MarkerSprites>,
    legacy_twelfth_slot: bool,
}

impl BitmapMarkers {
    pub fn new(sprites: MarkerSprites, legacy_twelfth_slot: bool) -> Self {
        Self {
            originals: sprites,
            scaled: None,
            legacy_twelfth_slot,
        }
    }

    /// Sprites matching the current geometry
    pub fn sprites(&self) -> Option<&MarkerSprites> {
        self.scaled.as_ref()
    }
}

impl HourMarkers for BitmapMarkers {
    fn resize(&mut self, geometry: &SurfaceGeometry) {
        // Always from the originals so repeated resizes don't compound truncation
        self.scaled = Some(self.originals.scaled(geometry.scale));
    }

    fn draw(
        &self,
        canvas: &mut dyn FaceCanvas,
        geometry: &SurfaceGeometry,
        dial_hour: u32,
        reduced: bool,
        paints: &FacePaints,
    ) {
        let Some(sprites) = &self.scaled else {
            return;
        };
        let (cx, cy) = (geometry.center_x, geometry.center_y);

        for i in 1..=(12 - dial_hour) {
            canvas.save();
            canvas.rotate(background_slot_angle(dial_hour, i, self.legacy_twelfth_slot), cx, cy);
            canvas.draw_bitmap(&sprites.background_hour, cx, cy, &paints.background);
            canvas.restore();
        }

        for i in 1..=dial_hour {
            canvas.save();
            canvas.rotate(filled_slot_angle(i), cx, cy);
            if reduced {
                canvas.draw_bitmap(&sprites.gray_hour, cx, cy, &paints.gray_background);
            } else {
                canvas.draw_bitmap(&sprites.filled_hour, cx, cy, &paints.background);
            }
            canvas.restore();
        }
    }

    fn variant(&self) -> MarkerVariant {
        MarkerVariant::Bitmap
    }
}

/// Markers drawn as one triangle reused at every slot
pub struct WedgeMarkers {
    half_base: f32,
    path: Option<Path>,
}

impl WedgeMarkers {
    pub fn new(half_base: f32) -> Self {
        Self { half_base, path: None }
    }

    /// Apex at the center, base on the bottom edge
    pub fn wedge_path(geometry: &SurfaceGeometry, half_base: f32) -> Path {
        let bottom = geometry.height as f32;
        Path::triangle(
            geometry.center(),
            Vec2::new(geometry.center_x - half_base, bottom),
            Vec2::new(geometry.center_x + half_base, bottom),
        )
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }
}

impl HourMarkers for WedgeMarkers {
    fn resize(&mut self, geometry: &SurfaceGeometry) {
        self.path = Some(Self::wedge_path(geometry, self.half_base));
        debug!("rebuilt wedge path for {}x{}", geometry.width, geometry.height);
    }

    fn draw(
        &self,
        canvas: &mut dyn FaceCanvas,
        geometry: &SurfaceGeometry,
        dial_hour: u32,
        reduced: bool,
        paints: &FacePaints,
    ) {
        let Some(path) = &self.path else {
            return;
        };
        let (cx, cy) = (geometry.center_x, geometry.center_y);
        let cover = paints.cover(reduced);

        for i in 1..=dial_hour {
            canvas.save();
            canvas.rotate(wedge_filled_angle(i), cx, cy);
            canvas.draw_path(path, paints.progress(reduced));
            canvas.restore();
        }

        for i in 1..=12 {
            canvas.save();
            canvas.rotate(wedge_separator_angle(i), cx, cy);
            canvas.draw_path(path, cover);
            canvas.restore();
        }

        // Slot h + 1 is left uncovered: the hour in progress shows the background
        for i in 1..=(11 - dial_hour) {
            canvas.save();
            canvas.rotate(wedge_cover_angle(dial_hour, i), cx, cy);
            canvas.draw_path(path, cover);
            canvas.restore();
        }
    }

    fn variant(&self) -> MarkerVariant {
        MarkerVariant::Wedge
    }
}
