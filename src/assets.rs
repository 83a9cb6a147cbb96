//! Face images, loaded by identifier from a directory of PNGs or generated
//! procedurally when no artwork is supplied.

use std::path::{Path as FsPath, PathBuf};

use anyhow::{Context, Result};
use glam::Vec2;
use log::info;

use crate::config::{FaceConfig, MarkerVariant};
use crate::core::{Bitmap, Canvas, Paint, Path};
use crate::face::{MarkerSprites, SpriteSet};
use crate::math::Color;
use crate::traits::FaceCanvas;

/// Width and height of the built-in background
pub const BUILTIN_BACKGROUND_SIZE: u32 = 320;

/// Stable identifier of one face image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetId {
    Background,
    GrayBackground,
    FilledHour,
    BackgroundHour,
    GrayHour,
}

impl AssetId {
    /// Resource name, also the name given to the decoded bitmap
    pub fn name(&self) -> &'static str {
        match self {
            AssetId::Background => "custom_background",
            AssetId::GrayBackground => "custom_background_gray",
            AssetId::FilledHour => "filledhour",
            AssetId::BackgroundHour => "blackhour",
            AssetId::GrayHour => "filledhour_gray",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.png", self.name())
    }

    /// Images a marker design needs
    pub fn required_for(variant: MarkerVariant) -> &'static [AssetId] {
        match variant {
            MarkerVariant::Bitmap => &[
                AssetId::Background,
                AssetId::FilledHour,
                AssetId::BackgroundHour,
                AssetId::GrayHour,
            ],
            MarkerVariant::Wedge => &[AssetId::Background, AssetId::GrayBackground],
        }
    }
}

/// Source of decoded face images
pub trait ResourceLoader {
    fn load(&self, id: AssetId) -> Result<Bitmap>;
}

/// Loads `<root>/<name>.png`
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl AsRef<FsPath>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn path_of(&self, id: AssetId) -> PathBuf {
        self.root.join(id.file_name())
    }
}

impl ResourceLoader for DirectoryResources {
    fn load(&self, id: AssetId) -> Result<Bitmap> {
        let path = self.path_of(id);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Bitmap::decode_png(id.name(), &bytes)
    }
}

/// Procedural stand-ins for the shipped artwork
#[derive(Debug, Clone)]
pub struct BuiltinResources {
    size: u32,
    gold: Color,
}

impl BuiltinResources {
    pub fn new(config: &FaceConfig) -> Self {
        Self {
            size: BUILTIN_BACKGROUND_SIZE,
            gold: config.palette.gold,
        }
    }

    fn background(&self) -> Bitmap {
        let size = self.size as f32;
        let center = size / 2.0;
        let mut canvas = Canvas::new(self.size, self.size);
        canvas.clear(Color::BLACK);
        canvas.draw_circle(center, center, center - 2.0, &Paint::fill(Color::rgb(0x10, 0x18, 0x20)).anti_aliased(true));

        let tick = Paint::fill(Color::rgb(0x80, 0x80, 0x80)).anti_aliased(true);
        for hour in 0..12 {
            let angle = (hour as f32 * 30.0).to_radians();
            let at = Vec2::new(center, center) + Vec2::from_angle(angle) * (center - 12.0);
            canvas.draw_circle(at.x, at.y, 3.0, &tick);
        }
        canvas.to_bitmap(AssetId::Background.name())
    }

    /// Ring segment drawn from the face center outward, starting at 3 o'clock
    fn hour_segment(&self, name: &str, color: Color) -> Bitmap {
        let extent = self.size / 2;
        let outer = extent as f32 - 8.0;
        let inner = outer * 0.78;
        let span = 24f32.to_radians();
        let steps = 16;

        let outer_arc = (0..=steps).map(|k| Vec2::from_angle(span * k as f32 / steps as f32) * outer);
        let inner_arc = (0..=steps)
            .rev()
            .map(|k| Vec2::from_angle(span * k as f32 / steps as f32) * inner);
        let segment = Path::new(outer_arc.chain(inner_arc).collect());

        let mut canvas = Canvas::new(extent, extent);
        canvas.draw_path(&segment, &Paint::fill(color).anti_aliased(true));
        canvas.to_bitmap(name)
    }
}

impl ResourceLoader for BuiltinResources {
    fn load(&self, id: AssetId) -> Result<Bitmap> {
        let bitmap = match id {
            AssetId::Background => self.background(),
            AssetId::GrayBackground => {
                let mut gray = self.background().desaturated();
                gray.rename(id.name());
                gray
            }
            AssetId::FilledHour => self.hour_segment(id.name(), self.gold),
            AssetId::BackgroundHour => self.hour_segment(id.name(), Color::rgb(0x1E, 0x1E, 0x1E)),
            AssetId::GrayHour => self.hour_segment(id.name(), self.gold.desaturated()),
        };
        Ok(bitmap)
    }
}

/// Load every image `variant` needs. Any missing image is an error.
pub fn load_sprites(loader: &dyn ResourceLoader, variant: MarkerVariant) -> Result<SpriteSet> {
    let background = loader.load(AssetId::Background)?;

    let sprites = match variant {
        MarkerVariant::Bitmap => SpriteSet::Bitmap {
            background,
            markers: MarkerSprites {
                filled_hour: loader.load(AssetId::FilledHour)?,
                background_hour: loader.load(AssetId::BackgroundHour)?,
                gray_hour: loader.load(AssetId::GrayHour)?,
            },
        },
        MarkerVariant::Wedge => SpriteSet::Wedge {
            background,
            gray_background: loader.load(AssetId::GrayBackground)?,
        },
    };

    info!(
        "loaded {:?} sprites, background {}x{}",
        variant,
        sprites.background().width(),
        sprites.background().height()
    );
    Ok(sprites)
}
