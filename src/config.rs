use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::face::WatchFaceStyle;
use crate::math::Color;

/// Which hour-marker design the face draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarkerVariant {
    /// Pre-rendered marker sprites
    #[default]
    Bitmap,
    /// Triangular wedges drawn as paths
    Wedge,
}

/// Face colours
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Progress circle and filled wedges
    pub gold: Color,
    /// Reduced-mode replacement for `gold`
    pub gray: Color,
    pub ring: Color,
    pub ring_shadow: Color,
    /// Wedge separators and covers
    pub backdrop: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            gold: Color::rgb(0xFF, 0xC9, 0x0E),
            gray: Color::rgb(0xC7, 0xC7, 0xC7),
            ring: Color::WHITE,
            ring_shadow: Color::BLACK,
            backdrop: Color::BLACK,
        }
    }
}

/// Face configuration, read from JSON. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaceConfig {
    pub variant: MarkerVariant,
    pub palette: Palette,
    pub stroke_width: f32,
    pub shadow_radius: f32,
    /// Dash `[on, off]` lengths of the dashed rings
    pub dash_intervals: [f32; 2],
    pub dash_phase: f32,
    /// Half the base width of a wedge, in pixels
    pub wedge_half_base: f32,
    /// Reproduce the shifted twelfth background slot at hour 0
    pub legacy_twelfth_slot: bool,
    pub style: WatchFaceStyle,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            variant: MarkerVariant::Bitmap,
            palette: Palette::default(),
            stroke_width: 2.0,
            shadow_radius: 6.0,
            dash_intervals: [10.0, 10.0],
            dash_phase: 4.0,
            wedge_half_base: 27.0,
            legacy_twelfth_slot: false,
            style: WatchFaceStyle::default(),
        }
    }
}

impl FaceConfig {
    /// Read a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: FaceConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the renderer cannot draw with
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.stroke_width > 0.0, "stroke_width must be positive");
        anyhow::ensure!(self.shadow_radius >= 0.0, "shadow_radius must not be negative");
        anyhow::ensure!(
            self.dash_intervals.iter().all(|d| *d >= 0.0),
            "dash_intervals must not be negative"
        );
        anyhow::ensure!(self.wedge_half_base > 0.0, "wedge_half_base must be positive");
        Ok(())
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FaceConfig::default();
        assert_eq!(config.variant, MarkerVariant::Bitmap);
        assert_eq!(config.palette.gold.to_hex(), "#FFC90E");
        assert_eq!(config.palette.gray.to_hex(), "#C7C7C7");
        assert_eq!(config.stroke_width, 2.0);
        assert_eq!(config.shadow_radius, 6.0);
        assert_eq!(config.dash_intervals, [10.0, 10.0]);
        assert_eq!(config.dash_phase, 4.0);
        assert_eq!(config.wedge_half_base, 27.0);
        assert!(!config.legacy_twelfth_slot);
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(FaceConfig::from_json("{}").unwrap(), FaceConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = FaceConfig::from_json(
            r##"{"variant": "wedge", "palette": {"gold": "#FF0000"}, "dash_phase": 0}"##,
        )
        .unwrap();

        assert_eq!(config.variant, MarkerVariant::Wedge);
        assert_eq!(config.palette.gold, Color::rgb(255, 0, 0));
        assert_eq!(config.palette.gray, Palette::default().gray);
        assert_eq!(config.dash_phase, 0.0);
    }

    #[test]
    fn test_rejects_bad_colour() {
        assert!(FaceConfig::from_json(r#"{"palette": {"ring": "white"}}"#).is_err());
    }

    #[test]
    fn test_rejects_zero_stroke() {
        assert!(FaceConfig::from_json(r#"{"stroke_width": 0}"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let mut config = FaceConfig::default();
        config.legacy_twelfth_slot = true;
        let text = config.to_json_pretty().unwrap();
        assert_eq!(FaceConfig::from_json(&text).unwrap(), config);
    }
}
