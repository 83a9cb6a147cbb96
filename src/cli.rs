// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use clap::Parser;

use crate::config::{FaceConfig, MarkerVariant};
use crate::face::MAX_SURFACE_DIMENSION;

#[derive(Parser, Debug, Clone)]
#[command(name = "efflux")]
#[command(about = "Hour-progress watch face simulator", long_about = None)]
pub struct Cli {
    /// Face configuration (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory of PNG sprites; procedural sprites are used when omitted
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Hour marker design, overriding the config file
    #[arg(long, value_enum)]
    pub variant: Option<MarkerVariant>,

    /// Surface width in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..=MAX_SURFACE_DIMENSION as i64))]
    pub width: u32,

    /// Surface height in pixels
    #[arg(long, default_value_t = 400, value_parser = clap::value_parser!(u32).range(1..=MAX_SURFACE_DIMENSION as i64))]
    pub height: u32,

    /// Render a single frame to this PNG file instead of opening a window
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Local time of the snapshot, HH:MM:SS (defaults to now)
    #[arg(long, value_parser = parse_time)]
    pub time: Option<NaiveTime>,

    /// Render the snapshot in ambient mode
    #[arg(long, default_value = "false")]
    pub ambient: bool,
}

impl Cli {
    /// Config file (or defaults) with command-line overrides applied
    pub fn face_config(&self) -> Result<FaceConfig> {
        let mut config = match &self.config {
            Some(path) => FaceConfig::load(path)?,
            None => FaceConfig::default(),
        };
        if let Some(variant) = self.variant {
            config.variant = variant;
        }
        Ok(config)
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .with_context(|| format!("expected HH:MM:SS, got '{}'", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["efflux"]);
        assert_eq!((cli.width, cli.height), (400, 400));
        assert!(cli.snapshot.is_none());
        assert!(!cli.ambient);
        assert_eq!(cli.face_config().unwrap(), FaceConfig::default());
    }

    #[test]
    fn test_snapshot_flags() {
        let cli = Cli::parse_from([
            "efflux",
            "--snapshot",
            "face.png",
            "--time",
            "03:30:00",
            "--variant",
            "wedge",
            "--ambient",
        ]);

        let time = cli.time.unwrap();
        assert_eq!((time.hour(), time.minute(), time.second()), (3, 30, 0));
        assert_eq!(cli.face_config().unwrap().variant, MarkerVariant::Wedge);
        assert!(cli.ambient);
    }

    #[test]
    fn test_surface_size_bounds() {
        assert!(Cli::try_parse_from(["efflux", "--width", "40000", "--height", "30000"]).is_err());
        assert!(Cli::try_parse_from(["efflux", "--width", "0"]).is_err());

        let cli = Cli::parse_from(["efflux", "--width", "8192", "--height", "8192"]);
        assert_eq!((cli.width, cli.height), (MAX_SURFACE_DIMENSION, MAX_SURFACE_DIMENSION));
    }

    #[test]
    fn test_rejects_bad_time() {
        assert!(Cli::try_parse_from(["efflux", "--time", "25:00"]).is_err());
    }
}
