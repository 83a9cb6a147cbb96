use crate::config::FaceConfig;
use crate::core::{Dash, Paint, PaintStyle};
use crate::math::Color;

/// Every paint the face uses, built once from the config
#[derive(Debug, Clone, PartialEq)]
pub struct FacePaints {
    pub background: Paint,
    /// Drops saturation of grayscale-mode sprites
    pub gray_background: Paint,
    pub progress: Paint,
    pub gray_progress: Paint,
    pub solid_ring: Paint,
    pub dashed_ring: Paint,
    pub cover: Paint,
    pub gray_cover: Paint,
}

impl FacePaints {
    pub fn from_config(config: &FaceConfig) -> Self {
        let palette = &config.palette;

        let progress = Paint::fill(palette.gold)
            .with_style(PaintStyle::FillAndStroke)
            .anti_aliased(true);
        let gray_progress = Paint::fill(palette.gray)
            .with_style(PaintStyle::FillAndStroke)
            .anti_aliased(false);

        let solid_ring = Paint::stroke(palette.ring, config.stroke_width)
            .anti_aliased(true)
            .with_shadow(config.shadow_radius, palette.ring_shadow);
        let [on, off] = config.dash_intervals;
        let dashed_ring = solid_ring.clone().dashed(Dash::new(on, off, config.dash_phase));

        let cover = Paint::fill(palette.backdrop).anti_aliased(true);
        let gray_cover = cover.clone().anti_aliased(false);

        Self {
            background: Paint::fill(Color::BLACK).anti_aliased(true).filtered(true),
            gray_background: Paint::default().desaturated(),
            progress,
            gray_progress,
            solid_ring,
            dashed_ring,
            cover,
            gray_cover,
        }
    }

    pub fn progress(&self, reduced: bool) -> &Paint {
        if reduced {
            &self.gray_progress
        } else {
            &self.progress
        }
    }

    pub fn cover(&self, reduced: bool) -> &Paint {
        if reduced {
            &self.gray_cover
        } else {
            &self.cover
        }
    }
}
