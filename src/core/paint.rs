use crate::math::Color;

/// How a shape is painted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintStyle {
    Fill,
    Stroke,
    FillAndStroke,
}

/// Dash pattern applied along a stroke: `on` pixels drawn, `off` pixels skipped
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub on: f32,
    pub off: f32,
    pub phase: f32,
}

impl Dash {
    pub fn new(on: f32, off: f32, phase: f32) -> Self {
        Self { on, off, phase }
    }

    /// Whether arc length `distance` falls inside a drawn segment
    pub fn is_on(&self, distance: f32) -> bool {
        let period = self.on + self.off;
        if period <= 0.0 {
            return true;
        }
        (distance + self.phase).rem_euclid(period) < self.on
    }
}

/// Blurred halo painted under a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub radius: f32,
    pub color: Color,
}

/// Drawing parameters shared by every primitive
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub style: PaintStyle,
    pub stroke_width: f32,
    pub anti_alias: bool,
    /// Bilinear sampling for bitmaps
    pub filter_bitmap: bool,
    pub dash: Option<Dash>,
    pub shadow: Option<Shadow>,
    /// Drop colour saturation of everything drawn with this paint
    pub desaturate: bool,
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            style: PaintStyle::Fill,
            stroke_width: 0.0,
            anti_alias: false,
            filter_bitmap: false,
            dash: None,
            shadow: None,
            desaturate: false,
        }
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            style: PaintStyle::Stroke,
            stroke_width: width,
            ..Self::fill(color)
        }
    }

    pub fn with_style(mut self, style: PaintStyle) -> Self {
        self.style = style;
        self
    }

    pub fn anti_aliased(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }

    pub fn filtered(mut self, filter: bool) -> Self {
        self.filter_bitmap = filter;
        self
    }

    pub fn dashed(mut self, dash: Dash) -> Self {
        self.dash = Some(dash);
        self
    }

    pub fn with_shadow(mut self, radius: f32, color: Color) -> Self {
        self.shadow = Some(Shadow { radius, color });
        self
    }

    pub fn desaturated(mut self) -> Self {
        self.desaturate = true;
        self
    }

    /// Half the stroke width, or zero for pure fills
    pub fn half_stroke(&self) -> f32 {
        match self.style {
            PaintStyle::Fill => 0.0,
            PaintStyle::Stroke | PaintStyle::FillAndStroke => self.stroke_width.max(1.0) * 0.5,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::fill(Color::BLACK)
    }
}
