use serde::{Deserialize, Serialize};

/// Luminance weights used by a zero-saturation colour matrix
const LUMA_R: f32 = 0.213;
const LUMA_G: f32 = 0.715;
const LUMA_B: f32 = 0.072;

/// 8-bit RGBA colour, serialized as `#RRGGBB` or `#AARRGGBB`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let value = u32::from_str_radix(digits, 16).ok()?;

        match digits.len() {
            6 => Some(Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)),
            8 => Some(Self::rgba(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
                (value >> 24) as u8,
            )),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.a, self.r, self.g, self.b)
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Same colour with alpha scaled by `factor` in [0, 1]
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    /// Zero-saturation grey of the same luminance, alpha untouched
    pub fn desaturated(self) -> Self {
        let [r, g, b, a] = desaturate(self.to_array());
        Self::rgba(r, g, b, a)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour '{}'", value))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Desaturate one RGBA pixel
pub fn desaturate(rgba: [u8; 4]) -> [u8; 4] {
    let luma = LUMA_R * rgba[0] as f32 + LUMA_G * rgba[1] as f32 + LUMA_B * rgba[2] as f32;
    let v = luma.round().clamp(0.0, 255.0) as u8;
    [v, v, v, rgba[3]]
}

/// Source-over blend of `src` onto `dst`, with `coverage` scaling the source alpha
pub fn blend_over(dst: [u8; 4], src: [u8; 4], coverage: f32) -> [u8; 4] {
    let sa = src[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return dst;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }

    let channel = |s: u8, d: u8| -> u8 {
        let c = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    [
        channel(src[0], dst[0]),
        channel(src[1], dst[1]),
        channel(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_gold() {
        let gold = Color::from_hex("#FFC90E").unwrap();
        assert_eq!(gold, Color::rgb(0xFF, 0xC9, 0x0E));
        assert_eq!(gold.to_hex(), "#FFC90E");
    }

    #[test]
    fn test_parse_with_alpha() {
        let c = Color::from_hex("#80FF0000").unwrap();
        assert_eq!(c, Color::rgba(255, 0, 0, 0x80));
        assert_eq!(c.to_hex(), "#80FF0000");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Color::from_hex("FFC90E").is_none());
        assert!(Color::from_hex("#FFF").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
        assert!(Color::from_hex("#+FFFFF").is_none());
        assert!(Color::from_hex("#-0000000").is_none());
    }

    #[test]
    fn test_desaturate_keeps_grey_and_alpha() {
        assert_eq!(desaturate([128, 128, 128, 77]), [128, 128, 128, 77]);
        let [r, g, b, _] = desaturate([255, 0, 0, 255]);
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(r, 54);
    }

    #[test]
    fn test_blend_opaque_replaces() {
        assert_eq!(blend_over([0, 0, 0, 255], [10, 20, 30, 255], 1.0), [10, 20, 30, 255]);
    }

    #[test]
    fn test_blend_zero_coverage_is_noop() {
        assert_eq!(blend_over([1, 2, 3, 255], [200, 200, 200, 255], 0.0), [1, 2, 3, 255]);
    }

    #[test]
    fn test_blend_half_coverage() {
        let out = blend_over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
        assert!((out[0] as i32 - 128).abs() <= 1);
        assert_eq!(out[3], 255);
    }

    #[test]
    fn test_serde_hex_string() {
        let json = serde_json::to_string(&Color::WHITE).unwrap();
        assert_eq!(json, "\"#FFFFFF\"");
        let back: Color = serde_json::from_str("\"#C7C7C7\"").unwrap();
        assert_eq!(back, Color::rgb(0xC7, 0xC7, 0xC7));
    }
}
