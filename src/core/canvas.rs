use std::f32::consts::TAU;

use glam::{Affine2, Vec2};

use super::bitmap::Bitmap;
use super::paint::{Paint, PaintStyle};
use super::path::Path;
use crate::math::{blend_over, desaturate, Color, TransformStack};
use crate::traits::FaceCanvas;

/// Peak opacity of a shadow right at the shape's edge
const SHADOW_STRENGTH: f32 = 0.6;

/// Subpixel offsets used when anti-aliasing polygon edges
const PATH_SAMPLES: [(f32, f32); 4] = [(0.25, 0.25), (0.75, 0.25), (0.25, 0.75), (0.75, 0.75)];

/// Software canvas - RGBA pixel buffer with a transform stack
#[derive(Debug, Clone)]
pub struct Canvas {
    /// RGBA pixel buffer
    pixels: Vec<u8>,
    transforms: TransformStack,
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create new transparent canvas with dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * 4],
            transforms: TransformStack::new(),
            width,
            height,
        }
    }

    /// Fill entire canvas with color, ignoring the transform
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Get pixel buffer
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Pixel at (x, y); transparent when out of bounds
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Copy the canvas into a bitmap, e.g. for PNG export
    pub fn to_bitmap(&self, name: &str) -> Bitmap {
        // Buffer length always matches the dimensions
        Bitmap::from_rgba(name, self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|_| Bitmap::new(name, self.width, self.height))
    }

    /// Current transform depth; zero once every save has been restored
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    fn blend(&mut self, x: u32, y: u32, rgba: [u8; 4], coverage: f32) {
        if coverage <= 0.0 || x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let dst = [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ];
        let out = blend_over(dst, rgba, coverage);
        self.pixels[idx..idx + 4].copy_from_slice(&out);
    }

    /// Integer pixel range covering screen-space bounds, clipped to the canvas
    fn pixel_span(&self, lo: Vec2, hi: Vec2) -> Option<(u32, u32, u32, u32)> {
        let x0 = lo.x.floor().max(0.0);
        let y0 = lo.y.floor().max(0.0);
        let x1 = hi.x.ceil().min(self.width as f32);
        let y1 = hi.y.ceil().min(self.height as f32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn paint_color(paint: &Paint) -> [u8; 4] {
        let rgba = paint.color.to_array();
        if paint.desaturate {
            desaturate(rgba)
        } else {
            rgba
        }
    }
}

/// Coverage of a pixel whose centre lies `inside` pixels within an edge
fn edge_coverage(inside: f32, anti_alias: bool) -> f32 {
    if anti_alias {
        (inside + 0.5).clamp(0.0, 1.0)
    } else if inside >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Clockwise arc length from the 3 o'clock point of a circle
fn arc_length(local: Vec2, center: Vec2, radius: f32) -> f32 {
    let d = local - center;
    d.y.atan2(d.x).rem_euclid(TAU) * radius
}

impl FaceCanvas for Canvas {
    fn save(&mut self) {
        self.transforms.save();
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.transforms.rotate(degrees, px, py);
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32, paint: &Paint) {
        let to_screen = self.transforms.current() * Affine2::from_translation(Vec2::new(x, y));
        let to_local = to_screen.inverse();

        let (w, h) = (bitmap.width() as f32, bitmap.height() as f32);
        let corners = [Vec2::ZERO, Vec2::new(w, 0.0), Vec2::new(0.0, h), Vec2::new(w, h)]
            .map(|c| to_screen.transform_point2(c));
        let lo = corners.iter().fold(corners[0], |acc, c| acc.min(*c));
        let hi = corners.iter().fold(corners[0], |acc, c| acc.max(*c));

        let Some((x0, y0, x1, y1)) = self.pixel_span(lo, hi) else {
            return;
        };
        let opacity = paint.color.a as f32 / 255.0;

        for py in y0..y1 {
            for px in x0..x1 {
                let local = to_local.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                let mut texel = if paint.filter_bitmap {
                    bitmap.sample_bilinear(local.x, local.y)
                } else {
                    bitmap.sample_nearest(local.x, local.y)
                };
                if texel[3] == 0 {
                    continue;
                }
                if paint.desaturate {
                    texel = desaturate(texel);
                }
                self.blend(px, py, texel, opacity);
            }
        }
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        let center = Vec2::new(cx, cy);
        let to_screen = self.transforms.current();
        let to_local = to_screen.inverse();

        let half_stroke = paint.half_stroke();
        let outer = match paint.style {
            PaintStyle::Fill => radius,
            PaintStyle::Stroke | PaintStyle::FillAndStroke => radius + half_stroke,
        };
        if outer <= 0.0 {
            return;
        }

        let shadow_reach = paint.shadow.map(|s| s.radius).unwrap_or(0.0);
        let reach = outer + shadow_reach + 1.0;
        let screen_center = to_screen.transform_point2(center);
        let Some((x0, y0, x1, y1)) =
            self.pixel_span(screen_center - Vec2::splat(reach), screen_center + Vec2::splat(reach))
        else {
            return;
        };

        let color = Self::paint_color(paint);
        let shadow_color = paint.shadow.map(|s| s.color.to_array());

        for py in y0..y1 {
            for px in x0..x1 {
                let local = to_local.transform_point2(Vec2::new(px as f32 + 0.5, py as f32 + 0.5));
                let d = local.distance(center);

                // Signed distance to the painted region, positive inside
                let inside = match paint.style {
                    PaintStyle::Fill | PaintStyle::FillAndStroke => outer - d,
                    PaintStyle::Stroke => half_stroke - (d - radius).abs(),
                };

                if let Some(dash) = paint.dash {
                    if !dash.is_on(arc_length(local, center, radius)) {
                        continue;
                    }
                }

                if let (Some(shadow), Some(rgba)) = (paint.shadow, shadow_color) {
                    let outside = -inside;
                    if outside > 0.0 && outside < shadow.radius {
                        let falloff = 1.0 - outside / shadow.radius;
                        self.blend(px, py, rgba, SHADOW_STRENGTH * falloff * falloff);
                    }
                }

                self.blend(px, py, color, edge_coverage(inside, paint.anti_alias));
            }
        }
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        let to_screen = self.transforms.current();
        let screen = Path::new(
            path.points()
                .iter()
                .map(|p| to_screen.transform_point2(*p))
                .collect(),
        );
        let Some((lo, hi)) = screen.bounds() else {
            return;
        };
        let Some((x0, y0, x1, y1)) = self.pixel_span(lo, hi) else {
            return;
        };

        let color = Self::paint_color(paint);

        for py in y0..y1 {
            for px in x0..x1 {
                let origin = Vec2::new(px as f32, py as f32);
                let coverage = if paint.anti_alias {
                    let hits = PATH_SAMPLES
                        .iter()
                        .filter(|(sx, sy)| screen.contains(origin + Vec2::new(*sx, *sy)))
                        .count();
                    hits as f32 / PATH_SAMPLES.len() as f32
                } else if screen.contains(origin + Vec2::splat(0.5)) {
                    1.0
                } else {
                    0.0
                };
                self.blend(px, py, color, coverage);
            }
        }
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Dash;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn canvas_creation() {
        let canvas = Canvas::new(100, 100);
        assert_eq!(canvas.dimensions(), (100, 100));
        assert_eq!(canvas.pixels().len(), 100 * 100 * 4);
        assert_eq!(canvas.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_clear() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Color::rgb(255, 0, 0));

        assert_eq!(canvas.pixel(0, 0), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(9, 9), [255, 0, 0, 255]);
    }

    #[test]
    fn canvas_filled_circle() {
        let mut canvas = Canvas::new(50, 50);
        canvas.clear(Color::BLACK);
        canvas.draw_circle(25.0, 25.0, 5.0, &Paint::fill(RED));

        assert_eq!(canvas.pixel(25, 25), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(25, 22), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(25, 35), [0, 0, 0, 255]);
    }

    #[test]
    fn canvas_zero_radius_fill_draws_nothing() {
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_circle(10.0, 10.0, 0.0, &Paint::fill(RED));
        assert!(canvas.pixels().iter().all(|b| *b == 0));
    }

    #[test]
    fn canvas_stroked_circle_is_hollow() {
        let mut canvas = Canvas::new(50, 50);
        canvas.draw_circle(25.0, 25.0, 10.0, &Paint::stroke(Color::WHITE, 2.0));

        // Ring passes through (35, 25); centre stays empty
        assert_eq!(canvas.pixel(34, 24)[3], 255);
        assert_eq!(canvas.pixel(25, 25), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_dashed_circle_has_gaps() {
        let mut solid = Canvas::new(100, 100);
        solid.draw_circle(50.0, 50.0, 40.0, &Paint::stroke(Color::WHITE, 2.0));
        let mut dashed = Canvas::new(100, 100);
        dashed.draw_circle(
            50.0,
            50.0,
            40.0,
            &Paint::stroke(Color::WHITE, 2.0).dashed(Dash::new(10.0, 10.0, 4.0)),
        );

        let count = |c: &Canvas| c.pixels().chunks_exact(4).filter(|p| p[3] > 0).count();
        let (s, d) = (count(&solid), count(&dashed));
        assert!(d > s / 3 && d < s * 2 / 3, "solid {} dashed {}", s, d);
    }

    #[test]
    fn canvas_rotation_moves_dash_pattern() {
        let paint = Paint::stroke(Color::WHITE, 2.0).dashed(Dash::new(10.0, 10.0, 4.0));

        let mut plain = Canvas::new(100, 100);
        plain.draw_circle(50.0, 50.0, 40.0, &paint);

        let mut rotated = Canvas::new(100, 100);
        rotated.rotate(8.0, 50.0, 50.0);
        rotated.draw_circle(50.0, 50.0, 40.0, &paint);

        assert_ne!(plain.pixels(), rotated.pixels());
    }

    #[test]
    fn canvas_bitmap_identity_copies_pixels() {
        let sprite = Bitmap::solid("s", 4, 3, [0, 255, 0, 255]);
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_bitmap(&sprite, 2.0, 5.0, &Paint::default());

        assert_eq!(canvas.pixel(2, 5), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(5, 7), [0, 255, 0, 255]);
        assert_eq!(canvas.pixel(6, 5), [0, 0, 0, 0]);
        assert_eq!(canvas.pixel(2, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_bitmap_rotated_half_turn() {
        // Top-left at the pivot, rotated 180 degrees, lands up and to the left
        let sprite = Bitmap::solid("s", 5, 5, [0, 0, 255, 255]);
        let mut canvas = Canvas::new(20, 20);
        canvas.save();
        canvas.rotate(180.0, 10.0, 10.0);
        canvas.draw_bitmap(&sprite, 10.0, 10.0, &Paint::default());
        canvas.restore();

        assert_eq!(canvas.pixel(7, 7), [0, 0, 255, 255]);
        assert_eq!(canvas.pixel(12, 12), [0, 0, 0, 0]);
        assert_eq!(canvas.save_depth(), 0);
    }

    #[test]
    fn canvas_bitmap_desaturating_paint() {
        let sprite = Bitmap::solid("s", 2, 2, [255, 201, 14, 255]);
        let mut canvas = Canvas::new(4, 4);
        canvas.draw_bitmap(&sprite, 0.0, 0.0, &Paint::default().desaturated());

        let p = canvas.pixel(0, 0);
        assert_eq!(p[0], p[1]);
        assert_eq!(p[1], p[2]);
    }

    #[test]
    fn canvas_path_fill() {
        let path = Path::triangle(Vec2::new(10.0, 0.0), Vec2::new(0.0, 20.0), Vec2::new(20.0, 20.0));
        let mut canvas = Canvas::new(20, 20);
        canvas.draw_path(&path, &Paint::fill(RED));

        assert_eq!(canvas.pixel(10, 15), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(1, 1), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_path_follows_rotation() {
        let path = Path::triangle(Vec2::new(10.0, 10.0), Vec2::new(7.0, 20.0), Vec2::new(13.0, 20.0));
        let mut canvas = Canvas::new(20, 20);
        canvas.save();
        canvas.rotate(180.0, 10.0, 10.0);
        canvas.draw_path(&path, &Paint::fill(RED));
        canvas.restore();

        // The wedge now points from the centre towards the top edge
        assert_eq!(canvas.pixel(10, 2), [255, 0, 0, 255]);
        assert_eq!(canvas.pixel(10, 17), [0, 0, 0, 0]);
    }

    #[test]
    fn canvas_shadow_darkens_outside_stroke() {
        let mut canvas = Canvas::new(60, 60);
        canvas.clear(Color::WHITE);
        let paint = Paint::stroke(Color::WHITE, 2.0).with_shadow(6.0, Color::BLACK);
        canvas.draw_circle(30.0, 30.0, 15.0, &paint);

        // Two pixels outside the ring picks up some shadow
        let p = canvas.pixel(30, 12);
        assert!(p[0] < 255);
        // Far away stays untouched
        assert_eq!(canvas.pixel(2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn canvas_to_bitmap() {
        let mut canvas = Canvas::new(3, 3);
        canvas.clear(Color::WHITE);
        let bitmap = canvas.to_bitmap("frame");
        assert_eq!(bitmap.dimensions(), (3, 3));
        assert_eq!(bitmap.get(1, 1), [255, 255, 255, 255]);
    }
}
