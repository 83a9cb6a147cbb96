use crate::core::{Bitmap, Paint, Path};

/// Drawing surface the face renders into.
///
/// Coordinates are in pixels with the origin at the top-left corner and y
/// pointing down. Every draw call is affected by the current transform,
/// which `save`/`restore` bracket.
pub trait FaceCanvas {
    /// Push the current transform
    fn save(&mut self);

    /// Pop the transform pushed by the matching `save`
    fn restore(&mut self);

    /// Rotate by `degrees` (clockwise on screen) about `(px, py)`
    fn rotate(&mut self, degrees: f32, px: f32, py: f32);

    /// Draw a bitmap with its top-left corner at `(x, y)`
    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32, paint: &Paint);

    /// Draw a circle centred on `(cx, cy)`
    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint);

    /// Fill a closed path
    fn draw_path(&mut self, path: &Path, paint: &Paint);

    /// Surface size in pixels
    fn dimensions(&self) -> (u32, u32);
}
