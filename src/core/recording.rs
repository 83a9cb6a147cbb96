use super::bitmap::Bitmap;
use super::paint::Paint;
use super::path::Path;
use crate::math::{Color, TransformStack};
use crate::traits::FaceCanvas;

/// One draw call as issued, with the rotation in effect at the time
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Bitmap {
        name: String,
        x: f32,
        y: f32,
        width: u32,
        height: u32,
        rotation: f32,
        paint: Paint,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        rotation: f32,
        paint: Paint,
    },
    Path {
        path: Path,
        rotation: f32,
        paint: Paint,
    },
}

impl DrawOp {
    pub fn rotation(&self) -> f32 {
        match self {
            DrawOp::Bitmap { rotation, .. }
            | DrawOp::Circle { rotation, .. }
            | DrawOp::Path { rotation, .. } => *rotation,
        }
    }

    pub fn paint(&self) -> &Paint {
        match self {
            DrawOp::Bitmap { paint, .. } | DrawOp::Circle { paint, .. } | DrawOp::Path { paint, .. } => paint,
        }
    }
}

/// Canvas that records draw calls instead of rasterizing them
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    ops: Vec<DrawOp>,
    transforms: TransformStack,
    width: u32,
    height: u32,
    max_depth: usize,
}

impl RecordingCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            ops: Vec::new(),
            transforms: TransformStack::new(),
            width,
            height,
            max_depth: 0,
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Bitmap draws of the sprite called `name`
    pub fn bitmaps_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a DrawOp> + 'a {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Bitmap { name: n, .. } if n == name))
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter().filter(|op| matches!(op, DrawOp::Circle { .. }))
    }

    /// Path fills painted with `color`
    pub fn paths_colored(&self, color: Color) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Path { paint, .. } if paint.color == color))
    }

    /// Open saves; zero once every save has been restored
    pub fn save_depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Deepest save nesting seen so far
    pub fn max_save_depth(&self) -> usize {
        self.max_depth
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl FaceCanvas for RecordingCanvas {
    fn save(&mut self) {
        self.transforms.save();
        self.max_depth = self.max_depth.max(self.transforms.depth());
    }

    fn restore(&mut self) {
        self.transforms.restore();
    }

    fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.transforms.rotate(degrees, px, py);
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, x: f32, y: f32, paint: &Paint) {
        self.ops.push(DrawOp::Bitmap {
            name: bitmap.name().to_string(),
            x,
            y,
            width: bitmap.width(),
            height: bitmap.height(),
            rotation: self.transforms.rotation_degrees(),
            paint: paint.clone(),
        });
    }

    fn draw_circle(&mut self, cx: f32, cy: f32, radius: f32, paint: &Paint) {
        self.ops.push(DrawOp::Circle {
            cx,
            cy,
            radius,
            rotation: self.transforms.rotation_degrees(),
            paint: paint.clone(),
        });
    }

    fn draw_path(&mut self, path: &Path, paint: &Paint) {
        self.ops.push(DrawOp::Path {
            path: path.clone(),
            rotation: self.transforms.rotation_degrees(),
            paint: paint.clone(),
        });
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
