use glam::{Affine2, Vec2};

/// Rotation by `degrees` about `pivot`.
///
/// Screen space has y pointing down, so positive angles turn clockwise on
/// screen, matching the usual canvas convention.
pub fn rotation_about(degrees: f32, pivot: Vec2) -> Affine2 {
    Affine2::from_translation(pivot)
        * Affine2::from_angle(degrees.to_radians())
        * Affine2::from_translation(-pivot)
}

/// Save/restore stack of canvas transforms
#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Affine2,
    /// Accumulated rotation in degrees, kept alongside the matrix for inspection
    degrees: f32,
    saved: Vec<(Affine2, f32)>,
}

impl TransformStack {
    pub fn new() -> Self {
        Self {
            current: Affine2::IDENTITY,
            degrees: 0.0,
            saved: Vec::new(),
        }
    }

    /// Push the current transform
    pub fn save(&mut self) {
        self.saved.push((self.current, self.degrees));
    }

    /// Pop back to the last saved transform; unbalanced restores are ignored
    pub fn restore(&mut self) {
        if let Some((transform, degrees)) = self.saved.pop() {
            self.current = transform;
            self.degrees = degrees;
        }
    }

    /// Concatenate a rotation about `(px, py)` onto the current transform
    pub fn rotate(&mut self, degrees: f32, px: f32, py: f32) {
        self.current = self.current * rotation_about(degrees, Vec2::new(px, py));
        self.degrees += degrees;
    }

    pub fn current(&self) -> Affine2 {
        self.current
    }

    /// Total rotation currently applied, in degrees
    pub fn rotation_degrees(&self) -> f32 {
        self.degrees
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn is_identity(&self) -> bool {
        self.current == Affine2::IDENTITY
    }
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}
