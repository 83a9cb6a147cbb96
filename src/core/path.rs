use glam::Vec2;

/// Closed polygon
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    points: Vec<Vec2>,
}

impl Path {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn triangle(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self::new(vec![a, b, c])
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Even-odd containment test
    pub fn contains(&self, p: Vec2) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Axis-aligned bounds as (min, max); `None` for an empty path
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| (lo.min(*p), hi.max(*p))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wedge() -> Path {
        Path::triangle(Vec2::new(200.0, 200.0), Vec2::new(173.0, 400.0), Vec2::new(227.0, 400.0))
    }

    #[test]
    fn test_contains_inside_and_outside() {
        let path = wedge();
        assert!(path.contains(Vec2::new(200.0, 350.0)));
        assert!(!path.contains(Vec2::new(200.0, 150.0)));
        assert!(!path.contains(Vec2::new(180.0, 210.0)));
    }

    #[test]
    fn test_bounds() {
        let (lo, hi) = wedge().bounds().unwrap();
        assert_eq!(lo, Vec2::new(173.0, 200.0));
        assert_eq!(hi, Vec2::new(227.0, 400.0));
        assert!(Path::new(Vec::new()).bounds().is_none());
    }

    #[test]
    fn test_degenerate_path_contains_nothing() {
        let line = Path::new(vec![Vec2::ZERO, Vec2::ONE]);
        assert!(!line.contains(Vec2::new(0.5, 0.5)));
    }
}
