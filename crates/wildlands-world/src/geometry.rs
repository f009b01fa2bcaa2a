//! Planar geometry on the XZ ground plane.

use serde::{Deserialize, Serialize};

/// A point or direction on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, z: 0.0 };

    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (other - self).length()
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len < f32::EPSILON {
            None
        } else {
            Some(Vec2::new(self.x / len, self.z / len))
        }
    }

    /// Offset from this point by `radius` along `angle` (radians).
    pub fn offset_polar(self, angle: f32, radius: f32) -> Vec2 {
        Vec2::new(self.x + angle.cos() * radius, self.z + angle.sin() * radius)
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.z * rhs)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.z)
    }
}

/// Axis-aligned rectangle on the ground plane. Min edges are inclusive,
/// max edges exclusive, so adjacent areas sharing an edge do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f32,
    pub min_z: f32,
    pub max_x: f32,
    pub max_z: f32,
}

impl Bounds {
    pub const fn new(min_x: f32, min_z: f32, max_x: f32, max_z: f32) -> Self {
        Self {
            min_x,
            min_z,
            max_x,
            max_z,
        }
    }

    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min_x && x < self.max_x && z >= self.min_z && z < self.max_z
    }

    pub fn contains_point(&self, p: Vec2) -> bool {
        self.contains(p.x, p.z)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.min_x + self.max_x) * 0.5,
            (self.min_z + self.max_z) * 0.5,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.depth() <= 0.0
    }

    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_z < other.max_z
            && other.min_z < self.max_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basic() {
        assert!((Vec2::new(0.0, 0.0).distance(Vec2::new(3.0, 4.0)) - 5.0).abs() < 0.001);
        assert_eq!(Vec2::new(1.0, 1.0).distance(Vec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn normalized_zero_is_none() {
        assert!(Vec2::ZERO.normalized().is_none());
        let n = Vec2::new(0.0, 10.0).normalized().unwrap();
        assert!((n.z - 1.0).abs() < 0.001);
    }

    #[test]
    fn offset_polar_radius() {
        let p = Vec2::new(5.0, 5.0).offset_polar(1.3, 2.0);
        assert!((p.distance(Vec2::new(5.0, 5.0)) - 2.0).abs() < 0.001);
    }

    #[test]
    fn bounds_edges() {
        let b = Bounds::new(0.0, 0.0, 10.0, 10.0);
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(9.99, 9.99));
        assert!(!b.contains(10.0, 5.0));
        assert!(!b.contains(-0.1, 5.0));
        assert_eq!(b.center(), Vec2::new(5.0, 5.0));
    }

    #[test]
    fn adjacent_bounds_do_not_overlap() {
        let a = Bounds::new(0.0, 0.0, 10.0, 10.0);
        let b = Bounds::new(10.0, 0.0, 20.0, 10.0);
        let c = Bounds::new(5.0, 5.0, 15.0, 15.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert!(b.overlaps(&c));
    }

    #[test]
    fn inverted_bounds_empty() {
        assert!(Bounds::new(10.0, 0.0, 0.0, 10.0).is_empty());
        assert!(!Bounds::new(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
