/// Axis-aligned bounding box with union semantics
use glam::Vec3;
use std::ops::AddAssign;

/// Starts out invalid; the first merged point makes it a degenerate box at
/// that point, every later point widens it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
    pub valid: bool,
}

impl Aabb {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    #[inline]
    pub fn merge(&mut self, point: Vec3) {
        if self.valid {
            self.min = self.min.min(point);
            self.max = self.max.max(point);
        } else {
            self.min = point;
            self.max = point;
            self.valid = true;
        }
    }

    /// `max - min`, zero for an invalid box.
    #[inline]
    pub fn diagonal(&self) -> Vec3 {
        if self.valid {
            self.max - self.min
        } else {
            Vec3::ZERO
        }
    }

    #[inline]
    pub fn centre(&self) -> Vec3 {
        0.5 * (self.min + self.max)
    }
}

impl AddAssign<Vec3> for Aabb {
    #[inline]
    fn add_assign(&mut self, point: Vec3) {
        self.merge(point);
    }
}

impl FromIterator<Vec3> for Aabb {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut aabb = Aabb::default();
        for point in iter {
            aabb += point;
        }
        aabb
    }
}
