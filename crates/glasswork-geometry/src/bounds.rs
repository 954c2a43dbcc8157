use glam::Vec3;

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Returns the tightest box around `points`, or `None` when empty.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = Self::new(first, first);
        for p in iter {
            bounds.expand(*p);
        }
        Some(bounds)
    }

    #[inline]
    pub fn expand(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.min + offset, self.max + offset)
    }

    /// Largest extent in the XY plane.
    #[inline]
    pub fn max_planar_dimension(&self) -> f32 {
        let size = self.size();
        size.x.max(size.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_empty_is_none() {
        let pts: Vec<Vec3> = Vec::new();
        assert!(Aabb::from_points(&pts).is_none());
    }

    #[test]
    fn from_points_covers_all() {
        let pts = [Vec3::new(1.0, -2.0, 0.0), Vec3::new(-3.0, 4.0, 1.0), Vec3::new(0.0, 0.0, 0.5)];
        let bb = Aabb::from_points(&pts).unwrap();
        assert_eq!(bb.min, Vec3::new(-3.0, -2.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 4.0, 1.0));
        assert_eq!(bb.center(), Vec3::new(-1.0, 1.0, 0.5));
        assert_eq!(bb.max_planar_dimension(), 6.0);
    }

    #[test]
    fn translated_moves_center() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(bb.translated(-bb.center()).center(), Vec3::ZERO);
    }
}
