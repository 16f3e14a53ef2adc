use bevy::prelude::*;
use bevy::render::primitives::Aabb;

/// Axis-aligned world bounds of a loaded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for ModelBounds {
    fn default() -> Self {
        Self::empty()
    }
}

impl ModelBounds {
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    #[cfg(test)]
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    pub fn include_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Grow to contain a mesh-local AABB placed by `transform`.
    pub fn include_aabb(&mut self, aabb: &Aabb, transform: &GlobalTransform) {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        for corner in 0..8 {
            let sign = Vec3::new(
                if corner & 1 == 0 { -1.0 } else { 1.0 },
                if corner & 2 == 0 { -1.0 } else { 1.0 },
                if corner & 4 == 0 { -1.0 } else { 1.0 },
            );
            self.include_point(transform.transform_point(center + half * sign));
        }
    }

    /// Centre of the box; an empty box is centred on the origin.
    pub fn center(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bounds_centre_on_origin() {
        let bounds = ModelBounds::empty();
        assert!(bounds.is_empty());
        assert_eq!(bounds.center(), Vec3::ZERO);
        assert_eq!(bounds.size(), Vec3::ZERO);
    }

    #[test]
    fn transformed_aabbs_accumulate() {
        let unit = Aabb::from_min_max(Vec3::splat(-1.0), Vec3::splat(1.0));
        let mut bounds = ModelBounds::empty();

        bounds.include_aabb(&unit, &GlobalTransform::from_xyz(10.0, 0.0, 0.0));
        bounds.include_aabb(
            &unit,
            &GlobalTransform::from(Transform::from_xyz(0.0, 4.0, 0.0).with_scale(Vec3::splat(2.0))),
        );

        assert_eq!(bounds.min, Vec3::new(-2.0, -1.0, -2.0));
        assert_eq!(bounds.max, Vec3::new(11.0, 6.0, 2.0));
        assert!(bounds.center().distance(Vec3::new(4.5, 2.5, 0.0)) < 1e-5);
    }
}
