use glam::{IVec3, UVec3, Vec3};

use crate::constants::GRID_EPSILON;

/// Axis-aligned bounding box. An empty box has `min > max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point. Empty for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().fold(Self::EMPTY, |acc, p| acc.including(p))
    }

    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::new(a.min(b).min(c), a.max(b).max(c))
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow to include a point.
    pub fn including(self, p: Vec3) -> Self {
        Self::new(self.min.min(p), self.max.max(p))
    }

    pub fn union(self, other: Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    pub fn size(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max - self.min
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Length of the min-to-max diagonal.
    pub fn diagonal(&self) -> f32 {
        self.size().length()
    }

    pub fn surface_area(&self) -> f32 {
        let d = self.size();
        2.0 * (d.x * d.y + d.y * d.z + d.z * d.x)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test against a ray given its precomputed inverse direction.
    /// Returns the entry/exit parameters clipped to `[t_min, t_max]`.
    pub fn ray_hit(&self, origin: Vec3, inv_dir: Vec3, t_min: f32, t_max: f32) -> Option<(f32, f32)> {
        let mut near = t_min;
        let mut far = t_max;
        for axis in 0..3 {
            // Ray parallel to this slab: inside or never.
            if inv_dir[axis].is_infinite() {
                if origin[axis] < self.min[axis] || origin[axis] > self.max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (self.min[axis] - origin[axis]) * inv_dir[axis];
            let t2 = (self.max[axis] - origin[axis]) * inv_dir[axis];
            near = near.max(t1.min(t2));
            far = far.min(t1.max(t2));
            if near > far {
                return None;
            }
        }
        Some((near, far))
    }
}

/// Number of samples per axis when stepping from `min` to `max` by `pitch`,
/// both ends inclusive.
pub fn grid_dimensions(bounds: &Aabb, pitch: f32) -> UVec3 {
    if bounds.is_empty() {
        return UVec3::ZERO;
    }
    let steps = bounds.size() / pitch + Vec3::splat(GRID_EPSILON);
    // Float-to-int casts saturate; keep the +1 from wrapping too
    steps.floor().as_uvec3().saturating_add(UVec3::ONE)
}

/// Total samples in a grid of `dimensions`, or None if the count does not
/// fit in a `u64`.
pub fn grid_cell_count(dimensions: UVec3) -> Option<u64> {
    (dimensions.x as u64)
        .checked_mul(dimensions.y as u64)?
        .checked_mul(dimensions.z as u64)
}

/// World-space position of the sample at `index`. Computed by multiplication
/// so every coordinate is exactly `min + n × pitch`.
pub fn grid_point(origin: Vec3, pitch: f32, index: UVec3) -> Vec3 {
    origin + index.as_vec3() * pitch
}

/// Integer cell of a grid-aligned position relative to `origin`.
pub fn grid_cell(position: Vec3, origin: Vec3, pitch: f32) -> IVec3 {
    ((position - origin) / pitch).round().as_ivec3()
}

/// True when `position` lies on the lattice `origin + n × pitch` (n ≥ 0)
/// within a small fraction of a pitch.
pub fn is_grid_aligned(position: Vec3, origin: Vec3, pitch: f32) -> bool {
    let steps = (position - origin) / pitch;
    let error = (steps - steps.round()).abs();
    steps.min_element() > -GRID_EPSILON && error.max_element() < GRID_EPSILON * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box() {
        assert!(Aabb::EMPTY.is_empty());
        assert_eq!(Aabb::EMPTY.size(), Vec3::ZERO);
        assert!(Aabb::from_points([]).is_empty());
    }

    #[test]
    fn test_from_points_and_union() {
        let a = Aabb::from_points([Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 5.0)]);
        assert_eq!(a.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(a.max, Vec3::new(1.0, 2.0, 5.0));

        let b = Aabb::new(Vec3::splat(4.0), Vec3::splat(6.0));
        let u = a.union(b);
        assert_eq!(u.min, Vec3::new(-1.0, 0.0, 3.0));
        assert_eq!(u.max, Vec3::splat(6.0));
    }

    #[test]
    fn test_diagonal() {
        let b = Aabb::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((b.diagonal() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_hit_axis_ray() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let origin = Vec3::new(-1.0, 0.5, 0.5);
        let inv = Vec3::new(1.0, f32::INFINITY, f32::INFINITY);
        let (near, far) = b.ray_hit(origin, inv, 0.0, f32::INFINITY).expect("should hit");
        assert!((near - 1.0).abs() < 1e-6);
        assert!((far - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ray_hit_misses_parallel_outside() {
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let origin = Vec3::new(-1.0, 2.0, 0.5);
        let inv = Vec3::new(1.0, f32::INFINITY, f32::INFINITY);
        assert!(b.ray_hit(origin, inv, 0.0, f32::INFINITY).is_none());
    }

    #[test]
    fn test_ray_hit_origin_on_face_plane() {
        // Origin lies exactly on the y = 1 plane, ray runs along +X inside the slab
        let b = Aabb::new(Vec3::ZERO, Vec3::ONE);
        let origin = Vec3::new(-1.0, 1.0, 0.5);
        let inv = Vec3::new(1.0, f32::INFINITY, f32::INFINITY);
        assert!(b.ray_hit(origin, inv, 0.0, f32::INFINITY).is_some());
    }

    #[test]
    fn test_grid_dimensions_inclusive() {
        let b = Aabb::new(Vec3::ZERO, Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(grid_dimensions(&b, 0.25), UVec3::new(5, 3, 1));
        assert_eq!(grid_dimensions(&Aabb::EMPTY, 0.25), UVec3::ZERO);
    }

    #[test]
    fn test_grid_dimensions_tolerates_rounding() {
        // 0.3 / 0.1 is 2.9999998 in f32; the last sample must still count
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(0.3));
        assert_eq!(grid_dimensions(&b, 0.1), UVec3::splat(4));
    }

    #[test]
    fn test_grid_point_and_cell() {
        let origin = Vec3::new(-1.0, 2.0, 0.5);
        let p = grid_point(origin, 0.5, UVec3::new(2, 0, 3));
        assert_eq!(p, Vec3::new(0.0, 2.0, 2.0));
        assert_eq!(grid_cell(p, origin, 0.5), IVec3::new(2, 0, 3));
        assert!(is_grid_aligned(p, origin, 0.5));
        assert!(!is_grid_aligned(p + Vec3::splat(0.2), origin, 0.5));
        assert!(!is_grid_aligned(origin - Vec3::X * 0.5, origin, 0.5));
    }

    #[test]
    fn test_tiny_pitch_cell_count_does_not_overflow() {
        let b = Aabb::new(Vec3::ZERO, Vec3::splat(10.0));
        let dims = grid_dimensions(&b, 1e-9);
        assert_eq!(dims, UVec3::splat(u32::MAX));
        assert_eq!(grid_cell_count(dims), None);
        assert_eq!(grid_cell_count(UVec3::new(5, 3, 1)), Some(15));
    }
}
