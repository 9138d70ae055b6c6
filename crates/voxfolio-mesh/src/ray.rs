use glam::Vec3;
use voxfolio_core::constants::HIT_MERGE_EPSILON;

/// Determinants below this are treated as a ray parallel to the triangle.
const PARALLEL_EPSILON: f32 = 1e-12;

/// Tolerance on barycentric coordinates and on hits slightly behind the origin,
/// so points lying exactly on a face or edge still register.
const BARYCENTRIC_EPSILON: f32 = 1e-6;

/// Half-line `origin + t * direction`, `t >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    /// Component-wise reciprocal of `direction`, cached for slab tests.
    pub inv_direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// One ray/triangle intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Ray parameter of the hit. Equals distance for unit directions.
    pub distance: f32,
    /// Index of the triangle within its geometry.
    pub triangle: u32,
    pub point: Vec3,
}

/// Double-sided Möller–Trumbore intersection.
///
/// Returns the ray parameter of the hit, clamped to zero when the origin lies
/// on the triangle. Back faces are hit like front faces.
pub fn intersect_triangle(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let pvec = ray.direction.cross(e2);
    let det = e1.dot(pvec);
    if det.abs() < PARALLEL_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;

    let tvec = ray.origin - v0;
    let u = tvec.dot(pvec) * inv_det;
    if !(-BARYCENTRIC_EPSILON..=1.0 + BARYCENTRIC_EPSILON).contains(&u) {
        return None;
    }

    let qvec = tvec.cross(e1);
    let v = ray.direction.dot(qvec) * inv_det;
    if v < -BARYCENTRIC_EPSILON || u + v > 1.0 + BARYCENTRIC_EPSILON {
        return None;
    }

    let t = e2.dot(qvec) * inv_det;
    if t < -BARYCENTRIC_EPSILON {
        return None;
    }
    Some(t.max(0.0))
}

/// Sort hits by distance and collapse hits closer than `HIT_MERGE_EPSILON`
/// along the ray into the first of them.
pub fn merge_hits(hits: &mut Vec<RayHit>) {
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.triangle.cmp(&b.triangle)));
    let mut last_kept = f32::NEG_INFINITY;
    hits.retain(|hit| {
        if hit.distance - last_kept < HIT_MERGE_EPSILON {
            false
        } else {
            last_kept = hit.distance;
            true
        }
    });
}
