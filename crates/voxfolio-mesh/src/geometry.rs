use glam::Vec3;
use voxfolio_core::math::Aabb;

use crate::bvh::Bvh;
use crate::error::MeshError;
use crate::ray::{intersect_triangle, merge_hits, Ray, RayHit};

/// Indexed triangle geometry with an optional acceleration index.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds_tree: Option<Bvh>,
}

impl Geometry {
    /// Build from shared vertices and index triples. Every index must
    /// reference an existing vertex.
    pub fn new(positions: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        let vertex_count = positions.len();
        if let Some(&index) = triangles
            .iter()
            .flatten()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(Self {
            positions,
            triangles,
            bounds_tree: None,
        })
    }

    /// Build from unindexed triangles (three fresh vertices each).
    pub fn from_triangle_soup(soup: &[[Vec3; 3]]) -> Self {
        let positions = soup.iter().flatten().copied().collect();
        let triangles = (0..soup.len() as u32)
            .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
            .collect();
        Self {
            positions,
            triangles,
            bounds_tree: None,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner positions of triangle `index`.
    pub fn triangle(&self, index: usize) -> [Vec3; 3] {
        let [a, b, c] = self.triangles[index];
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Bounds of the referenced vertices.
    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(
            self.triangles
                .iter()
                .flatten()
                .map(|&i| self.positions[i as usize]),
        )
    }

    /// Build (or rebuild) the acceleration index over the current triangles.
    pub fn compute_bounds_tree(&mut self) {
        let bounds: Vec<Aabb> = (0..self.triangles.len())
            .map(|i| {
                let [a, b, c] = self.triangle(i);
                Aabb::from_triangle(a, b, c)
            })
            .collect();
        self.bounds_tree = Some(Bvh::build(&bounds));
    }

    pub fn bounds_tree(&self) -> Option<&Bvh> {
        self.bounds_tree.as_ref()
    }

    /// Apply `p -> (p - pivot) * scale`. Drops any acceleration index, which
    /// would no longer match the moved vertices.
    pub fn rescale_about(&mut self, pivot: Vec3, scale: f32) {
        for p in &mut self.positions {
            *p = (*p - pivot) * scale;
        }
        self.bounds_tree = None;
    }

    /// Every intersection along the ray, nearest first, with coincident hits
    /// merged. Uses the acceleration index when present.
    pub fn intersect_all(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = match &self.bounds_tree {
            Some(tree) => {
                let mut candidates = Vec::new();
                tree.candidates(ray, &mut candidates);
                candidates
                    .into_iter()
                    .filter_map(|tri| self.hit_triangle(ray, tri))
                    .collect()
            }
            None => (0..self.triangles.len() as u32)
                .filter_map(|tri| self.hit_triangle(ray, tri))
                .collect(),
        };
        merge_hits(&mut hits);
        hits
    }

    /// Nearest intersection along the ray.
    pub fn intersect_first(&self, ray: &Ray) -> Option<RayHit> {
        match &self.bounds_tree {
            Some(tree) => tree
                .closest(ray, |tri| self.hit_triangle(ray, tri).map(|h| h.distance))
                .and_then(|(tri, _)| self.hit_triangle(ray, tri)),
            None => (0..self.triangles.len() as u32)
                .filter_map(|tri| self.hit_triangle(ray, tri))
                .min_by(|a, b| a.distance.total_cmp(&b.distance)),
        }
    }

    fn hit_triangle(&self, ray: &Ray, tri: u32) -> Option<RayHit> {
        let [a, b, c] = self.triangle(tri as usize);
        intersect_triangle(ray, a, b, c).map(|distance| RayHit {
            distance,
            triangle: tri,
            point: ray.at(distance),
        })
    }
}
