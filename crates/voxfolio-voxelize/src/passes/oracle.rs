//! Thin-shell inside test.
//!
//! A point is kept when a ray along one of the six axis directions crosses
//! the surface an odd number of times and the nearest crossing lies within
//! `SURFACE_DISTANCE_FACTOR` grid pitches. The distance bound turns the
//! parity test into a shell test: deep interior points are rejected.

use glam::Vec3;
use voxfolio_core::constants::SURFACE_DISTANCE_FACTOR;
use voxfolio_core::direction::{Direction, RAY_DIRECTIONS};
use voxfolio_mesh::geometry::Geometry;
use voxfolio_mesh::ray::Ray;
use voxfolio_mesh::scene::Surface;

/// Parity and proximity test along a single axis direction.
pub fn is_near_surface(point: Vec3, direction: Direction, geometry: &Geometry, grid_size: f32) -> bool {
    let ray = Ray::new(point, direction.unit());
    let hits = geometry.intersect_all(&ray);
    match hits.first() {
        Some(nearest) => {
            hits.len() % 2 == 1 && nearest.distance <= SURFACE_DISTANCE_FACTOR * grid_size
        }
        None => false,
    }
}

/// First direction, in `RAY_DIRECTIONS` order, that accepts `point`.
pub fn accepting_direction(point: Vec3, surface: &Surface, grid_size: f32) -> Option<Direction> {
    RAY_DIRECTIONS
        .into_iter()
        .find(|&dir| is_near_surface(point, dir, &surface.geometry, grid_size))
}

pub fn accepts(point: Vec3, surface: &Surface, grid_size: f32) -> bool {
    accepting_direction(point, surface, grid_size).is_some()
}
