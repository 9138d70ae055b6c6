//! Grid sampling over the combined bounds of every surface.

use glam::{UVec3, Vec3};
use voxfolio_core::color::{shade_base_color, Rgb};
use voxfolio_core::constants::MAX_GRID_CELLS;
use voxfolio_core::math::{grid_cell_count, grid_dimensions, grid_point, Aabb};
use voxfolio_core::types::{Voxel, VoxelMaterial};
use voxfolio_mesh::material::Material;
use voxfolio_mesh::scene::Surface;

use super::oracle;
use crate::error::VoxelizeError;

/// Unshaded voxels in grid traversal order, plus the grid they came from.
#[derive(Debug, Clone)]
pub struct GridSample {
    pub voxels: Vec<Voxel>,
    /// Lowest voxel Y, None when nothing was accepted.
    pub min_y: Option<f32>,
    /// Grid origin: minimum corner of the combined surface bounds.
    pub origin: Vec3,
    /// Sample count per axis.
    pub dimensions: UVec3,
}

/// Color and material a surface contributes to its voxels.
///
/// Emitters keep their emissive color verbatim. Everything else gets its base
/// color remapped in HSL space.
pub fn voxel_appearance(material: &Material) -> (Rgb, VoxelMaterial) {
    if material.is_emissive() {
        (
            material.emissive,
            VoxelMaterial::Emissive {
                intensity: material.emissive_intensity,
            },
        )
    } else {
        (shade_base_color(material.color), VoxelMaterial::Bsdf)
    }
}

/// Combined bounds of all surfaces.
pub fn combined_bounds(surfaces: &[Surface]) -> Aabb {
    surfaces
        .iter()
        .fold(Aabb::EMPTY, |acc, s| acc.union(s.geometry.bounding_box()))
}

/// Visit every grid point (x outer, then y, then z) and emit one voxel for
/// the first surface that accepts it.
pub fn sample_grid(surfaces: &[Surface], grid_size: f32) -> Result<GridSample, VoxelizeError> {
    let bounds = combined_bounds(surfaces);
    let dimensions = grid_dimensions(&bounds, grid_size);
    let cells = match grid_cell_count(dimensions) {
        Some(cells) if cells <= MAX_GRID_CELLS => cells,
        too_many => {
            return Err(VoxelizeError::GridTooLarge {
                cells: too_many.unwrap_or(u64::MAX),
                max: MAX_GRID_CELLS,
            })
        }
    };
    let origin = if bounds.is_empty() { Vec3::ZERO } else { bounds.min };
    log::debug!(
        "sampling {}x{}x{} grid ({cells} cells) from {origin} at pitch {grid_size}",
        dimensions.x,
        dimensions.y,
        dimensions.z
    );

    // Resolved once per surface, outside the sampling loop
    let appearances: Vec<(Rgb, VoxelMaterial)> = surfaces
        .iter()
        .map(|s| voxel_appearance(&s.material))
        .collect();

    let mut voxels = Vec::new();
    let mut min_y: Option<f32> = None;

    for x in 0..dimensions.x {
        for y in 0..dimensions.y {
            for z in 0..dimensions.z {
                let point = grid_point(origin, grid_size, UVec3::new(x, y, z));
                let hit = surfaces
                    .iter()
                    .position(|surface| oracle::accepts(point, surface, grid_size));
                if let Some(index) = hit {
                    let (color, material) = appearances[index];
                    voxels.push(Voxel::new(point, color, material));
                    min_y = Some(min_y.map_or(point.y, |m| m.min(point.y)));
                }
            }
        }
    }

    Ok(GridSample {
        voxels,
        min_y,
        origin,
        dimensions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use voxfolio_core::math::{grid_cell, is_grid_aligned};
    use voxfolio_core::types::MaterialType;
    use voxfolio_mesh::primitives::box_surface;

    fn unit_box(material: Material) -> Surface {
        let mut surface = box_surface(Vec3::ZERO, Vec3::ONE, material);
        surface.geometry.compute_bounds_tree();
        surface
    }

    #[test]
    fn test_appearance_emissive_verbatim() {
        let m = Material::new(Rgb::new(0.2, 0.2, 0.2)).with_emissive(Rgb::new(1.0, 0.5, 0.0), 4.0);
        let (color, material) = voxel_appearance(&m);
        assert_eq!(color, Rgb::new(1.0, 0.5, 0.0));
        assert_eq!(material, VoxelMaterial::Emissive { intensity: 4.0 });
    }

    #[test]
    fn test_appearance_bsdf_remapped() {
        let m = Material::new(Rgb::new(1.0, 0.0, 0.0));
        let (color, material) = voxel_appearance(&m);
        assert_eq!(material.material_type(), MaterialType::Bsdf);
        assert_eq!(color, shade_base_color(Rgb::new(1.0, 0.0, 0.0)));
        assert_ne!(color, Rgb::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_sample_grid_shape() {
        let sample = sample_grid(&[unit_box(Material::default())], 0.25).expect("should sample");
        assert_eq!(sample.dimensions, UVec3::splat(5));
        assert_eq!(sample.origin, Vec3::ZERO);
        assert_eq!(sample.min_y, Some(0.0));
        // Every shell point plus the near interior; only the center is too deep
        assert_eq!(sample.voxels.len(), 124);
        assert!(!sample.voxels.iter().any(|v| v.position == Vec3::splat(0.5)));
    }

    #[test]
    fn test_sample_order_is_x_outer_z_inner() {
        let sample = sample_grid(&[unit_box(Material::default())], 0.25).expect("should sample");
        let cells: Vec<(u32, u32, u32)> = sample
            .voxels
            .iter()
            .map(|v| {
                let c = grid_cell(v.position, sample.origin, 0.25);
                (c.x as u32, c.y as u32, c.z as u32)
            })
            .collect();
        let mut sorted = cells.clone();
        sorted.sort();
        assert_eq!(cells, sorted);
        assert_eq!(cells[0], (0, 0, 0));
        assert_eq!(cells[1], (0, 0, 1));
    }

    #[test]
    fn test_positions_aligned_and_unique() {
        let sample = sample_grid(&[unit_box(Material::default())], 0.25).expect("should sample");
        let mut seen = HashSet::new();
        for v in &sample.voxels {
            assert!(is_grid_aligned(v.position, sample.origin, 0.25));
            assert!(seen.insert(grid_cell(v.position, sample.origin, 0.25)));
        }
    }

    #[test]
    fn test_first_surface_wins() {
        let red = unit_box(Material::new(Rgb::new(1.0, 0.0, 0.0)));
        let blue = unit_box(Material::new(Rgb::new(0.0, 0.0, 1.0)));
        let sample = sample_grid(&[red, blue], 0.25).expect("should sample");
        let red_color = shade_base_color(Rgb::new(1.0, 0.0, 0.0));
        assert_eq!(sample.voxels.len(), 124);
        assert!(sample.voxels.iter().all(|v| v.color == red_color));
    }

    #[test]
    fn test_no_surfaces_samples_nothing() {
        let sample = sample_grid(&[], 0.25).expect("empty input is not an error");
        assert!(sample.voxels.is_empty());
        assert_eq!(sample.min_y, None);
        assert_eq!(sample.dimensions, UVec3::ZERO);
    }

    #[test]
    fn test_grid_guard() {
        let result = sample_grid(&[unit_box(Material::default())], 0.001);
        assert!(matches!(result, Err(VoxelizeError::GridTooLarge { .. })));
    }

    #[test]
    fn test_grid_guard_with_tiny_pitch() {
        // ~1e7 samples per axis; the product no longer fits in a u64
        let result = sample_grid(&[unit_box(Material::default())], 1e-7);
        assert!(matches!(
            result,
            Err(VoxelizeError::GridTooLarge { cells: u64::MAX, .. })
        ));
        let mut big = box_surface(Vec3::ZERO, Vec3::splat(10.0), Material::default());
        big.geometry.compute_bounds_tree();
        assert!(matches!(
            sample_grid(&[big], 1e-6),
            Err(VoxelizeError::GridTooLarge { .. })
        ));
    }
}
