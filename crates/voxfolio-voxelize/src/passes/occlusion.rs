//! Neighbor-count ambient occlusion over a finished voxel set.

use std::collections::HashSet;

use glam::{IVec3, Vec3};
use voxfolio_core::direction::{occlusion_kernel_weight, OCCLUSION_KERNEL};
use voxfolio_core::math::grid_cell;
use voxfolio_core::types::Voxel;

/// Occupied cells keyed by integer offset from the set's minimum corner.
struct OccupancyLookup {
    origin: Vec3,
    grid_size: f32,
    cells: HashSet<IVec3>,
}

impl OccupancyLookup {
    fn build(voxels: &[Voxel], grid_size: f32) -> Self {
        let origin = voxels
            .iter()
            .map(|v| v.position)
            .reduce(Vec3::min)
            .unwrap_or(Vec3::ZERO);
        let cells = voxels
            .iter()
            .map(|v| grid_cell(v.position, origin, grid_size))
            .collect();
        Self {
            origin,
            grid_size,
            cells,
        }
    }

    fn cell(&self, position: Vec3) -> IVec3 {
        grid_cell(position, self.origin, self.grid_size)
    }

    fn occupied(&self, cell: IVec3) -> bool {
        self.cells.contains(&cell)
    }
}

/// Occlusion factor per voxel, in input order. 1 is unoccluded, 0 is fully
/// surrounded by the kernel.
pub fn occlusion_factors(voxels: &[Voxel], grid_size: f32) -> Vec<f32> {
    let lookup = OccupancyLookup::build(voxels, grid_size);
    let total = occlusion_kernel_weight();
    voxels
        .iter()
        .map(|voxel| {
            let cell = lookup.cell(voxel.position);
            let occlusion: f32 = OCCLUSION_KERNEL
                .iter()
                .filter(|(dir, _)| lookup.occupied(cell + dir.offset()))
                .map(|(_, weight)| weight)
                .sum();
            (1.0 - occlusion / total).clamp(0.0, 1.0)
        })
        .collect()
}

/// Darken every voxel color by its occlusion factor. Positions and materials
/// are untouched, and no voxel is added or removed.
///
/// All factors are computed from the unmodified set before any color changes.
pub fn apply_ambient_occlusion(voxels: &mut [Voxel], grid_size: f32) {
    let factors = occlusion_factors(voxels, grid_size);
    for (voxel, factor) in voxels.iter_mut().zip(factors) {
        voxel.color = voxel.color.scale(factor);
    }
}
