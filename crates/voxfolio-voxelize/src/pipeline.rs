//! Voxelization entry points.
//!
//! Each call is self-contained: it consumes or borrows its surfaces and
//! returns everything it produced. Nothing persists between runs.

use std::time::Instant;

use glam::{UVec3, Vec3};
use voxfolio_core::math::grid_cell_count;
use voxfolio_core::types::{Voxel, VoxelParams};
use voxfolio_mesh::prepare::prepare_surfaces;
use voxfolio_mesh::scene::{SceneNode, Surface};
use voxfolio_render::instanced::InstancedVoxels;

use crate::error::VoxelizeError;
use crate::passes::{occlusion, sample};

/// Why a run produced nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The model has no triangle surfaces.
    NoSurfaces,
    /// Surfaces exist but no grid point passed the inside test, usually a
    /// pitch too coarse for the model's thickness.
    NoVoxels,
}

/// Shaded voxels and their populated render object.
#[derive(Debug, Clone)]
pub struct Voxelization {
    /// Grid traversal order; instance `i` mirrors voxel `i`.
    pub voxels: Vec<Voxel>,
    pub instances: InstancedVoxels,
    pub min_y: f32,
    pub origin: Vec3,
    pub dimensions: UVec3,
}

impl Voxelization {
    /// Number of grid points that were tested.
    pub fn cell_count(&self) -> u64 {
        grid_cell_count(self.dimensions).unwrap_or(u64::MAX)
    }
}

#[derive(Debug, Clone)]
pub enum VoxelizeOutcome {
    Voxelized(Voxelization),
    Empty(EmptyReason),
}

impl VoxelizeOutcome {
    pub fn is_empty(&self) -> bool {
        matches!(self, VoxelizeOutcome::Empty(_))
    }

    /// Voxels of a successful run; empty slice otherwise.
    pub fn voxels(&self) -> &[Voxel] {
        match self {
            VoxelizeOutcome::Voxelized(v) => &v.voxels,
            VoxelizeOutcome::Empty(_) => &[],
        }
    }

    pub fn into_voxelization(self) -> Option<Voxelization> {
        match self {
            VoxelizeOutcome::Voxelized(v) => Some(v),
            VoxelizeOutcome::Empty(_) => None,
        }
    }
}

/// Full pipeline on a loaded model: normalize to `model_size`, prepare the
/// surfaces, sample, shade, and build instances. The scene is consumed.
pub fn voxelize(mut scene: SceneNode, params: &VoxelParams) -> Result<VoxelizeOutcome, VoxelizeError> {
    params.validate()?;
    match scene.normalize(params.model_size) {
        Some(scale) => log::debug!("normalized '{}' by {scale}", scene.name),
        None => log::debug!("'{}' has no extent, skipping normalization", scene.name),
    }
    let surfaces = prepare_surfaces(scene);
    voxelize_prepared(&surfaces, params)
}

/// Pipeline on surfaces that are already prepared and positioned. No
/// normalization is applied.
pub fn voxelize_prepared(
    surfaces: &[Surface],
    params: &VoxelParams,
) -> Result<VoxelizeOutcome, VoxelizeError> {
    params.validate()?;
    if surfaces.is_empty() {
        log::info!("no triangle surfaces to voxelize");
        return Ok(VoxelizeOutcome::Empty(EmptyReason::NoSurfaces));
    }

    let start = Instant::now();
    let sample = sample::sample_grid(surfaces, params.grid_size)?;
    let Some(min_y) = sample.min_y else {
        log::warn!(
            "no voxels produced from {} surfaces at grid size {}; the pitch may be too coarse",
            surfaces.len(),
            params.grid_size
        );
        return Ok(VoxelizeOutcome::Empty(EmptyReason::NoVoxels));
    };

    let mut voxels = sample.voxels;
    occlusion::apply_ambient_occlusion(&mut voxels, params.grid_size);

    let mut instances = InstancedVoxels::new(params, voxels.len());
    instances.populate(&voxels)?;

    log::info!(
        "voxelized {} surfaces into {} voxels in {:.1}ms",
        surfaces.len(),
        voxels.len(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(VoxelizeOutcome::Voxelized(Voxelization {
        voxels,
        instances,
        min_y,
        origin: sample.origin,
        dimensions: sample.dimensions,
    }))
}
