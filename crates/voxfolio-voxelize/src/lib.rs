//! Mesh to voxel conversion: inside test, grid sampling, occlusion shading.

pub mod error;
pub mod passes;
pub mod pipeline;

pub use error::VoxelizeError;
pub use pipeline::{voxelize, voxelize_prepared, EmptyReason, VoxelizeOutcome, Voxelization};
