//! Batched cube instances for drawing a voxel list in one call.

pub mod cube;
pub mod error;
pub mod instanced;

pub use cube::{CubeGeometry, CubeVertex};
pub use error::RenderError;
pub use instanced::{InstanceRaw, InstancedVoxels, SharedMaterial};
