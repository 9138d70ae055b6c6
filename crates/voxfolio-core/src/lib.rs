pub mod color;
pub mod constants;
pub mod direction;
pub mod error;
pub mod math;
pub mod types;

pub use color::{Hsl, Rgb};
pub use direction::Direction;
pub use error::CoreError;
pub use math::Aabb;
pub use types::{MaterialType, Voxel, VoxelMaterial, VoxelParams};
