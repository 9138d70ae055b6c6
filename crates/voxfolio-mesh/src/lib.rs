//! Triangle meshes, scene graphs, and ray queries for voxelization.

pub mod bvh;
pub mod error;
pub mod geometry;
pub mod material;
pub mod prepare;
pub mod primitives;
pub mod ray;
pub mod scene;
pub mod stl;

pub use bvh::Bvh;
pub use error::MeshError;
pub use geometry::Geometry;
pub use material::{Material, Side};
pub use prepare::prepare_surfaces;
pub use ray::{Ray, RayHit};
pub use scene::{SceneNode, Surface};
pub use stl::{load_stl, load_stl_file};
