pub mod compat;
pub mod compress;
pub mod error;
pub mod format;
pub mod load;
pub mod save;

pub use error::PersistError;
pub use format::{ColorValue, Metadata, VoxelFile, VoxelRecord};
pub use load::{load, load_json, LoadedVoxels};
pub use save::{save_compressed, save_json};
