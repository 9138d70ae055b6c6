use voxfolio_core::error::CoreError;
use voxfolio_render::error::RenderError;

/// Errors that stop a voxelization run.
#[derive(Debug, thiserror::Error)]
pub enum VoxelizeError {
    #[error("invalid voxelization parameters: {0}")]
    InvalidParams(#[from] CoreError),

    #[error("sample grid too large: {cells} cells (limit {max})")]
    GridTooLarge { cells: u64, max: u64 },

    #[error("instance population failed: {0}")]
    Render(#[from] RenderError),
}
