use voxfolio_core::error::CoreError;

/// Errors that can occur while saving or loading voxel files.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected VXFL)")]
    InvalidMagic,

    #[error("unsupported voxel file version {0}")]
    UnsupportedVersion(u32),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("file is not valid UTF-8")]
    InvalidUtf8,

    #[error("truncated file: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    #[error("decompressed size {claimed} exceeds limit of {limit} bytes")]
    DecompressedTooLarge { claimed: usize, limit: usize },

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("invalid params: {0}")]
    InvalidParams(CoreError),

    #[error("voxel {index}: {source}")]
    InvalidVoxel { index: usize, source: CoreError },
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e.to_string())
    }
}
