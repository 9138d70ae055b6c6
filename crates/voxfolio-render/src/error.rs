/// Errors raised while populating instance buffers.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("instance count mismatch: object holds {expected}, got {actual} voxels")]
    CountMismatch { expected: usize, actual: usize },
}
