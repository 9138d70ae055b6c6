/// Errors raised while loading or assembling mesh data.
#[derive(Debug, thiserror::Error)]
pub enum MeshError {
    #[error("failed to read mesh file: {0}")]
    Io(String),

    #[error("binary STL too short ({0} bytes, minimum 84)")]
    StlTooShort(usize),

    #[error("truncated binary STL: expected {expected} bytes, got {actual}")]
    StlTruncated { expected: usize, actual: usize },

    #[error("ASCII STL is not valid UTF-8")]
    InvalidUtf8,

    #[error("malformed vertex on line {line}: {text:?}")]
    MalformedVertex { line: usize, text: String },

    #[error("mesh contains no triangles")]
    NoTriangles,

    #[error("triangle index {index} out of range ({vertex_count} vertices)")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
