use thiserror::Error;

/// Errors raised by shared voxfolio types.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("parameter `{name}` must be finite and positive (got {value})")]
    NonPositiveParameter { name: &'static str, value: f32 },

    #[error("parameter `{name}` must be finite and non-negative (got {value})")]
    NegativeParameter { name: &'static str, value: f32 },

    #[error("invalid hex color string: {0:?}")]
    InvalidHexColor(String),
}
