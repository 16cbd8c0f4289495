use thiserror::Error;

/// Errors surfaced by the paint engine.
///
/// Degenerate gestures (out-of-bounds points, empty commits, stray pointer
/// events) are absorbed by the engine and never show up here. Only file and
/// font I/O can fail.
#[derive(Debug, Error)]
pub enum PaintError {
    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    #[error("Unknown font family: {0}")]
    UnknownFont(String),

    #[error("Failed to parse config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for paint operations
pub type PaintResult<T> = Result<T, PaintError>;
