use thiserror::Error;

/// Failures constructing a grid from display dimensions
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("pixel size must be at least 1")]
    ZeroPixelSize,

    #[error("a {width}x{height} display holds no {pixel_size}px cells")]
    EmptyGrid {
        width: u32,
        height: u32,
        pixel_size: u32,
    },
}
