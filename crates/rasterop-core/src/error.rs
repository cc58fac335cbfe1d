//! Error types shared across the pixel-processing core.

use thiserror::Error;

/// Errors reported by grid construction, marshalling and pixel operations.
///
/// Every operation either completes fully or leaves its input grid
/// unchanged; in-place operations validate their arguments before touching
/// any pixel.
#[derive(Debug, Error)]
pub enum Error {
    /// The surface stores something other than 24-bit RGB.
    #[error("unsupported pixel depth: {bytes_per_pixel} bytes per pixel (only 24-bit RGB is supported)")]
    UnsupportedDepth {
        /// Bytes per pixel declared by the surface.
        bytes_per_pixel: u8,
    },

    /// The surface's channel shifts do not describe a 24-bit RGB word.
    #[error("unsupported channel layout: shifts ({r_shift}, {g_shift}, {b_shift}) must be a permutation of 0/8/16")]
    UnsupportedLayout {
        r_shift: u8,
        g_shift: u8,
        b_shift: u8,
    },

    /// A byte or pixel buffer does not match its declared dimensions.
    #[error("buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// A pixel coordinate outside the grid was addressed.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// An operation argument outside its documented domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A pixel buffer could not be allocated.
    #[error("failed to allocate pixel buffer of {bytes} bytes")]
    Allocation { bytes: usize },

    /// The external image codec failed at the marshalling boundary.
    #[error("codec error: {0}")]
    Codec(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedDepth { bytes_per_pixel: 4 };
        assert_eq!(
            err.to_string(),
            "unsupported pixel depth: 4 bytes per pixel (only 24-bit RGB is supported)"
        );

        let err = Error::OutOfBounds {
            x: 10,
            y: 3,
            width: 8,
            height: 8,
        };
        assert_eq!(err.to_string(), "coordinate (10, 3) is outside the 8x8 grid");

        let err = Error::InvalidArgument("quantize levels must be at least 2".to_string());
        assert_eq!(
            err.to_string(),
            "invalid argument: quantize levels must be at least 2"
        );
    }
}
