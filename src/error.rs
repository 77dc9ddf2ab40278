use thiserror::Error;

/// Errors surfaced by the detection and crop entry points.
///
/// No-detections is not an error: a blank or unsuitable scan yields an empty
/// result list. Internal degeneracies (flood-fill caps, tiny hulls) are
/// handled with conservative fallbacks and never reach the caller.
#[derive(Debug, Error)]
pub enum DetectError {
    /// The pixel buffer does not match the claimed dimensions
    #[error("buffer holds {actual} bytes but {width}x{height} needs {expected}")]
    BufferSize {
        /// Claimed image width
        width: usize,
        /// Claimed image height
        height: usize,
        /// Bytes required for the claimed dimensions
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },

    /// Width or height is zero
    #[error("image dimensions {width}x{height} are empty")]
    EmptyImage {
        /// Claimed image width
        width: usize,
        /// Claimed image height
        height: usize,
    },

    /// A detection configuration constraint was violated
    #[error("invalid detection config: {0}")]
    InvalidConfig(String),

    /// The requested crop target has a zero dimension
    #[error("crop target {width}x{height} is empty")]
    EmptyCrop {
        /// Requested output width
        width: usize,
        /// Requested output height
        height: usize,
    },
}

/// Check that a pixel buffer matches width * height * bytes_per_pixel
pub(crate) fn check_buffer(
    len: usize,
    width: usize,
    height: usize,
    bytes_per_pixel: usize,
) -> Result<(), DetectError> {
    if width == 0 || height == 0 {
        return Err(DetectError::EmptyImage { width, height });
    }
    let expected = width * height * bytes_per_pixel;
    if len != expected {
        return Err(DetectError::BufferSize {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_buffer() {
        assert!(check_buffer(400, 10, 10, 4).is_ok());
        assert!(matches!(
            check_buffer(399, 10, 10, 4),
            Err(DetectError::BufferSize { expected: 400, actual: 399, .. })
        ));
        assert!(matches!(
            check_buffer(0, 0, 10, 4),
            Err(DetectError::EmptyImage { .. })
        ));
    }
}
