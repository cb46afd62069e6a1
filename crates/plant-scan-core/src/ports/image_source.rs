//! Image source port for loading photos from various sources.

use thiserror::Error;

use crate::domain::ImageInput;

/// An input the source found but could not read.
///
/// Carries the path so a batch can report which photo was skipped.
#[derive(Debug, Error)]
#[error("{path}: {reason:#}")]
pub struct ReadError {
    /// Where the source tried to read from.
    pub path: String,
    /// Why reading failed.
    pub reason: anyhow::Error,
}

impl ReadError {
    /// Creates a read error for `path`.
    #[must_use]
    pub fn new(path: impl Into<String>, reason: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            reason,
        }
    }
}

/// Port for loading still-encoded photos from a source.
///
/// Sources hand over bytes, not pixels: whether the bytes decode is for the
/// quality gate to judge.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over inputs from this source.
    ///
    /// # Errors
    ///
    /// Individual items may be errors if an input cannot be read.
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInput, ReadError>> + Send + '_>;

    /// Returns the total number of inputs, if known.
    fn count_hint(&self) -> Option<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_display_includes_path_and_chain() {
        let reason = anyhow::anyhow!("permission denied").context("Failed to read image");
        let err = ReadError::new("garden/fern.jpg", reason);
        assert_eq!(err.path, "garden/fern.jpg");
        assert_eq!(
            err.to_string(),
            "garden/fern.jpg: Failed to read image: permission denied"
        );
    }
}
