//! Error types for the scratch card engine
//!
//! Only construction-time APIs return these. Runtime paths (storage reads
//! and writes, notification delivery, canvas initialisation) soft-fail and
//! log instead:
//! - Configuration validation
//! - Prize catalog construction
//! - Overlay image decoding
//! - Key/value storage access

use std::path::PathBuf;

/// Main scratch card error type
#[derive(Debug, thiserror::Error)]
pub enum ScratchError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Prize catalog error
    #[error("prize error: {0}")]
    Prize(#[from] PrizeError),

    /// Storage backend error
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Overlay image error
    #[error("image error: {0}")]
    Image(#[from] ImageError),
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Scratch radius must be a positive, finite number of CSS pixels
    #[error("scratch radius must be positive and finite, got {0}")]
    InvalidRadius(f64),

    /// Completion threshold must lie strictly between 0 and 1
    #[error("completion threshold must be in (0, 1), got {0}")]
    InvalidThreshold(f64),

    /// A storage key is empty
    #[error("storage key `{0}` must not be empty")]
    EmptyStorageKey(&'static str),
}

/// Prize catalog errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrizeError {
    /// Catalog has no cards to assign
    #[error("prize catalog is empty")]
    EmptyCatalog,

    /// Two cards share an identifier
    #[error("duplicate prize id: {0}")]
    DuplicateId(String),
}

/// Decoded image errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    /// Width or height is zero
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    ZeroSized {
        /// Declared width
        width: u32,
        /// Declared height
        height: u32,
    },

    /// Pixel data length does not match `width * height * 4`
    #[error("expected {expected} bytes of RGBA data, got {actual}")]
    LengthMismatch {
        /// Required length
        expected: usize,
        /// Supplied length
        actual: usize,
    },
}

/// Key/value storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Storage is disabled or otherwise unreachable
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Write rejected for lack of space
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// Backing file could not be read or written
    #[error("storage I/O failed for {path}: {source}")]
    Io {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backing file holds something other than a JSON object of strings
    #[error("corrupt storage file {path}: {source}")]
    Corrupt {
        /// Backing file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// Check if the error is transient (a later write may succeed)
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::QuotaExceeded | Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_scratch_error() {
        let err: ScratchError = ConfigError::InvalidThreshold(1.5).into();
        assert!(matches!(err, ScratchError::Config(_)));
        assert_eq!(
            err.to_string(),
            "configuration error: completion threshold must be in (0, 1), got 1.5"
        );
    }

    #[test]
    fn quota_exceeded_is_transient() {
        assert!(StorageError::QuotaExceeded.is_transient());
        assert!(!StorageError::Unavailable("disabled".into()).is_transient());
    }
}
