//! Error types for padbuf.

use std::fmt;

/// Errors reported by the fallible constructors and configuration checks.
///
/// The buffer operations themselves (`append`, `prepend`, `release`, ...)
/// never fail; they reallocate instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaddedError {
    /// The requested length does not fit in the requested capacity.
    LengthExceedsCapacity {
        /// The requested length.
        len: usize,
        /// The requested capacity.
        cap: usize,
    },

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for PaddedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddedError::LengthExceedsCapacity { len, cap } => {
                write!(f, "length exceeds capacity: {} bytes (cap {})", len, cap)
            }
            PaddedError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for PaddedError {}
