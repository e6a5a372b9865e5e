//! Error types shared by the puzzle engine, the session controller and its collaborators

use std::fmt;
use std::path::PathBuf;

/// Main error type for all puzzle operations
///
/// Nothing here is fatal: every variant is either recovered where it occurs
/// or handed back to the caller as a dismissible notice.
#[derive(Debug)]
pub enum PuzzleError {
    /// An image or quiz collaborator failed or returned no usable payload
    Generation {
        /// Collaborator call that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// A user-supplied file does not declare an image type
    InvalidFile {
        /// Path of the rejected file
        path: PathBuf,
        /// Type the file declared (derived from its extension)
        declared_type: String,
    },

    /// Persisted state could not be parsed
    ///
    /// Recovered by the history loader; only surfaces when a caller parses
    /// stored records directly.
    MalformedPersistedState {
        /// Storage key holding the record
        key: String,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// A request of the same kind is already outstanding
    RequestInFlight {
        /// Operation that was rejected
        operation: &'static str,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// A terminal command could not be understood
    InvalidCommand {
        /// The offending input line
        input: String,
        /// Explanation of what was expected
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to serialize a record for storage
    Serialization {
        /// Storage key being written
        key: String,
        /// Underlying serialization error
        source: serde_json::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generation { operation, reason } => {
                write!(f, "Generation failed during {operation}: {reason}")
            }
            Self::InvalidFile {
                path,
                declared_type,
            } => {
                write!(
                    f,
                    "'{}' is not an image (declared type '{declared_type}'); please upload an image file",
                    path.display()
                )
            }
            Self::MalformedPersistedState { key, source } => {
                write!(f, "Stored record '{key}' is malformed: {source}")
            }
            Self::RequestInFlight { operation } => {
                write!(f, "A {operation} request is already in progress")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidCommand { input, reason } => {
                write!(f, "Cannot understand '{input}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Serialization { key, source } => {
                write!(f, "Failed to serialize record '{key}': {source}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::MalformedPersistedState { source, .. } | Self::Serialization { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            key: String::from("<unknown>"),
            source: err,
        }
    }
}

impl PuzzleError {
    /// Whether this error should be shown to the player
    ///
    /// Malformed persisted state is recovered silently and never reaches the player.
    pub const fn is_user_visible(&self) -> bool {
        !matches!(self, Self::MalformedPersistedState { .. })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a generation error for a failed collaborator call
pub fn generation_error(operation: &'static str, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Generation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid command error
pub fn invalid_command(input: &str, reason: &impl ToString) -> PuzzleError {
    PuzzleError::InvalidCommand {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}
