//! Error types for the conversion pipeline.
//!
//! Parse problems never appear here: malformed metadata, preview, or timing
//! fields degrade to defaults inside the parser. What does end a conversion
//! is an unreadable archive, a missing beatmap entry, or a failure writing
//! output.

use std::io;

use thiserror::Error;

use crate::archive::ArchiveError;

/// An error that ends the conversion of one archive.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The archive could not be read, or holds no beatmap description.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// Filesystem failure while producing output. Files already written
    /// for the item stay in place; there is no rollback.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The descriptor could not be encoded.
    #[error("Failed to encode project descriptor: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ConvertError {
    /// Create an I/O error with operation context.
    pub fn io_error(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_displays_operation_context() {
        let err = ConvertError::io_error(
            "writing bundle.ini",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("writing bundle.ini"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn archive_error_passes_through() {
        let err: ConvertError = ArchiveError::NoBeatmap {
            path: "/maps/a.osz".into(),
        }
        .into();
        assert!(err.to_string().contains("a.osz"));
    }
}
