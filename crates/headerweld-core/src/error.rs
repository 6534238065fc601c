//! Error types for headerweld

use std::path::PathBuf;
use thiserror::Error;

/// headerweld error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Map an I/O failure on a header to the matching fatal variant
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound(path)
        } else {
            Error::FileReadError { path, source }
        }
    }
}

/// Result type alias for headerweld
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_not_found_maps_to_file_not_found() {
        let err = Error::from_read("a.hpp", IoError::from(ErrorKind::NotFound));
        assert!(matches!(err, Error::FileNotFound(ref p) if p.ends_with("a.hpp")));
        assert_eq!(err.to_string(), "File not found: a.hpp");
    }

    #[test]
    fn test_other_io_maps_to_read_error() {
        let err = Error::from_read("b.hpp", IoError::from(ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::FileReadError { .. }));
        assert!(err.to_string().starts_with("Failed to read b.hpp"));
    }
}
