//! Errors raised while reading a single document

use std::path::PathBuf;
use thiserror::Error;

/// Why a document could not be turned into a [`Document`](super::Document)
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("front matter opened at line {line} is never closed")]
    Unterminated { line: usize },

    #[error("invalid front matter key at line {line}: {text:?}")]
    InvalidKey { line: usize, text: String },

    #[error("invalid front matter: {0}")]
    InvalidMetadata(#[from] serde_yaml::Error),

    #[error("missing front matter block")]
    MissingFrontMatter,

    #[error("document body is empty")]
    EmptyBody,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A document that was found but could not be loaded
#[derive(Debug, Error)]
#[error("{}: {}", .path.display(), .error)]
pub struct MalformedDocument {
    /// Path relative to the source directory, or the directory itself
    /// when the walk could not start
    pub path: PathBuf,
    pub error: DocumentError,
}

impl MalformedDocument {
    pub fn new(path: impl Into<PathBuf>, error: DocumentError) -> Self {
        Self {
            path: path.into(),
            error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_display_includes_path() {
        let err = MalformedDocument::new(
            "_posts/broken.md",
            DocumentError::Unterminated { line: 1 },
        );
        let msg = err.to_string();
        assert!(msg.starts_with("_posts/broken.md: "));
        assert!(msg.contains("never closed"));
    }
}
