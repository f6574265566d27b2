//! Error handling for the GEDCOM reader.

use std::io;

/// Specialized error type for GEDCOM parsing and dataset lookups
#[derive(Debug, thiserror::Error)]
pub enum GedcomReaderError {
    /// Error opening or reading a source
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A caller-supplied person id that resolves to no record in the dataset
    #[error("person not found: {0}")]
    PersonNotFound(String),
}

/// Result type for GEDCOM reader operations
pub type Result<T> = std::result::Result<T, GedcomReaderError>;
