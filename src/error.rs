//! Error types for the untag library.

use std::io;
use thiserror::Error;

/// Result type alias for untag operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The container could not be read or written.
    #[error("Container error: {0}")]
    Container(#[from] zip::result::ZipError),

    /// The container is missing a required part.
    #[error("Missing document part: {0}")]
    MissingPart(String),

    /// The document part is not well-formed XML.
    #[error("Malformed document XML: {0}")]
    MalformedXml(String),

    /// Error emitting XML for the rewritten part.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The removal label is not a non-empty digit string.
    #[error("Invalid removal label: {0:?}")]
    InvalidLabel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::MissingPart("word/document.xml".to_string());
        assert_eq!(err.to_string(), "Missing document part: word/document.xml");

        let err = Error::InvalidLabel("abc".to_string());
        assert_eq!(err.to_string(), "Invalid removal label: \"abc\"");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
