//! Errors raised while reading CAP XML

use thiserror::Error;

/// Malformed markup or encoding. Missing CAP elements are never an error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("Invalid UTF-8: {0}")]
    InvalidUtf8Owned(#[from] std::string::FromUtf8Error),

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),
}
