//! Error types for the page controller.

use thiserror::Error;

/// Failure to retrieve a record from the expense server
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status
    #[error("Server error {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

/// An element the page is expected to contain was not found
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Missing page element '{selector}'")]
pub struct MissingElement {
    pub selector: &'static str,
}
