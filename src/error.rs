//! Error types for pdfoutline library.

use std::io;
use thiserror::Error;

/// Result type alias for pdfoutline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building an outline.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A layout dump could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A layout provider could not produce tokens for the document.
    #[error("Provider '{provider}' failed: {reason}")]
    ProviderExtraction {
        /// Name of the failing provider
        provider: String,
        /// Why extraction failed
        reason: String,
    },

    /// Extraction succeeded but produced no tokens.
    #[error("Provider '{0}' produced no text tokens")]
    EmptyLayout(String),

    /// The font multiset is empty or has no valid sizes.
    #[error("Provider '{0}' has no usable font sizes; font-based detection disabled")]
    DegenerateHierarchy(String),

    /// Input that is structurally valid JSON but not a usable layout.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Shorthand for a provider extraction failure.
    pub fn provider(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ProviderExtraction {
            provider: provider.into(),
            reason: reason.into(),
        }
    }
}
