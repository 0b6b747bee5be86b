//! Layout providers.
//!
//! A provider turns the low-level primitives of one extraction backend into a
//! [`DocumentLayout`]. Two built-in providers cover the usual backend shapes:
//! character-granularity dumps ([`CharGroupingProvider`]) and line/span dumps
//! ([`LineSpanProvider`]). Decoding the document itself is the backend's job.
//!
//! # Example
//!
//! ```
//! use pdfoutline::provider::{LayoutDump, TokenProvider};
//! use pdfoutline::analysis::GroupingTolerances;
//!
//! let dump = LayoutDump::from_json(r#"{"chars": [[]], "lines": null}"#).unwrap();
//! let chars = dump.char_provider(GroupingTolerances::default());
//! assert_eq!(chars.name(), "chars");
//! assert!(dump.line_provider().extract().is_err());
//! ```

mod chars;
mod dump;
mod lines;

pub use chars::{group_chars, CharGroupingProvider, CharRecord};
pub use dump::LayoutDump;
pub use lines::{LineRecord, LineSpanProvider, SpanRecord, BOLD_FLAG};

use crate::error::{Error, Result};
use crate::model::DocumentLayout;

/// Trait for layout providers.
///
/// Implement this trait to plug another extraction backend into the pipeline.
/// Providers for the same document must be independent of each other; the
/// orchestrator may run them on separate threads.
pub trait TokenProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Produce the page-ordered token layout for the document.
    fn extract(&self) -> Result<DocumentLayout>;
}

/// A layout that was already extracted serves itself.
impl TokenProvider for DocumentLayout {
    fn name(&self) -> &str {
        &self.provider
    }

    fn extract(&self) -> Result<DocumentLayout> {
        Ok(self.clone())
    }
}

/// Stand-in for a backend that produced nothing for this document.
#[derive(Debug, Clone)]
pub struct UnavailableProvider {
    name: String,
    reason: String,
}

impl UnavailableProvider {
    /// Create a provider that always fails with the given reason.
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

impl TokenProvider for UnavailableProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn extract(&self) -> Result<DocumentLayout> {
        Err(Error::provider(&self.name, &self.reason))
    }
}
