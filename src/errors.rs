//! Error types for value formatting and page assembly
//!
//! Two families of failure exist:
//! - [`ReprError`]: a value could not be turned into text. These never leave the
//!   formatters; they degrade to the `"?"` placeholder.
//! - [`PageError`]: template sources could not be loaded or compiled.
//!
//! Rendering failures are reported as [`handlebars::RenderError`] and returned
//! to the caller unchanged.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a textual representation of a value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReprError {
    /// Nesting exceeded the configured depth limit
    #[error("value nested deeper than {0} levels")]
    TooDeep(usize),

    /// The host value refused to describe itself
    #[error("host value could not be represented: {0}")]
    Host(String),
}

/// Failure to build a [`DebugPage`](crate::page::DebugPage)
#[derive(Debug, Error)]
pub enum PageError {
    /// A template file existed but could not be read
    #[error("failed to read template {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template source failed to compile
    #[error("invalid template: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
}

impl From<handlebars::TemplateError> for PageError {
    fn from(err: handlebars::TemplateError) -> Self {
        PageError::Template(Box::new(err))
    }
}
