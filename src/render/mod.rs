//! Formatters that turn captured frame data into template-ready records.
//!
//! - **[`source`]**: source-context window → ordered [`LineRecord`]s
//! - **[`variables`]**: any [`Inspect`] value → tagged, escaped [`VariableRender`]
//! - **[`pretty`]**: the one-line and structured text forms both build on
//! - **[`inspect`]**: the capability interface values describe themselves through
//!
//! Every formatter is a pure function of its input. Nothing here performs I/O
//! or keeps state between calls.

pub mod inspect;
pub mod options;
pub mod pretty;
pub mod source;
pub mod variables;

pub use inspect::{Inspect, Shape, SortKey};
pub use options::FormatOptions;
pub use source::{source_window, LineMode, LineRecord};
pub use variables::{MappingEntry, VariableFormatter, VariableRender};

/// Nesting limit used when no [`FormatOptions`] are supplied
pub const DEFAULT_MAX_DEPTH: usize = 64;
