//! # Introduction
//!
//! tracepage renders a diagnostic traceback page: given the source context and
//! local variables captured from each stack frame of a failure, it produces an
//! HTML fragment showing the lines around each failing line and a dump of each
//! variable. All runtime data is clipped and escaped before it reaches the
//! markup, so no value, however malformed, can break or inject into the page.
//!
//! ## Rendering pipeline
//!
//! ```text
//! Captured frames → Formatters → Handlebars templates → HTML fragment
//! ```
//!
//! 1. [`capture`]: the captured inputs. [`capture::Frame`] is a source window,
//!    [`capture::Value`] is a typed variable snapshot, and
//!    [`capture::Traceback`] collects the frames of one failure.
//! 2. [`render`]: pure formatters. [`render::source_window`] numbers source
//!    lines; [`render::VariableFormatter`] classifies any
//!    [`render::Inspect`] value as mapping, sequence or scalar and renders it
//!    safely.
//! 3. [`page`]: [`page::DebugPage`] compiles the templates and exposes the
//!    formatters to them as `code_table` and `var_table` helpers.
//! 4. [`errors`]: error types for formatting and page assembly.
//!
//! ## Degraded output
//!
//! Two placeholders are the only failures a reader of the page ever sees: `?`
//! for a value that could not be formatted, and `Sourcecode not available` for
//! a frame without source context.

pub mod capture;
pub mod errors;
pub mod page;
pub mod render;
