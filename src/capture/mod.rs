//! Data captured from the failing process
//!
//! This module holds the inputs the renderers consume:
//! - [`value`]: typed snapshot of a runtime value ([`value::Value`])
//! - [`frame`]: source windows and per-frame locals
//! - [`traceback`]: all frames of one failure plus the exception
//!
//! Capturing happens elsewhere; these types only carry the result. They are
//! built once per page and never mutated by the renderers.

pub mod frame;
pub mod traceback;
pub mod value;

pub use frame::{CapturedFrame, Frame, LocalVar};
pub use traceback::Traceback;
pub use value::Value;
