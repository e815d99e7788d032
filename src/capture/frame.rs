//! Captured stack frames
//!
//! - [`Frame`]: the source window around the failing line of one stack level
//! - [`CapturedFrame`]: a frame's location, source window and local variables
//! - [`LocalVar`]: one named local variable
//!
//! All of these are produced by the host's frame capture and are read-only
//! afterwards. Frames deserialize from the JSON layout a traceback dump uses;
//! locals serialize their value in the wrapped form described in
//! [`value`](super::value).

use super::value::{serialize_captured, Value};
use serde::{Deserialize, Serialize};

/// Source context captured around the failing line of one stack level.
///
/// When `context_lineno` is `None` no source was available and the other
/// fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Line number of the first pre-context line, minus one
    #[serde(default)]
    pub context_lineno: Option<usize>,
    #[serde(default)]
    pub pre_context: Vec<String>,
    #[serde(default)]
    pub context_line: String,
    #[serde(default)]
    pub post_context: Vec<String>,
}

impl Frame {
    pub fn new(
        context_lineno: Option<usize>,
        pre_context: Vec<String>,
        context_line: impl Into<String>,
        post_context: Vec<String>,
    ) -> Self {
        Frame {
            context_lineno,
            pre_context,
            context_line: context_line.into(),
            post_context,
        }
    }

    /// A frame for which no source could be found
    pub fn unavailable() -> Self {
        Frame::default()
    }

    /// Build a window of `radius` lines either side of 1-based line `lineno`
    /// from a full source text. Lines past either end of the file are omitted.
    /// Returns an unavailable frame if `lineno` is not in `source`.
    pub fn from_source(source: &str, lineno: usize, radius: usize) -> Self {
        let lines: Vec<&str> = source.lines().collect();
        if lineno == 0 || lineno > lines.len() {
            return Frame::unavailable();
        }

        let cur = lineno - 1;
        let start = cur.saturating_sub(radius);
        let end = (cur + radius + 1).min(lines.len());
        let owned = |slice: &[&str]| -> Vec<String> {
            slice.iter().map(|l| l.to_string()).collect()
        };

        Frame {
            context_lineno: Some(start),
            pre_context: owned(&lines[start..cur]),
            context_line: lines[cur].to_string(),
            post_context: owned(&lines[cur + 1..end]),
        }
    }
}

/// Local variable of a captured frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalVar {
    pub name: String,
    #[serde(serialize_with = "serialize_captured")]
    pub value: Value,
}

impl LocalVar {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        LocalVar {
            name: name.into(),
            value,
        }
    }
}

/// One stack level of a traceback
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapturedFrame {
    pub filename: String,
    pub function: String,
    pub lineno: usize,
    pub frame: Frame,
    pub locals: Vec<LocalVar>, // Declaration order
}

impl CapturedFrame {
    pub fn new(filename: impl Into<String>, function: impl Into<String>, lineno: usize) -> Self {
        CapturedFrame {
            filename: filename.into(),
            function: function.into(),
            lineno,
            frame: Frame::unavailable(),
            locals: Vec::new(),
        }
    }

    /// Attach the source window
    pub fn with_source(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    /// Declare a local variable
    pub fn declare_var(mut self, name: impl Into<String>, value: Value) -> Self {
        self.locals.push(LocalVar::new(name, value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::source::{source_window, LineMode};
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "one\ntwo\nthree\nfour\nfive\n";

    #[test]
    fn test_from_source_middle() {
        let frame = Frame::from_source(SOURCE, 3, 1);
        assert_eq!(
            frame,
            Frame::new(Some(1), vec!["two".into()], "three", vec!["four".into()])
        );
    }

    #[test]
    fn test_from_source_numbers_match_file() {
        let frame = Frame::from_source(SOURCE, 2, 5);
        let lines = source_window(&frame);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].lineno, 1);
        assert_eq!(lines[1].mode, LineMode::Cur);
        assert_eq!(lines[1].lineno, 2);
        assert_eq!(lines[1].code, "two");
        assert_eq!(lines[4].lineno, 5);
    }

    #[test]
    fn test_from_source_out_of_range() {
        assert_eq!(Frame::from_source(SOURCE, 0, 2), Frame::unavailable());
        assert_eq!(Frame::from_source(SOURCE, 6, 2), Frame::unavailable());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let frame: Frame = serde_json::from_str(r#"{"context_lineno": 4, "context_line": "x"}"#)
            .unwrap();
        assert_eq!(frame, Frame::new(Some(4), vec![], "x", vec![]));

        let frame: Frame = serde_json::from_str("{}").unwrap();
        assert_eq!(frame.context_lineno, None);
    }

    #[test]
    fn test_captured_frame_keeps_declaration_order() {
        let captured = CapturedFrame::new("app.rs", "main", 3)
            .declare_var("zeta", Value::Int(1))
            .declare_var("alpha", Value::Int(2));
        let names: Vec<&str> = captured.locals.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
