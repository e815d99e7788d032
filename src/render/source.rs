//! Source window formatting
//!
//! Turns the captured context of one [`Frame`] into numbered line records for
//! the code table template. The failing line is tagged [`LineMode::Cur`]; the
//! lines around it are tagged `Pre` and `Post`.
//!
//! When a frame carries no line number the source is unavailable, and a single
//! placeholder record is produced so the template still has a row to show.

use crate::capture::frame::Frame;
use serde::Serialize;

/// Placeholder text shown when a frame has no source context
pub const SOURCE_UNAVAILABLE: &str = "Sourcecode not available";

/// Display role of a source line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    Pre,
    Cur,
    Post,
}

/// One numbered source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRecord {
    pub mode: LineMode,
    pub lineno: usize,
    pub code: String,
}

/// Number the lines of a frame's source window
pub fn source_window(frame: &Frame) -> Vec<LineRecord> {
    let Some(context_lineno) = frame.context_lineno else {
        return vec![LineRecord {
            mode: LineMode::Cur,
            lineno: 1,
            code: SOURCE_UNAVAILABLE.to_string(),
        }];
    };

    let pre = frame.pre_context.iter().map(|l| (LineMode::Pre, l));
    let cur = std::iter::once((LineMode::Cur, &frame.context_line));
    let post = frame.post_context.iter().map(|l| (LineMode::Post, l));

    pre.chain(cur)
        .chain(post)
        .zip(context_lineno + 1..)
        .map(|((mode, code), lineno)| LineRecord {
            mode,
            lineno,
            code: code.clone(),
        })
        .collect()
}
