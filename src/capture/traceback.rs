//! A complete captured traceback
//!
//! [`Traceback`] collects the frames of one failure, outermost call first, and
//! turns them into the page context the default body template expects.

use super::frame::CapturedFrame;
use crate::page::PageContext;
use serde::Serialize;
use std::fmt::Write;

/// The frames and exception of one failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Traceback {
    pub title: String,
    pub exception_type: String,
    pub exception_value: String,
    frames: Vec<CapturedFrame>, // Outermost call first
}

impl Traceback {
    pub fn new(exception_type: impl Into<String>, exception_value: impl Into<String>) -> Self {
        let exception_type = exception_type.into();
        Traceback {
            title: exception_type.clone(),
            exception_type,
            exception_value: exception_value.into(),
            frames: Vec::new(),
        }
    }

    /// Override the page title, which defaults to the exception type
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Push the next (more deeply nested) frame
    pub fn push_frame(&mut self, frame: CapturedFrame) {
        self.frames.push(frame);
    }

    /// Get all frames, outermost first
    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    /// Get the innermost frame, where the failure happened
    pub fn current_frame(&self) -> Option<&CapturedFrame> {
        self.frames.last()
    }

    /// Get the depth of the traceback
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Unformatted text version of the traceback
    pub fn plaintext(&self) -> String {
        let mut out = String::new();
        for captured in &self.frames {
            let _ = writeln!(
                out,
                "  at {} ({}:{})",
                captured.function, captured.filename, captured.lineno
            );
            if captured.frame.context_lineno.is_some() {
                let _ = writeln!(out, "      {}", captured.frame.context_line.trim());
            }
        }
        let _ = write!(out, "{}: {}", self.exception_type, self.exception_value);
        out
    }

    /// Build the context for [`DebugPage::render`](crate::page::DebugPage::render):
    /// `title`, `exception_type`, `exception_value`, `frames` and `plaintext`.
    ///
    /// # Errors
    ///
    /// Fails only if a captured value cannot be serialized to JSON.
    pub fn to_context(&self) -> Result<PageContext, serde_json::Error> {
        let mut context = match serde_json::to_value(self)? {
            serde_json::Value::Object(map) => map,
            _ => PageContext::new(),
        };
        context.insert("plaintext".to_string(), self.plaintext().into());
        Ok(context)
    }
}
