//! Debug page assembly
//!
//! [`DebugPage`] owns a compiled set of templates and renders a page context
//! into an HTML fragment. Page templates reach the formatters through two
//! helpers, `code_table` and `var_table`, which stand in for
//! per-frame and per-variable render calls.
//!
//! The page context is an open JSON object. Nothing in it is validated up
//! front: templates are compiled in strict mode, so a placeholder that names a
//! missing key fails the render and the error is handed back unchanged.
//!
//! ```
//! use tracepage::capture::{CapturedFrame, Frame, Traceback, Value};
//! use tracepage::page::DebugPage;
//!
//! let mut traceback = Traceback::new("KeyError", "'missing'");
//! traceback.push_frame(
//!     CapturedFrame::new("app.rs", "lookup", 3)
//!         .with_source(Frame::new(Some(1), vec!["let key = input;".into()], "table[key]", vec![]))
//!         .declare_var("key", Value::from("missing")),
//! );
//!
//! let page = DebugPage::new();
//! let html = page.render(&traceback.to_context()?)?;
//! assert!(html.contains(r#"<tr class="cur"><td class="lineno">3</td><td class="code">table[key]</td></tr>"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod helpers;
pub mod templates;

use crate::capture::frame::Frame;
use crate::errors::PageError;
use crate::render::inspect::Inspect;
use crate::render::options::FormatOptions;
use crate::render::variables::VariableFormatter;
use handlebars::{Handlebars, RenderError};
use helpers::{CodeTableHelper, VarTableHelper};
use std::fmt;

pub use templates::TemplateSet;

/// Page-level data handed to the body template
pub type PageContext = serde_json::Map<String, serde_json::Value>;

/// Renders traceback pages from a fixed set of templates
pub struct DebugPage {
    registry: Handlebars<'static>,
    formatter: VariableFormatter,
}

impl fmt::Debug for DebugPage {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("DebugPage")
            .field("options", self.formatter.options())
            .finish_non_exhaustive()
    }
}

impl Default for DebugPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugPage {
    /// Page with the built-in templates and default [`FormatOptions`]
    #[allow(clippy::missing_panics_doc)] // Built-in templates are covered by tests
    pub fn new() -> Self {
        Self::with_templates(TemplateSet::default(), FormatOptions::default())
            .expect("built-in templates should compile")
    }

    /// Page with custom template sources and formatting limits.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Template`] if any of the sources fails to compile.
    pub fn with_templates(
        templates: TemplateSet,
        options: FormatOptions,
    ) -> Result<Self, PageError> {
        let formatter = VariableFormatter::new(options);
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_helper("code_table", Box::new(CodeTableHelper));
        registry.register_helper("var_table", Box::new(VarTableHelper { formatter }));
        templates.register(&mut registry)?;

        Ok(DebugPage {
            registry,
            formatter,
        })
    }

    /// Render the full page.
    ///
    /// # Errors
    ///
    /// Returns the template engine's error unchanged, e.g. when the body
    /// template refers to a key the context does not contain.
    pub fn render(&self, context: &PageContext) -> Result<String, RenderError> {
        let _span = tracing::debug_span!("render_page", keys = context.len()).entered();
        self.registry.render(templates::BODY, context)
    }

    /// Render the source window of a single frame
    ///
    /// # Errors
    ///
    /// Returns the template engine's error unchanged.
    pub fn code_table(&self, frame: &Frame) -> Result<String, RenderError> {
        helpers::render_code_table(&self.registry, frame)
    }

    /// Render a single variable
    ///
    /// # Errors
    ///
    /// Returns the template engine's error unchanged. Values that cannot be
    /// formatted are not errors; they render as `?`.
    pub fn var_table(&self, value: &dyn Inspect) -> Result<String, RenderError> {
        helpers::render_var_table(&self.registry, &self.formatter, value)
    }
}
