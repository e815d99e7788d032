//! Handlebars helpers exposing the formatters to page templates
//!
//! ```handlebars
//! {{{code_table frame}}}
//! {{{var_table value}}}
//! ```
//!
//! `code_table` takes a frame object (`context_lineno`, `pre_context`,
//! `context_line`, `post_context`) and renders the `codetable` template.
//! `var_table` takes any value and renders the `vartable` template. A captured
//! value wrapped as `{"$captured": ...}` is decoded back into a
//! [`Value`] first, so it formats exactly as it was captured. Both write
//! markup that is already escaped, so they are used with triple braces.

use super::templates::{CODE_TABLE, VAR_TABLE};
use crate::capture::frame::Frame;
use crate::capture::value::Value;
use crate::render::inspect::Inspect;
use crate::render::source::{source_window, LineRecord};
use crate::render::variables::VariableFormatter;
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use serde::Serialize;

#[derive(Serialize)]
struct CodeTableData<'a> {
    lines: &'a [LineRecord],
}

/// Render a frame's source window with the `codetable` template
pub(crate) fn render_code_table(
    registry: &Handlebars<'_>,
    frame: &Frame,
) -> Result<String, RenderError> {
    let lines = source_window(frame);
    registry.render(CODE_TABLE, &CodeTableData { lines: &lines })
}

/// Render one variable with the `vartable` template
pub(crate) fn render_var_table(
    registry: &Handlebars<'_>,
    formatter: &VariableFormatter,
    value: &dyn Inspect,
) -> Result<String, RenderError> {
    registry.render(VAR_TABLE, &formatter.format(value))
}

pub(crate) struct CodeTableHelper;

impl HelperDef for CodeTableHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("code_table", 0))?;
        let frame: Frame = serde_json::from_value(param.value().clone())
            .map_err(|err| RenderErrorReason::NestedError(Box::new(err)))?;

        let _span = tracing::debug_span!("code_table", lineno = ?frame.context_lineno).entered();
        out.write(&render_code_table(r, &frame)?)?;
        Ok(())
    }
}

pub(crate) struct VarTableHelper {
    pub(crate) formatter: VariableFormatter,
}

impl HelperDef for VarTableHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex("var_table", 0))?;

        let _span = tracing::debug_span!("var_table").entered();
        let html = match Value::from_captured(param.value()) {
            Some(captured) => {
                let value =
                    captured.map_err(|err| RenderErrorReason::NestedError(Box::new(err)))?;
                render_var_table(r, &self.formatter, &value)?
            }
            None => render_var_table(r, &self.formatter, param.value())?,
        };
        out.write(&html)?;
        Ok(())
    }
}
