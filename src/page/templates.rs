//! Template sources for the debug page
//!
//! Three templates make up a page:
//! - `body`: the page itself; iterates over frames and locals
//! - `codetable`: one frame's source window, fed `{ lines: [LineRecord] }`
//! - `vartable`: one variable, fed a `VariableRender` (`kind` + `payload`)
//!
//! Built-in sources are compiled into the crate. A directory of replacement
//! sources can be loaded with [`TemplateSet::load_dir`].

use crate::errors::PageError;
use handlebars::Handlebars;
use std::fs;
use std::io;
use std::path::Path;

pub(crate) const BODY: &str = "body";
pub(crate) const CODE_TABLE: &str = "codetable";
pub(crate) const VAR_TABLE: &str = "vartable";

const DEFAULT_BODY: &str = include_str!("templates/body.html.hbs");
const DEFAULT_CODE_TABLE: &str = include_str!("templates/codetable.html.hbs");
const DEFAULT_VAR_TABLE: &str = include_str!("templates/vartable.html.hbs");

/// Handlebars sources for the three page templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    pub body: String,
    pub codetable: String,
    pub vartable: String,
}

impl Default for TemplateSet {
    fn default() -> Self {
        TemplateSet {
            body: DEFAULT_BODY.to_string(),
            codetable: DEFAULT_CODE_TABLE.to_string(),
            vartable: DEFAULT_VAR_TABLE.to_string(),
        }
    }
}

impl TemplateSet {
    /// Read `body.html.hbs`, `codetable.html.hbs` and `vartable.html.hbs`
    /// from `dir`. A missing file yields an empty template.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Io`] if a file exists but cannot be read.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, PageError> {
        let dir = dir.as_ref();
        Ok(TemplateSet {
            body: load_resource(dir, "body.html.hbs")?,
            codetable: load_resource(dir, "codetable.html.hbs")?,
            vartable: load_resource(dir, "vartable.html.hbs")?,
        })
    }

    pub(crate) fn register(&self, registry: &mut Handlebars<'_>) -> Result<(), PageError> {
        registry.register_template_string(BODY, &self.body)?;
        registry.register_template_string(CODE_TABLE, &self.codetable)?;
        registry.register_template_string(VAR_TABLE, &self.vartable)?;
        Ok(())
    }
}

fn load_resource(dir: &Path, name: &str) -> Result<String, PageError> {
    let path = dir.join(name);
    match fs::read_to_string(&path) {
        Ok(source) => Ok(source),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "template not found, using an empty one");
            Ok(String::new())
        }
        Err(source) => Err(PageError::Io { path, source }),
    }
}
