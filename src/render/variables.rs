//! Variable formatting with type-based dispatch
//!
//! A variable is classified by its [`Shape`], in this order:
//!
//! 1. mapping: entries sorted by key, each key and value rendered safely
//! 2. sequence: elements rendered safely, order preserved
//! 3. anything else: its escaped one-line representation
//!
//! Empty mappings and empty sequences both become [`VariableRender::Empty`].
//!
//! # Safety of the output
//!
//! Every string in a [`VariableRender`] is already HTML-escaped and may be
//! emitted raw by a template. Structured values are clipped line by line to
//! [`FormatOptions::max_line_width`] characters *before* escaping, so a cut can
//! never land inside an entity. A value that fails to format is shown as `?`
//! and does not affect its siblings.

use super::inspect::{Inspect, Shape};
use super::options::FormatOptions;
use super::pretty;
use handlebars::html_escape;
use serde::Serialize;
use std::borrow::Cow;

/// Shown in place of a value that could not be formatted
pub const UNFORMATTABLE: &str = "?";

/// Marker appended to clipped lines
const ELLIPSIS: &str = "...";

/// A formatted mapping entry; both fields are escaped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MappingEntry {
    pub key: String,
    pub value: String,
}

/// Escaped rendering of one variable, tagged by kind for the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum VariableRender {
    Empty,
    Mapping(Vec<MappingEntry>),
    Sequence(Vec<String>),
    Scalar(String),
}

/// Formats [`Inspect`] values into [`VariableRender`]s
#[derive(Debug, Clone, Copy, Default)]
pub struct VariableFormatter {
    options: FormatOptions,
}

impl VariableFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Classify and render a variable. Never fails.
    pub fn format(&self, value: &dyn Inspect) -> VariableRender {
        match value.shape() {
            Shape::Mapping(entries) if entries.is_empty() => VariableRender::Empty,
            Shape::Mapping(entries) => VariableRender::Mapping(
                pretty::sorted_entries(entries)
                    .into_iter()
                    .map(|(key, val)| MappingEntry {
                        key: self.safe_key(key),
                        value: self.safe_pformat(val),
                    })
                    .collect(),
            ),
            Shape::Sequence(items) if items.is_empty() => VariableRender::Empty,
            Shape::Sequence(items) => VariableRender::Sequence(
                items
                    .into_iter()
                    .map(|item| self.safe_pformat(item))
                    .collect(),
            ),
            // Scalars are escaped but intentionally not clipped
            Shape::Scalar => match pretty::repr(value, self.options.max_depth) {
                Ok(text) => VariableRender::Scalar(html_escape(&text)),
                Err(err) => {
                    tracing::trace!(%err, "scalar degraded to placeholder");
                    VariableRender::Scalar(UNFORMATTABLE.to_string())
                }
            },
        }
    }

    /// Pretty-print a value, clip long lines and escape the result once.
    /// Any formatting failure yields [`UNFORMATTABLE`].
    pub fn safe_pformat(&self, value: &dyn Inspect) -> String {
        match pretty::pformat(value, self.options.pretty_width, self.options.max_depth) {
            Ok(text) => self.clip_and_escape(&text),
            Err(err) => {
                tracing::trace!(%err, "value degraded to placeholder");
                UNFORMATTABLE.to_string()
            }
        }
    }

    fn safe_key(&self, key: &dyn Inspect) -> String {
        match pretty::repr(key, self.options.max_depth) {
            Ok(text) => self.clip_and_escape(&text),
            Err(err) => {
                tracing::trace!(%err, "mapping key degraded to placeholder");
                UNFORMATTABLE.to_string()
            }
        }
    }

    fn clip_and_escape(&self, text: &str) -> String {
        let lines: Vec<Cow<'_, str>> = text
            .lines()
            .map(|line| clip_line(line, self.options.max_line_width))
            .collect();
        html_escape(&lines.join("\n"))
    }
}

/// Cut `line` to its first `width` characters plus [`ELLIPSIS`] if it is longer
pub(crate) fn clip_line(line: &str, width: usize) -> Cow<'_, str> {
    match line.char_indices().nth(width) {
        Some((cut, _)) => Cow::Owned(format!("{}{}", &line[..cut], ELLIPSIS)),
        None => Cow::Borrowed(line),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::value::Value;
    use crate::errors::ReprError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    /// A host value whose representation always fails
    struct Broken;

    impl Inspect for Broken {
        fn repr(&self) -> Result<String, ReprError> {
            Err(ReprError::Host("repr raised".into()))
        }
    }

    /// A host value that is iterable but also exposes items
    struct ItemsAndElements(Vec<(String, Value)>, Vec<Value>);

    impl Inspect for ItemsAndElements {
        fn shape(&self) -> Shape<'_> {
            Shape::Mapping(
                self.0
                    .iter()
                    .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
                    .collect(),
            )
        }

        fn repr(&self) -> Result<String, ReprError> {
            Ok(format!("<{} items, {} elements>", self.0.len(), self.1.len()))
        }
    }

    fn entry(key: &str, value: &str) -> MappingEntry {
        MappingEntry {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn test_mapping_sorted_by_key() {
        let formatter = VariableFormatter::default();
        let rendered = formatter.format(&json!({"z": 1, "a": 2}));
        assert_eq!(
            rendered,
            VariableRender::Mapping(vec![
                entry(&html_escape("'a'"), "2"),
                entry(&html_escape("'z'"), "1"),
            ])
        );
    }

    #[test]
    fn test_sequence_keeps_order() {
        let formatter = VariableFormatter::default();
        let rendered = formatter.format(&Value::List(vec![
            Value::Int(3),
            Value::Int(1),
            Value::Int(2),
        ]));
        assert_eq!(
            rendered,
            VariableRender::Sequence(vec!["3".into(), "1".into(), "2".into()])
        );
    }

    #[test]
    fn test_empty_containers() {
        let formatter = VariableFormatter::default();
        assert_eq!(formatter.format(&json!({})), VariableRender::Empty);
        assert_eq!(formatter.format(&json!([])), VariableRender::Empty);
        assert_eq!(formatter.format(&Value::Map(vec![])), VariableRender::Empty);
        assert_eq!(formatter.format(&Value::List(vec![])), VariableRender::Empty);
    }

    #[test]
    fn test_scalar_escaped_but_not_clipped() {
        let formatter = VariableFormatter::default();
        let text = format!("<script>{}</script>", "x".repeat(200));
        let rendered = formatter.format(&Value::Str(text.clone()));
        let expected = html_escape(&format!("'{}'", text));
        assert_eq!(rendered, VariableRender::Scalar(expected.clone()));
        assert!(!expected.contains('<'));
    }

    #[test]
    fn test_long_line_clipped_before_escaping() {
        let formatter = VariableFormatter::default();
        let value = Value::Str("&".repeat(100));
        let expected = html_escape(&format!("'{}...", "&".repeat(78)));
        assert_eq!(formatter.safe_pformat(&value), expected);
        // 78 whole entities, none cut in half
        assert_eq!(expected.matches("&amp;").count(), 78);
        assert!(expected.ends_with("&amp;..."));
    }

    #[test]
    fn test_each_line_clipped_independently() {
        let formatter = VariableFormatter::default();
        let value = Value::List(vec![
            Value::Str("a".repeat(90)),
            Value::Str("short".into()),
        ]);
        let rendered = formatter.safe_pformat(&value);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], format!("[&#x27;{}...", "a".repeat(77)));
        assert_eq!(lines[1], " &#x27;short&#x27;]");
    }

    #[test]
    fn test_failure_degrades_to_placeholder() {
        let formatter = VariableFormatter::default();
        assert_eq!(formatter.safe_pformat(&Broken), UNFORMATTABLE);
        assert_eq!(
            formatter.format(&Broken),
            VariableRender::Scalar(UNFORMATTABLE.to_string())
        );
    }

    #[test]
    fn test_failure_does_not_affect_siblings() {
        struct Pair(Value, Broken);
        impl Inspect for Pair {
            fn shape(&self) -> Shape<'_> {
                Shape::Sequence(vec![&self.0 as &dyn Inspect, &self.1 as &dyn Inspect])
            }
            fn repr(&self) -> Result<String, ReprError> {
                Ok("pair".into())
            }
        }

        let formatter = VariableFormatter::default();
        assert_eq!(
            formatter.format(&Pair(Value::Int(7), Broken)),
            VariableRender::Sequence(vec!["7".into(), UNFORMATTABLE.into()])
        );
    }

    #[test]
    fn test_mapping_takes_precedence_over_sequence() {
        let formatter = VariableFormatter::default();
        let value = ItemsAndElements(
            vec![("k".into(), Value::Bool(true))],
            vec![Value::Int(1), Value::Int(2)],
        );
        assert_eq!(
            formatter.format(&value),
            VariableRender::Mapping(vec![entry(&html_escape("'k'"), "true")])
        );
    }

    #[test]
    fn test_too_deep_value_is_placeholder() {
        let formatter = VariableFormatter::new(FormatOptions {
            max_depth: 1,
            ..FormatOptions::default()
        });
        let value = json!([[[1]]]);
        assert_eq!(
            formatter.format(&value),
            VariableRender::Sequence(vec![UNFORMATTABLE.into()])
        );
    }

    #[test]
    fn test_render_serializes_with_kind_tag() {
        let json = serde_json::to_value(VariableRender::Sequence(vec!["1".into()])).unwrap();
        assert_eq!(json, json!({"kind": "sequence", "payload": ["1"]}));
        let json = serde_json::to_value(VariableRender::Empty).unwrap();
        assert_eq!(json, json!({"kind": "empty"}));
    }

    #[test]
    fn test_clip_line_counts_characters() {
        assert_eq!(clip_line("ééééé", 3), "ééé...");
        assert_eq!(clip_line("abc", 3), "abc");
    }
}
