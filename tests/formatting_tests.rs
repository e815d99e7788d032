// Property tests for the source window and variable formatters

use handlebars::html_escape;
use proptest::prelude::*;
use tracepage::capture::{Frame, Value};
use tracepage::errors::ReprError;
use tracepage::render::{
    source_window, Inspect, LineMode, Shape, VariableFormatter, VariableRender,
};

fn lines_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ -~]{0,30}", 0..6)
}

/// Scalar and shallow container values with arbitrary text
fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        "\\PC{0,120}".prop_map(Value::Str),
    ];
    leaf.prop_recursive(3, 24, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::List),
            prop::collection::vec(("[a-z<>&'\"]{1,8}", inner), 0..6).prop_map(|fields| {
                Value::Map(fields.into_iter().map(|(k, v)| (Value::Str(k), v)).collect())
            }),
        ]
    })
}

/// Undo `html_escape` for the entities it produces
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#x60;", "`")
        .replace("&#x3D;", "=")
        .replace("&amp;", "&")
}

/// A list whose later elements cannot be represented
struct PartlyBroken;

struct Broken;

impl Inspect for Broken {
    fn repr(&self) -> Result<String, ReprError> {
        Err(ReprError::Host("broken".into()))
    }
}

impl Inspect for PartlyBroken {
    fn shape(&self) -> Shape<'_> {
        static FIRST: Value = Value::Int(1);
        Shape::Sequence(vec![
            &FIRST as &dyn Inspect,
            &Broken as &dyn Inspect,
            &Broken as &dyn Inspect,
        ])
    }

    fn repr(&self) -> Result<String, ReprError> {
        Ok("<partly broken>".into())
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Window length and numbering follow from the context sizes
    #[test]
    fn prop_window_numbering(
        start in 0usize..10_000,
        pre in lines_strategy(),
        cur in "[ -~]{0,30}",
        post in lines_strategy(),
    ) {
        let frame = Frame::new(Some(start), pre.clone(), cur.clone(), post.clone());
        let lines = source_window(&frame);

        prop_assert_eq!(lines.len(), pre.len() + 1 + post.len());
        for (i, line) in lines.iter().enumerate() {
            prop_assert_eq!(line.lineno, start + 1 + i);
        }
        prop_assert_eq!(lines.iter().filter(|l| l.mode == LineMode::Cur).count(), 1);
        prop_assert_eq!(lines[pre.len()].mode, LineMode::Cur);
        prop_assert_eq!(&lines[pre.len()].code, &cur);
    }

    /// Without a line number the context is ignored entirely
    #[test]
    fn prop_unavailable_source(pre in lines_strategy(), cur in "[ -~]{0,30}") {
        let lines = source_window(&Frame::new(None, pre, cur, vec![]));
        prop_assert_eq!(lines.len(), 1);
        prop_assert_eq!(lines[0].mode, LineMode::Cur);
        prop_assert_eq!(lines[0].lineno, 1);
        prop_assert_eq!(lines[0].code.as_str(), "Sourcecode not available");
    }

    /// Structured output never has a line wider than the limit plus the marker,
    /// and contains no raw markup characters
    #[test]
    fn prop_safe_pformat_is_clipped_and_escaped(value in value_strategy()) {
        let formatter = VariableFormatter::default();
        let text = formatter.safe_pformat(&value);

        prop_assert!(!text.contains('<'));
        prop_assert!(!text.contains('>'));
        prop_assert!(!text.contains('"'));

        for line in unescape(&text).lines() {
            prop_assert!(line.chars().count() <= 79 + 3, "line too long: {:?}", line);
        }
    }

    /// Escaping happens exactly once, after clipping
    #[test]
    fn prop_escape_after_clip(text in "[<>&'a]{80,200}") {
        let formatter = VariableFormatter::default();
        let rendered = formatter.safe_pformat(&Value::Str(text.clone()));

        let quoted: String = format!("'{}", text.replace('\'', "\\'")).chars().take(79).collect();
        prop_assert_eq!(rendered, html_escape(&format!("{}...", quoted)));
    }

    /// Sequences keep element order
    #[test]
    fn prop_sequence_order_preserved(items in prop::collection::vec(any::<i64>(), 1..20)) {
        let value = Value::List(items.iter().copied().map(Value::Int).collect());
        let expected: Vec<String> = items.iter().map(|n| n.to_string()).collect();
        prop_assert_eq!(
            VariableFormatter::default().format(&value),
            VariableRender::Sequence(expected)
        );
    }

    /// Mapping entries come out sorted regardless of capture order
    #[test]
    fn prop_mapping_sorted(keys in prop::collection::btree_set("[a-z]{1,6}", 1..10)) {
        let mut entries: Vec<(Value, Value)> = keys
            .iter()
            .map(|k| (Value::from(k.as_str()), Value::Null))
            .collect();
        entries.reverse();

        let rendered = VariableFormatter::default().format(&Value::Map(entries));
        let VariableRender::Mapping(rendered) = rendered else {
            return Err(TestCaseError::fail("expected mapping"));
        };
        let expected: Vec<String> = keys.iter().map(|k| html_escape(&format!("'{}'", k))).collect();
        let got: Vec<String> = rendered.into_iter().map(|e| e.key).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn test_broken_elements_degrade_individually() {
    let rendered = VariableFormatter::default().format(&PartlyBroken);
    assert_eq!(
        rendered,
        VariableRender::Sequence(vec!["1".into(), "?".into(), "?".into()])
    );
}

#[test]
fn test_broken_nested_value_degrades_whole_element() {
    struct Holder(Vec<Value>, Broken);

    impl Inspect for Holder {
        fn shape(&self) -> Shape<'_> {
            Shape::Mapping(vec![(&self.0[0] as &dyn Inspect, &self.1 as &dyn Inspect)])
        }

        fn repr(&self) -> Result<String, ReprError> {
            Ok("holder".into())
        }
    }

    let rendered = VariableFormatter::default().format(&Holder(vec![Value::from("k")], Broken));
    let VariableRender::Mapping(entries) = rendered else {
        panic!("expected mapping");
    };
    assert_eq!(entries[0].value, "?");
}
