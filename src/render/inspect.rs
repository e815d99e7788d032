//! Capability interface for values of unknown shape
//!
//! The formatters never look at concrete types. Instead a value describes
//! itself through [`Inspect`]: whether it holds key/value pairs, ordered
//! elements, or is a plain scalar, plus a single-line representation of its
//! scalar form.
//!
//! Implementations are provided for the crate's own
//! [`Value`](crate::capture::value::Value), for [`serde_json::Value`] (so JSON
//! page data can be formatted directly) and for strings.

use crate::errors::ReprError;
use std::cmp::Ordering;

/// Structural classification of a value
pub enum Shape<'a> {
    /// Key/value pairs, in whatever order the value stores them
    Mapping(Vec<(&'a dyn Inspect, &'a dyn Inspect)>),
    /// Ordered elements
    Sequence(Vec<&'a dyn Inspect>),
    Scalar,
}

impl Shape<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            Shape::Mapping(entries) => entries.is_empty(),
            Shape::Sequence(items) => items.is_empty(),
            Shape::Scalar => false,
        }
    }
}

/// A value that can be classified and represented for display
pub trait Inspect {
    /// How this value is laid out. Mapping-like values must report
    /// [`Shape::Mapping`] even if they could also be iterated as a sequence.
    fn shape(&self) -> Shape<'_> {
        Shape::Scalar
    }

    /// Canonical single-line representation. Only consulted for scalars;
    /// containers are rendered from their [`shape`](Inspect::shape).
    ///
    /// Container impls in this crate answer through
    /// [`pretty::repr`](crate::render::pretty::repr) with
    /// [`DEFAULT_MAX_DEPTH`](crate::render::DEFAULT_MAX_DEPTH). The formatters
    /// never call `repr` on a container, so a configured
    /// [`FormatOptions::max_depth`](crate::render::FormatOptions) only applies
    /// through them or through `pretty::repr` directly.
    fn repr(&self) -> Result<String, ReprError>;

    /// Ordering key used when this value appears as a mapping key
    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.repr().unwrap_or_default())
    }
}

/// Comparable form of a mapping key
///
/// Numbers sort before text. Numbers compare by value, text lexicographically.
/// Integers are kept exact; they only meet floating point when compared with
/// a [`SortKey::Number`].
#[derive(Debug, Clone)]
pub enum SortKey {
    Int(i64),
    Number(f64),
    Text(String),
}

/// Exact comparison of an integer with a float. NaN is placed the way
/// `f64::total_cmp` places it.
fn cmp_int_float(int: i64, float: f64) -> Ordering {
    if float.is_nan() {
        return 0f64.total_cmp(&float);
    }
    match (int as f64).partial_cmp(&float) {
        Some(Ordering::Equal) | None => {
            // `float` is integral here; 2^63 is the only such value past i64::MAX
            if float >= 9_223_372_036_854_775_808.0 {
                Ordering::Less
            } else {
                int.cmp(&(float as i64))
            }
        }
        Some(ordering) => ordering,
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Int(a), SortKey::Number(b)) => cmp_int_float(*a, *b),
            (SortKey::Number(a), SortKey::Int(b)) => cmp_int_float(*b, *a).reverse(),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Text(_), _) => Ordering::Greater,
            (_, SortKey::Text(_)) => Ordering::Less,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

/// Quote a string the way scalar representations display it: single quotes,
/// with backslash escapes for quotes, backslashes and control characters.
pub fn quote_str(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

impl Inspect for str {
    fn repr(&self) -> Result<String, ReprError> {
        Ok(quote_str(self))
    }

    fn sort_key(&self) -> SortKey {
        SortKey::Text(self.to_string())
    }
}

impl Inspect for String {
    fn repr(&self) -> Result<String, ReprError> {
        self.as_str().repr()
    }

    fn sort_key(&self) -> SortKey {
        self.as_str().sort_key()
    }
}

impl Inspect for serde_json::Value {
    fn shape(&self) -> Shape<'_> {
        match self {
            serde_json::Value::Object(map) => Shape::Mapping(
                map.iter()
                    .map(|(k, v)| (k as &dyn Inspect, v as &dyn Inspect))
                    .collect(),
            ),
            serde_json::Value::Array(items) => {
                Shape::Sequence(items.iter().map(|v| v as &dyn Inspect).collect())
            }
            _ => Shape::Scalar,
        }
    }

    fn repr(&self) -> Result<String, ReprError> {
        match self {
            serde_json::Value::Null => Ok("null".to_string()),
            serde_json::Value::Bool(b) => Ok(b.to_string()),
            serde_json::Value::Number(n) => Ok(n.to_string()),
            serde_json::Value::String(s) => Ok(quote_str(s)),
            _ => crate::render::pretty::repr(self, crate::render::DEFAULT_MAX_DEPTH),
        }
    }

    fn sort_key(&self) -> SortKey {
        match self {
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(int), _) => SortKey::Int(int),
                (None, Some(float)) => SortKey::Number(float),
                (None, None) => SortKey::Text(n.to_string()),
            },
            serde_json::Value::Bool(b) => SortKey::Int(i64::from(*b)),
            serde_json::Value::String(s) => SortKey::Text(s.clone()),
            other => SortKey::Text(other.repr().unwrap_or_default()),
        }
    }
}
