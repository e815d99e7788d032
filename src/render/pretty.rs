//! Single-line and structured text representations of [`Inspect`] values
//!
//! [`repr`] produces the canonical one-line form used for scalars and mapping
//! keys. [`pformat`] produces a structured, possibly multi-line form: anything
//! whose one-line form fits in the remaining width stays on one line, larger
//! containers are broken one entry per line with continuation lines aligned
//! past the opening bracket:
//!
//! ```text
//! {'alpha': [1, 2, 3],
//!  'beta': {'nested': 'value',
//!           'other': 'value'}}
//! ```
//!
//! Mapping entries are always sorted by [`Inspect::sort_key`] so output does
//! not depend on the iteration order of the underlying map.

use super::inspect::{Inspect, Shape};
use crate::errors::ReprError;

type Entry<'a> = (&'a dyn Inspect, &'a dyn Inspect);

/// Sort mapping entries by key, keeping the original order of equal keys
pub(crate) fn sorted_entries(mut entries: Vec<Entry<'_>>) -> Vec<Entry<'_>> {
    entries.sort_by_cached_key(|(key, _)| key.sort_key());
    entries
}

/// Canonical single-line representation of `value`
pub fn repr(value: &dyn Inspect, max_depth: usize) -> Result<String, ReprError> {
    let mut out = String::new();
    write_repr(value, 0, max_depth, &mut out)?;
    Ok(out)
}

fn write_repr(
    value: &dyn Inspect,
    depth: usize,
    max_depth: usize,
    out: &mut String,
) -> Result<(), ReprError> {
    if depth > max_depth {
        return Err(ReprError::TooDeep(max_depth));
    }

    match value.shape() {
        Shape::Mapping(entries) => {
            out.push('{');
            for (i, (key, val)) in sorted_entries(entries).into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(key, depth + 1, max_depth, out)?;
                out.push_str(": ");
                write_repr(val, depth + 1, max_depth, out)?;
            }
            out.push('}');
        }
        Shape::Sequence(items) => {
            out.push('[');
            for (i, item) in items.into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(item, depth + 1, max_depth, out)?;
            }
            out.push(']');
        }
        Shape::Scalar => out.push_str(&value.repr()?),
    }
    Ok(())
}

/// Structured representation of `value`, wrapped to `width` columns where the
/// structure allows it
pub fn pformat(value: &dyn Inspect, width: usize, max_depth: usize) -> Result<String, ReprError> {
    let printer = PrettyPrinter { width, max_depth };
    let mut out = String::new();
    printer.format(value, 0, 0, 0, &mut out)?;
    Ok(out)
}

struct PrettyPrinter {
    width: usize,
    max_depth: usize,
}

impl PrettyPrinter {
    fn repr_at(&self, value: &dyn Inspect, depth: usize) -> Result<String, ReprError> {
        let mut out = String::new();
        write_repr(value, depth, self.max_depth, &mut out)?;
        Ok(out)
    }

    /// `indent` is the column the value starts at, `allowance` the number of
    /// closing characters that will follow it on the same line.
    fn format(
        &self,
        value: &dyn Inspect,
        indent: usize,
        allowance: usize,
        depth: usize,
        out: &mut String,
    ) -> Result<(), ReprError> {
        let rep = self.repr_at(value, depth)?;
        if rep.chars().count() + indent + allowance <= self.width {
            out.push_str(&rep);
            return Ok(());
        }

        match value.shape() {
            Shape::Mapping(entries) if !entries.is_empty() => {
                let entries = sorted_entries(entries);
                let last = entries.len() - 1;
                out.push('{');
                for (i, (key, val)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                        push_indent(out, indent + 1);
                    }
                    let key_rep = self.repr_at(key, depth + 1)?;
                    out.push_str(&key_rep);
                    out.push_str(": ");
                    let child_allowance = if i == last { allowance + 1 } else { 1 };
                    self.format(
                        val,
                        indent + 1 + key_rep.chars().count() + 2,
                        child_allowance,
                        depth + 1,
                        out,
                    )?;
                }
                out.push('}');
            }
            Shape::Sequence(items) if !items.is_empty() => {
                let last = items.len() - 1;
                out.push('[');
                for (i, item) in items.into_iter().enumerate() {
                    if i > 0 {
                        out.push_str(",\n");
                        push_indent(out, indent + 1);
                    }
                    let child_allowance = if i == last { allowance + 1 } else { 1 };
                    self.format(item, indent + 1, child_allowance, depth + 1, out)?;
                }
                out.push(']');
            }
            _ => out.push_str(&rep),
        }
        Ok(())
    }
}

fn push_indent(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}
