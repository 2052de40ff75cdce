//! Term-group assembly.
//!
//! A term group scopes a list of alternative terms to one field (or all
//! fields): `@(title)[10] (rust | go)`. Both the flat full-text buffer of
//! [`QueryBuilder`](crate::QueryBuilder) and the leaves of
//! [`MatchExpr`](crate::MatchExpr) are built from these fragments.

use std::fmt::{self, Write as _};

use crate::escape::trim_invalid;
use crate::types::{Field, QueryOptions};

/// Convert one raw value into a search term.
///
/// The value is stringified and trimmed. With `no_spaces`, inner spaces
/// become underscores; with `escape`, unsafe characters are dropped and the
/// remainder is trimmed again. The result may be empty.
pub fn process_value<T>(value: &T, options: QueryOptions) -> String
where
    T: fmt::Display + ?Sized,
{
    let mut term = value.to_string().trim().to_string();

    if options.no_spaces {
        term = term.replace(' ', "_");
    }

    if options.escape {
        term = trim_invalid(term.as_str()).trim().to_string();
    }

    term
}

/// Build a term group from a field selector and a list of values.
///
/// Returns `None` when no value survives [`process_value`]; callers must
/// then leave their output untouched.
///
/// # Example
///
/// ```
/// use fabryk_sphinxql::terms::term_group;
/// use fabryk_sphinxql::QueryOptions;
///
/// let group = term_group("title", 0, QueryOptions::new(), ["rust", "go"]);
/// assert_eq!(group.as_deref(), Some("@(title) (rust | go)"));
///
/// let none = term_group("*", 0, QueryOptions::new().escape(), ["!!", " "]);
/// assert!(none.is_none());
/// ```
pub fn term_group<'f, F, I>(
    field: F,
    limit: u32,
    options: QueryOptions,
    values: I,
) -> Option<String>
where
    F: Into<Field<'f>>,
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let terms: Vec<String> = values
        .into_iter()
        .map(|v| process_value(&v, options))
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return None;
    }

    let mut group = String::with_capacity(16 + terms.iter().map(|t| t.len() + 3).sum::<usize>());

    if options.maybe {
        group.push_str("MAYBE ");
    }

    group.push('@');
    if options.ignore {
        group.push('!');
    }

    // Writing into a String cannot fail.
    let _ = write!(group, "{}", field.into());
    if limit != 0 {
        let _ = write!(group, "[{limit}]");
    }

    group.push_str(" (");
    group.push_str(&terms.join(" | "));
    group.push(')');

    Some(group)
}

/// Prepare a full-text buffer for the next top-level fragment.
///
/// An empty buffer only receives the optional `MAYBE ` prefix. A non-empty
/// buffer gets a space (implicit AND), then `| ` for OR, then `MAYBE `.
pub fn prepare_append(buf: &mut String, options: QueryOptions) {
    if !buf.is_empty() {
        buf.push(' ');

        if options.or {
            buf.push_str("| ");
        }
    }

    if options.maybe {
        buf.push_str("MAYBE ");
    }
}

// ============================================================================
// Tests
// ============================================================================
