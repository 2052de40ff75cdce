//! Character-level escaping for SphinxQL text.
//!
//! Three independent transforms, each a single pass over the input:
//!
//! - [`escape`]: backslash-escapes full-text operator characters so a raw
//!   value is matched literally. Boolean keywords are left alone.
//! - [`quote`]: renders text as a single-quoted SphinxQL string literal.
//! - [`trim_invalid`]: drops every character that has no business inside an
//!   unquoted search term.
//!
//! All three accept either `&str` or `Option<&str>`; `None` behaves like
//! the empty string.

/// End-of-stream control byte (SUB, 0x1A).
pub const EOF_BYTE: char = '\x1a';

/// Full-text operator characters escaped by [`escape`].
pub const SYNTAX_CHARS: &[char] = &[
    '(', ')', '|', '-', '!', '@', '~', '"', '&', '/', '^', '$', '=',
];

/// Characters backslash-escaped by [`quote`].
pub const QUOTE_CHARS: &[char] = &['\\', '\'', '\0', '\n', '\r'];

/// Characters removed by [`trim_invalid`].
pub const INVALID_CHARS: &[char] = &[
    '!', '"', '#', '$', '%', '&', '\'', '(', ')', '*', '+', ',', '-', '.', '/', ':', ';', '<',
    '=', '>', '?', '@', '[', '\\', ']', '^', '_', '`', '{', '|', '}', '~', '\n', '\r', EOF_BYTE,
];

/// Backslash-escape full-text operator characters.
///
/// # Example
///
/// ```
/// use fabryk_sphinxql::escape::escape;
///
/// assert_eq!(escape("mary-jane"), "mary\\-jane");
/// assert_eq!(escape(None::<&str>), "");
/// ```
pub fn escape<'a>(what: impl Into<Option<&'a str>>) -> String {
    let Some(what) = what.into() else {
        return String::new();
    };

    let mut out = String::with_capacity(what.len() + 4);
    for c in what.chars() {
        if SYNTAX_CHARS.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Render text as a single-quoted string literal.
///
/// Backslash, single quote, NUL, newline and carriage return are prefixed
/// with a backslash. The end-of-stream byte becomes the two characters `\Z`.
///
/// # Example
///
/// ```
/// use fabryk_sphinxql::escape::quote;
///
/// assert_eq!(quote("it's"), "'it\\'s'");
/// assert_eq!(quote(None::<&str>), "''");
/// ```
pub fn quote<'a>(what: impl Into<Option<&'a str>>) -> String {
    let what = what.into().unwrap_or_default();

    let mut out = String::with_capacity(what.len() + 2);
    out.push('\'');
    for c in what.chars() {
        if QUOTE_CHARS.contains(&c) {
            out.push('\\');
            out.push(c);
        } else if c == EOF_BYTE {
            out.push_str("\\Z");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    out
}

/// Remove every character in [`INVALID_CHARS`].
///
/// # Example
///
/// ```
/// use fabryk_sphinxql::escape::trim_invalid;
///
/// assert_eq!(trim_invalid("c++ (lang)"), "c lang");
/// ```
pub fn trim_invalid<'a>(what: impl Into<Option<&'a str>>) -> String {
    what.into()
        .unwrap_or_default()
        .chars()
        .filter(|c| !INVALID_CHARS.contains(c))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
