//! Common types shared by the flat builder and the expression tree.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How sibling full-text expressions are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    /// Implicit AND: siblings are separated by a space.
    #[default]
    And,
    /// Any sibling may match: `a | b`.
    Or,
    /// Soft match: `a MAYBE b`.
    Maybe,
}

impl Combinator {
    /// Separator placed between rendered siblings.
    pub fn separator(self) -> &'static str {
        match self {
            Combinator::And => " ",
            Combinator::Or => " | ",
            Combinator::Maybe => " MAYBE ",
        }
    }
}

/// Rendering options for full-text fragments and term groups.
///
/// Every flag defaults to `false`. Flags are set with the chainable
/// constructors:
///
/// ```
/// use fabryk_sphinxql::QueryOptions;
///
/// let opts = QueryOptions::new().escape().or();
/// assert!(opts.escape && opts.or && !opts.maybe);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    /// Replace spaces inside a value with underscores.
    pub no_spaces: bool,
    /// Drop characters that are unsafe inside an unquoted term.
    pub escape: bool,
    /// Prefix the fragment with `MAYBE`.
    pub maybe: bool,
    /// Negate the field selector: `@!(field)`.
    pub ignore: bool,
    /// Join with what came before using AND.
    ///
    /// AND is the implicit join, so this flag only states intent: options
    /// with and without it render identically. It lets a caller spell out
    /// every join, and `QueryOptions::from(Combinator::And)` sets it.
    pub and: bool,
    /// Join with what came before using OR.
    pub or: bool,
}

impl QueryOptions {
    /// All flags off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `no_spaces`.
    pub fn no_spaces(mut self) -> Self {
        self.no_spaces = true;
        self
    }

    /// Set `escape`.
    pub fn escape(mut self) -> Self {
        self.escape = true;
        self
    }

    /// Set `maybe`.
    pub fn maybe(mut self) -> Self {
        self.maybe = true;
        self
    }

    /// Set `ignore`.
    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }

    /// Set `and`. Has no effect on rendering; see the `and` field.
    pub fn and(mut self) -> Self {
        self.and = true;
        self
    }

    /// Set `or`.
    pub fn or(mut self) -> Self {
        self.or = true;
        self
    }

    /// Copy of these options with `maybe` cleared.
    pub fn without_maybe(mut self) -> Self {
        self.maybe = false;
        self
    }

    /// Combinator implied by the join flags. OR wins over MAYBE, MAYBE over AND.
    ///
    /// With neither `or` nor `maybe` set the result is AND, whether or not
    /// `and` is set.
    pub fn combinator(self) -> Combinator {
        if self.or {
            Combinator::Or
        } else if self.maybe {
            Combinator::Maybe
        } else {
            Combinator::And
        }
    }
}

impl From<Combinator> for QueryOptions {
    fn from(combinator: Combinator) -> Self {
        match combinator {
            Combinator::And => QueryOptions::new().and(),
            Combinator::Or => QueryOptions::new().or(),
            Combinator::Maybe => QueryOptions::new().maybe(),
        }
    }
}

/// Field selector for a term group.
///
/// `"*"` converts to [`Field::All`]; any other string names a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Every full-text field: `@*`.
    All,
    /// A single named field: `@(name)`.
    Named(&'a str),
}

impl<'a> From<&'a str> for Field<'a> {
    fn from(name: &'a str) -> Self {
        if name == "*" {
            Field::All
        } else {
            Field::Named(name)
        }
    }
}

impl<'a> From<&'a String> for Field<'a> {
    fn from(name: &'a String) -> Self {
        Field::from(name.as_str())
    }
}

impl fmt::Display for Field<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::All => f.write_str("*"),
            Field::Named(name) => write!(f, "({name})"),
        }
    }
}

/// Numeric value accepted by attribute filters.
///
/// Values render through `Display`, which is locale independent.
pub trait Numeric: fmt::Display + Copy {}

macro_rules! impl_numeric {
    ($($t:ty),* $(,)?) => {
        $(impl Numeric for $t {})*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

// ============================================================================
// Tests
// ============================================================================
