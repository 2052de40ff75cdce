//! SphinxQL statement builder for Fabryk.
//!
//! This crate turns structured search intent into a single SphinxQL
//! `SELECT` statement: projected fields, attribute filters, grouping,
//! ordering, limits, engine options, facets, and the full-text `MATCH()`
//! expression. All escaping happens here, so callers never assemble query
//! text by hand.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     fabryk-sphinxql                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  QueryBuilder (outer clauses + flat MATCH buffer)           │
//! │  BuilderConfig (TOML-loadable defaults)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │  MatchExpr (nested AND / OR / MAYBE expression tree)        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  terms: term groups  @(field)[limit] (a | b)                │
//! │  escape: escape / quote / trim_invalid                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate only guarantees syntactic validity. It does not execute
//! statements, check field names against an index schema, or bound the
//! size of its input.
//!
//! # Example
//!
//! ```rust
//! use fabryk_sphinxql::{Combinator, MatchExpr, QueryBuilder, QueryOptions};
//!
//! let mut expr = MatchExpr::with_combinator(Combinator::Or);
//! let root = expr.root();
//! expr.add_terms(root, "title", 0, QueryOptions::new().escape(), ["harmony", "counterpoint"])
//!     .add_terms(root, "tags", 0, QueryOptions::new().no_spaces(), ["voice leading"]);
//!
//! let sql = QueryBuilder::new("concepts")
//!     .match_expr(&expr)
//!     .filter_in("category", [3, 4], false)
//!     .option("ranker", "sph04")
//!     .limits(0, 10)
//!     .build();
//!
//! assert_eq!(
//!     sql,
//!     "SELECT *, weight() AS w FROM concepts \
//!      WHERE MATCH('( @(title) (harmony | counterpoint) | @(tags) (voice_leading) )') \
//!      AND category IN(3,4) ORDER BY w DESC, id ASC LIMIT 0,10 OPTION ranker=sph04"
//! );
//! ```
//!
//! # Logging
//!
//! Rendered statements are logged through the `log` facade at `debug`
//! level. Without an installed logger this costs nothing.

pub mod config;
pub mod error;
pub mod escape;
pub mod expr;
pub mod query;
pub mod terms;
pub mod types;

mod proptests;

// Re-exports
pub use config::{BuilderConfig, DEFAULT_SORT};
pub use error::{Error, Result};
pub use escape::{escape, quote, trim_invalid};
pub use expr::{MatchExpr, NodeId};
pub use query::{QueryBuilder, RELEVANCE_COLUMN};
pub use terms::term_group;
pub use types::{Combinator, Field, Numeric, QueryOptions};
