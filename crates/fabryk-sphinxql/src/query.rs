//! SphinxQL statement building.
//!
//! Provides [`QueryBuilder`], which collects projection, filters, ordering,
//! limits, engine options, facets and a full-text match expression, and
//! renders them as one `SELECT` statement.

use std::fmt::{self, Write as _};

use crate::config::BuilderConfig;
use crate::error::{Error, Result};
use crate::escape::quote;
use crate::expr::MatchExpr;
use crate::terms::{prepare_append, term_group};
use crate::types::{Field, Numeric, QueryOptions};

/// Relevance column projected by every statement.
pub const RELEVANCE_COLUMN: &str = "weight() AS w";

/// Builder for a single SphinxQL `SELECT` statement.
///
/// Every mutator consumes and returns the builder so calls chain. Clauses
/// render in a fixed order: `SELECT`, `FROM`, `WHERE`, `GROUP BY`,
/// `WITHIN GROUP ORDER BY`, `ORDER BY`, `LIMIT`, `OPTION`, `FACET`.
///
/// # Example
///
/// ```
/// use fabryk_sphinxql::{QueryBuilder, QueryOptions};
///
/// let sql = QueryBuilder::new("articles")
///     .match_terms("title", QueryOptions::new().escape(), ["rust", "tokio!"])
///     .filter("published", 1, false)
///     .limits(0, 20)
///     .build();
///
/// assert_eq!(
///     sql,
///     "SELECT *, weight() AS w FROM articles \
///      WHERE MATCH('@(title) (rust | tokio)') AND published=1 \
///      ORDER BY w DESC, id ASC LIMIT 0,20"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct QueryBuilder {
    index: String,
    fields: Vec<String>,
    select_all_fields: bool,
    sort: Option<String>,
    group_by: Option<String>,
    within_group_order_by: Option<String>,
    wheres: Vec<String>,
    options: Vec<(String, String)>,
    limit_from: u32,
    limit_to: u32,
    facets: Vec<String>,
    query: String,
}

impl QueryBuilder {
    /// Create a builder for `index` with default settings.
    pub fn new(index: impl Into<String>) -> Self {
        Self::with_config(index, &BuilderConfig::default())
    }

    /// Create a builder for `index` seeded from `config`.
    pub fn with_config(index: impl Into<String>, config: &BuilderConfig) -> Self {
        let mut builder = Self {
            index: index.into(),
            fields: Vec::new(),
            select_all_fields: config.select_all_fields,
            sort: config.sort.clone(),
            group_by: None,
            within_group_order_by: None,
            wheres: Vec::new(),
            options: Vec::new(),
            limit_from: config.limit_from,
            limit_to: config.limit_to,
            facets: Vec::new(),
            query: String::new(),
        };

        for (key, value) in config.rendered_options() {
            builder.set_option(key, value);
        }

        builder
    }

    /// Target index.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// Full-text expression accumulated so far (unquoted).
    pub fn match_query(&self) -> &str {
        &self.query
    }

    // ------------------------------------------------------------------------
    // Projection, grouping, ordering
    // ------------------------------------------------------------------------

    /// Project an extra expression after the relevance column.
    pub fn field(mut self, expr: impl Into<String>) -> Self {
        self.fields.push(expr.into());
        self
    }

    /// Toggle projecting `*`.
    pub fn select_all_fields(mut self, select: bool) -> Self {
        self.select_all_fields = select;
        self
    }

    /// Set the `ORDER BY` expression.
    pub fn sort_mode(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    /// Drop the `ORDER BY` clause, including the default one.
    pub fn without_sort(mut self) -> Self {
        self.sort = None;
        self
    }

    /// Set the `GROUP BY` expression.
    pub fn group_by(mut self, by: impl Into<String>) -> Self {
        self.group_by = Some(by.into());
        self
    }

    /// Set the `WITHIN GROUP ORDER BY` expression.
    pub fn within_group_order_by(mut self, by: impl Into<String>) -> Self {
        self.within_group_order_by = Some(by.into());
        self
    }

    /// Set the `LIMIT from,to` window.
    pub fn limits(mut self, from: u32, to: u32) -> Self {
        self.limit_from = from;
        self.limit_to = to;
        self
    }

    /// Set an engine option. Setting an existing option replaces its value
    /// in place.
    pub fn option(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.set_option(key, value.to_string());
        self
    }

    fn set_option(&mut self, key: impl Into<String>, value: String) {
        let key = key.into();
        match self.options.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.options.push((key, value)),
        }
    }

    /// Add a raw `FACET` expression.
    pub fn facet(mut self, facet: impl Into<String>) -> Self {
        self.facets.push(facet.into());
        self
    }

    /// Add a `FACET` on `field`, followed by `params` when given.
    pub fn facet_with(self, field: &str, params: Option<&str>) -> Self {
        match params {
            Some(params) => self.facet(format!("{field} {params}")),
            None => self.facet(field),
        }
    }

    // ------------------------------------------------------------------------
    // Attribute filters
    // ------------------------------------------------------------------------

    /// Add a raw `WHERE` condition. Conditions are joined with `AND`.
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.wheres.push(clause.into());
        self
    }

    /// Filter on `field=value`, or `field!=value` when `exclude` is set.
    pub fn filter<V: Numeric>(self, field: &str, value: V, exclude: bool) -> Self {
        let op = if exclude { "!=" } else { "=" };
        self.where_clause(format!("{field}{op}{value}"))
    }

    /// Filter on `field IN(...)`, or `field NOT IN(...)` when `exclude` is set.
    ///
    /// An empty value list adds nothing.
    pub fn filter_in<I>(self, field: &str, values: I, exclude: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Numeric,
    {
        let values: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
        if values.is_empty() {
            log::trace!("empty IN filter on `{field}`, skipped");
            return self;
        }

        let not = if exclude { "NOT " } else { "" };
        self.where_clause(format!("{field} {not}IN({})", values.join(",")))
    }

    /// Filter on the inclusive range `field BETWEEN from AND to`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unsupported`] when `exclude` is set: SphinxQL has
    /// no `NOT BETWEEN`.
    pub fn filter_range<V: Numeric>(
        self,
        field: &str,
        from: V,
        to: V,
        exclude: bool,
    ) -> Result<Self> {
        if exclude {
            return Err(Error::unsupported(
                "filter_range",
                format!("NOT BETWEEN on `{field}` is not supported by SphinxQL"),
            ));
        }

        Ok(self.where_clause(format!("({field} BETWEEN {from} AND {to})")))
    }

    // ------------------------------------------------------------------------
    // Full-text expression
    // ------------------------------------------------------------------------

    /// Append a raw full-text fragment, implicitly AND-ed with what came
    /// before.
    pub fn match_text(self, text: &str) -> Self {
        self.match_text_with(text, QueryOptions::new())
    }

    /// Append a raw full-text fragment using `options` to join it.
    ///
    /// Empty text adds nothing.
    pub fn match_text_with(mut self, text: &str, options: QueryOptions) -> Self {
        if text.is_empty() {
            return self;
        }

        prepare_append(&mut self.query, options);
        self.query.push_str(text);
        self
    }

    /// Append a term group over `field`.
    pub fn match_terms<'f, F, I>(self, field: F, options: QueryOptions, values: I) -> Self
    where
        F: Into<Field<'f>>,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.match_terms_limited(field, 0, options, values)
    }

    /// Append a term group over `field` with a per-field match limit.
    ///
    /// Nothing is appended, not even a separator, when no value survives
    /// sanitization.
    pub fn match_terms_limited<'f, F, I>(
        mut self,
        field: F,
        limit: u32,
        options: QueryOptions,
        values: I,
    ) -> Self
    where
        F: Into<Field<'f>>,
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        let Some(group) = term_group(field, limit, options.without_maybe(), values) else {
            log::trace!("term group has no usable values, skipped");
            return self;
        };

        prepare_append(&mut self.query, options);
        self.query.push_str(&group);
        self
    }

    /// Append a nested expression, implicitly AND-ed with what came before.
    ///
    /// Empty expressions add nothing.
    pub fn match_expr(mut self, expr: &MatchExpr) -> Self {
        if expr.is_empty() {
            return self;
        }

        prepare_append(&mut self.query, QueryOptions::new());
        expr.render_into(&mut self.query);
        self
    }

    // ------------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------------

    /// Render the statement.
    pub fn build(&self) -> String {
        let mut q = String::with_capacity(64 + self.query.len());

        q.push_str("SELECT ");
        if self.select_all_fields {
            q.push_str("*, ");
        }
        q.push_str(RELEVANCE_COLUMN);
        for field in &self.fields {
            q.push_str(", ");
            q.push_str(field);
        }

        q.push_str(" FROM ");
        q.push_str(&self.index);

        let has_match = !self.query.is_empty();
        if has_match || !self.wheres.is_empty() {
            q.push_str(" WHERE ");

            if has_match {
                q.push_str("MATCH(");
                q.push_str(&quote(self.query.as_str()));
                q.push(')');
            }

            if !self.wheres.is_empty() {
                if has_match {
                    q.push_str(" AND ");
                }
                q.push_str(&self.wheres.join(" AND "));
            }
        }

        if let Some(group_by) = &self.group_by {
            q.push_str(" GROUP BY ");
            q.push_str(group_by);
        }

        if let Some(order) = &self.within_group_order_by {
            q.push_str(" WITHIN GROUP ORDER BY ");
            q.push_str(order);
        }

        if let Some(sort) = &self.sort {
            q.push_str(" ORDER BY ");
            q.push_str(sort);
        }

        // Writing into a String cannot fail.
        let _ = write!(q, " LIMIT {},{}", self.limit_from, self.limit_to);

        if !self.options.is_empty() {
            q.push_str(" OPTION ");
            let rendered: Vec<String> = self
                .options
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            q.push_str(&rendered.join(", "));
        }

        for facet in &self.facets {
            q.push_str(" FACET ");
            q.push_str(facet);
        }

        log::debug!("{q}");

        q
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

// ============================================================================
// Tests
// ============================================================================
