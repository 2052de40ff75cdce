//! Builder configuration.
//!
//! [`BuilderConfig`] holds the defaults every new
//! [`QueryBuilder`](crate::QueryBuilder) starts from. It deserializes from
//! TOML, so an application can keep its SphinxQL defaults next to the rest
//! of its settings:
//!
//! ```toml
//! select_all_fields = true
//! sort = "w DESC, id ASC"
//! limit_to = 20
//!
//! [options]
//! max_matches = 1000
//! ranker = "sph04"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Relevance-then-id ordering applied when nothing else is configured.
pub const DEFAULT_SORT: &str = "w DESC, id ASC";

/// Defaults applied to new query builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Project `*` in addition to the relevance column.
    #[serde(default = "default_true")]
    pub select_all_fields: bool,

    /// `ORDER BY` expression; `None` omits the clause.
    #[serde(default = "default_sort")]
    pub sort: Option<String>,

    /// Offset of the `LIMIT` window.
    #[serde(default)]
    pub limit_from: u32,

    /// Row count of the `LIMIT` window.
    #[serde(default)]
    pub limit_to: u32,

    /// Engine options added to every statement, rendered in key order.
    #[serde(default)]
    pub options: BTreeMap<String, toml::Value>,
}

fn default_true() -> bool {
    true
}

fn default_sort() -> Option<String> {
    Some(DEFAULT_SORT.to_string())
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            select_all_fields: default_true(),
            sort: default_sort(),
            limit_from: 0,
            limit_to: 0,
            options: BTreeMap::new(),
        }
    }
}

impl BuilderConfig {
    /// Parse and validate a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured value can be rendered.
    pub fn validate(&self) -> Result<()> {
        if let Some(sort) = &self.sort {
            if sort.trim().is_empty() {
                return Err(Error::config("sort must not be empty"));
            }
        }

        for (key, value) in &self.options {
            if key.trim().is_empty() {
                return Err(Error::config("option names must not be empty"));
            }
            if option_value(value).is_none() {
                return Err(Error::config(format!(
                    "option `{key}` must be a string, integer, float or boolean"
                )));
            }
        }

        Ok(())
    }

    /// Options as rendered `(name, value)` pairs, in key order.
    ///
    /// Values that cannot be rendered are skipped; [`validate`](Self::validate)
    /// reports them.
    pub fn rendered_options(&self) -> impl Iterator<Item = (&str, String)> + '_ {
        self.options
            .iter()
            .filter_map(|(key, value)| option_value(value).map(|v| (key.as_str(), v)))
    }
}

/// Render a scalar option value. Booleans become `1` / `0`.
fn option_value(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(if *b { "1" } else { "0" }.to_string()),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
