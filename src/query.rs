//! Query string builder for OpenCRM list and count filters.
//!
//! OpenCRM filters with a single pipe-delimited condition:
//! `FIELDNAME|OPERATOR|VALUE`, where the operator is one of `=`, `LIKE`,
//! `BEGINS`, `ENDS` or `CONTAINS`.
//!
//! OpenCRM cannot combine conditions. The builder accepts several, but
//! [`QueryBuilder::build`] only ever returns the first one. Values are not
//! escaped: a value containing `|` produces a query the API will misread.
//!
//! # Example
//!
//! ```
//! use opencrm::query;
//!
//! let q = query().equals("leadstatus", "New");
//! assert_eq!(q.build().as_deref(), Some("leadstatus|=|New"));
//! ```

use std::fmt;

/// Comparison operators understood by OpenCRM query strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Exact match (`=`).
    Equals,
    /// Pattern match with `%` wildcards (`LIKE`).
    Like,
    /// Prefix match (`BEGINS`).
    BeginsWith,
    /// Suffix match (`ENDS`).
    EndsWith,
    /// Substring match (`CONTAINS`).
    Contains,
}

impl Operator {
    /// The operator as written in a query string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::Like => "LIKE",
            Operator::BeginsWith => "BEGINS",
            Operator::EndsWith => "ENDS",
            Operator::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fluent builder for OpenCRM query strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuilder {
    conditions: Vec<String>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition with an explicit operator.
    pub fn condition(
        mut self,
        field: impl AsRef<str>,
        operator: Operator,
        value: impl AsRef<str>,
    ) -> Self {
        self.conditions.push(format!(
            "{}|{}|{}",
            field.as_ref(),
            operator,
            value.as_ref()
        ));
        self
    }

    /// Adds an exact match condition.
    pub fn equals(self, field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.condition(field, Operator::Equals, value)
    }

    /// Adds a pattern match condition. Use `%` as the wildcard.
    pub fn like(self, field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.condition(field, Operator::Like, value)
    }

    /// Adds a "starts with" condition.
    pub fn begins_with(self, field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.condition(field, Operator::BeginsWith, value)
    }

    /// Adds an "ends with" condition.
    pub fn ends_with(self, field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.condition(field, Operator::EndsWith, value)
    }

    /// Adds a "contains" condition.
    pub fn contains(self, field: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.condition(field, Operator::Contains, value)
    }

    /// Returns the query string, or `None` if no condition was added.
    ///
    /// Only the first condition is returned; OpenCRM cannot combine them.
    pub fn build(&self) -> Option<String> {
        self.conditions.first().cloned()
    }

    /// Removes all conditions.
    pub fn clear(mut self) -> Self {
        self.conditions.clear();
        self
    }

    /// Returns true if no condition was added.
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

/// Creates a new, empty [`QueryBuilder`].
pub fn query() -> QueryBuilder {
    QueryBuilder::new()
}
