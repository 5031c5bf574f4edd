//! # Resource Query Model
//!
//! A small, serializable query language for resource collections: a
//! conjunction of field [`Criterion`]s plus paging and sorting. Services
//! interpret a [`QuerySpec`] against their own storage; the in-memory
//! implementation evaluates it directly, a database-backed one would
//! translate it to SQL.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Comparison operator of a [`Criterion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CriterionOperator {
    /// Field equals the operand.
    #[serde(rename = "=")]
    Eq,
    /// Field is contained in the operand array.
    #[serde(rename = "in")]
    In,
    /// Field matches the operand pattern (`%` wildcards at either end).
    #[serde(rename = "like")]
    Like,
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Criterion {
    /// Field name on the queried resource.
    pub operand_left: String,
    /// Comparison operator.
    pub operator: CriterionOperator,
    /// Right-hand operand; an array for `In`, a string for `Like`.
    #[schema(value_type = Object)]
    pub operand_right: serde_json::Value,
}

impl Criterion {
    /// An equality criterion: `field = value`.
    pub fn equal(field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            operand_left: field.into(),
            operator: CriterionOperator::Eq,
            operand_right: value.into(),
        }
    }

    /// A membership criterion: `field in values`.
    pub fn is_in(field: impl Into<String>, values: Vec<serde_json::Value>) -> Self {
        Self {
            operand_left: field.into(),
            operator: CriterionOperator::In,
            operand_right: serde_json::Value::Array(values),
        }
    }

    /// A pattern criterion: `field like pattern`.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            operand_left: field.into(),
            operator: CriterionOperator::Like,
            operand_right: serde_json::Value::String(pattern.into()),
        }
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOrder {
    /// Ascending (default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Default page size when a query does not set one.
pub const DEFAULT_QUERY_LIMIT: usize = 50;

/// A query over a resource collection.
///
/// All criteria apply conjunctively. Build via [`QuerySpec::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuerySpec {
    /// Conjunctive filter criteria.
    pub filter: Vec<Criterion>,
    /// Number of matching records to skip.
    pub offset: usize,
    /// Maximum number of records to return.
    pub limit: usize,
    /// Field to sort by, if any.
    pub sort_field: Option<String>,
    /// Sort direction, meaningful only with `sort_field`.
    pub sort_order: SortOrder,
}

impl QuerySpec {
    /// Start building a query.
    pub fn builder() -> QuerySpecBuilder {
        QuerySpecBuilder::default()
    }

    /// A query matching everything, first page.
    pub fn none() -> Self {
        Self::builder().build()
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::none()
    }
}

/// Builder for [`QuerySpec`].
#[derive(Debug, Default)]
pub struct QuerySpecBuilder {
    filter: Vec<Criterion>,
    offset: usize,
    limit: Option<usize>,
    sort_field: Option<String>,
    sort_order: SortOrder,
}

impl QuerySpecBuilder {
    /// Add a filter criterion.
    pub fn filter(mut self, criterion: Criterion) -> Self {
        self.filter.push(criterion);
        self
    }

    /// Skip the first `offset` matching records.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Return at most `limit` records.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sort results by the given field.
    pub fn sort_field(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    /// Sort direction.
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    /// Finish the query.
    pub fn build(self) -> QuerySpec {
        QuerySpec {
            filter: self.filter,
            offset: self.offset,
            limit: self.limit.unwrap_or(DEFAULT_QUERY_LIMIT),
            sort_field: self.sort_field,
            sort_order: self.sort_order,
        }
    }
}
