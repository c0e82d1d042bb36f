//! # Sort Specifications
//!
//! A [`SortSpec`] describes the order of a result set and, optionally, the exact
//! position to resume from. The same value drives two things:
//!
//! 1. the `sort` array of a search request, in option order, and
//! 2. the `search_after` array, in the *same* order, when the options carry `since` values.
//!
//! Keeping both in one type is what makes a continuation token sufficient to resume a
//! listing without any server-side state.

use crate::error::QueryError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};

/// Page size used when a request does not name one. Also the largest size accepted.
pub const MAX_PAGE_SIZE: usize = 10_000;

/// A field that can appear in a term filter or a sort clause.
///
/// Each entity declares an enum of its queryable fields; the enum's serde names are
/// the field names carried inside continuation tokens.
pub trait QueryField:
    Copy + Debug + PartialEq + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Document path of the field, e.g. `parent.ordinal`.
    fn path(self) -> &'static str;
}

/// Position of the requested rows relative to the cursor.
///
/// `Before` maps to a descending sort and `After` to an ascending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchDirection {
    #[default]
    #[serde(rename = "search_before")]
    Before,
    #[serde(rename = "search_after")]
    After,
}

impl SearchDirection {
    pub fn sort_order(self) -> SortOrder {
        match self {
            SearchDirection::Before => SortOrder::Desc,
            SearchDirection::After => SortOrder::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A value of a sort field, as carried in `search_after` and in tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SortValue {
    Integer(i64),
    Text(String),
}

impl SortValue {
    /// Interprets a raw `since` string: all-digit strings become integers.
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<i64>() {
            Ok(n) => SortValue::Integer(n),
            Err(_) => SortValue::Text(raw.to_string()),
        }
    }
}

impl Display for SortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortValue::Integer(n) => write!(f, "{n}"),
            SortValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for SortValue {
    fn from(n: i64) -> Self {
        SortValue::Integer(n)
    }
}

impl From<u64> for SortValue {
    fn from(n: u64) -> Self {
        SortValue::Integer(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for SortValue {
    fn from(s: &str) -> Self {
        SortValue::Text(s.to_string())
    }
}

impl From<String> for SortValue {
    fn from(s: String) -> Self {
        SortValue::Text(s)
    }
}

impl From<SortValue> for serde_json::Value {
    fn from(value: SortValue) -> Self {
        match value {
            SortValue::Integer(n) => serde_json::Value::from(n),
            SortValue::Text(s) => serde_json::Value::String(s),
        }
    }
}

/// One sort field, its direction and an optional resume value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortOption<F> {
    pub field: F,
    #[serde(default)]
    pub direction: SearchDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<SortValue>,
}

impl<F: QueryField> SortOption<F> {
    pub fn new(field: F, direction: SearchDirection) -> Self {
        Self {
            field,
            direction,
            since: None,
        }
    }

    pub fn since(field: F, direction: SearchDirection, since: impl Into<SortValue>) -> Self {
        Self {
            field,
            direction,
            since: Some(since.into()),
        }
    }
}

/// Ordered sort options plus an optional page size.
///
/// Invariants, checked on construction and on deserialization:
/// - at least one option,
/// - every option sorts in the same direction,
/// - either every option carries `since` or none does,
/// - `size` does not exceed [`MAX_PAGE_SIZE`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SortSpecRepr<F>", bound(deserialize = "F: QueryField"))]
pub struct SortSpec<F> {
    options: Vec<SortOption<F>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<usize>,
}

#[derive(Deserialize)]
struct SortSpecRepr<F> {
    options: Vec<SortOption<F>>,
    #[serde(default)]
    size: Option<usize>,
}

impl<F: QueryField> TryFrom<SortSpecRepr<F>> for SortSpec<F> {
    type Error = QueryError;

    fn try_from(repr: SortSpecRepr<F>) -> Result<Self, Self::Error> {
        SortSpec::new(repr.options, repr.size)
    }
}

impl<F: QueryField> SortSpec<F> {
    pub fn new(options: Vec<SortOption<F>>, size: Option<usize>) -> Result<Self, QueryError> {
        if options.is_empty() {
            return Err(QueryError::BadRequest("sort options must not be empty".into()));
        }
        let direction = options[0].direction;
        if options.iter().any(|o| o.direction != direction) {
            return Err(QueryError::BadRequest("sort options must share one direction".into()));
        }
        let with_since = options.iter().filter(|o| o.since.is_some()).count();
        if with_since != 0 && with_since != options.len() {
            return Err(QueryError::BadRequest(
                "sort options must all carry a since value or none".into(),
            ));
        }
        if let Some(size) = size {
            if size > MAX_PAGE_SIZE {
                return Err(QueryError::BadRequest(format!(
                    "size must not exceed {MAX_PAGE_SIZE}"
                )));
            }
        }
        Ok(Self { options, size })
    }

    /// First-page spec over `fields` in the given direction.
    pub fn natural(
        fields: &[F],
        direction: SearchDirection,
        size: Option<usize>,
    ) -> Result<Self, QueryError> {
        let options = fields
            .iter()
            .map(|field| SortOption::new(*field, direction))
            .collect();
        Self::new(options, size)
    }

    pub fn options(&self) -> &[SortOption<F>] {
        &self.options
    }

    pub fn size(&self) -> Option<usize> {
        self.size
    }

    pub fn effective_size(&self) -> usize {
        match self.size {
            Some(size) if size > 0 => size,
            _ => MAX_PAGE_SIZE,
        }
    }

    /// Overrides the page size; `None` keeps the current one.
    pub fn with_size(self, size: Option<usize>) -> Result<Self, QueryError> {
        match size {
            Some(_) => Self::new(self.options, size),
            None => Ok(self),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.options.iter().map(|o| o.field)
    }

    /// Direction of the leading option.
    pub fn direction(&self) -> SearchDirection {
        self.options
            .first()
            .map(|o| o.direction)
            .unwrap_or_default()
    }

    pub fn is_since(&self) -> bool {
        self.options.iter().all(|o| o.since.is_some())
    }

    /// `search_after` values in option order, if this spec resumes from a position.
    pub fn since_values(&self) -> Option<Vec<SortValue>> {
        self.options.iter().map(|o| o.since.clone()).collect()
    }

    /// Same fields, directions and size, resuming after `values`.
    pub fn resume_from(&self, values: Vec<SortValue>) -> Result<Self, QueryError> {
        if values.len() != self.options.len() {
            return Err(QueryError::malformed(format!(
                "expected {} sort values, got {}",
                self.options.len(),
                values.len()
            )));
        }
        let options = self
            .options
            .iter()
            .zip(values)
            .map(|(option, value)| SortOption::since(option.field, option.direction, value))
            .collect();
        Self::new(options, self.size)
    }
}
