//! # Pagination Requests
//!
//! Callers hand over raw `limit`, `next`, `search_after` and `search_before`
//! parameters. [`PaginationParams::validate`] turns them into exactly one
//! [`PaginationRequest`] shape or rejects them before any query is issued.

use crate::error::QueryError;
use crate::sort::{SearchDirection, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Raw pagination parameters, as read from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub search_after: Option<String>,
    #[serde(default)]
    pub search_before: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationRequest {
    /// Natural order, direction `Before`.
    FirstPage { size: Option<usize> },
    /// Explicit resume point: a natural sort key or a document id.
    Resume {
        size: Option<usize>,
        since: String,
        direction: SearchDirection,
    },
    /// Opaque continuation token from a previous page.
    Continue { size: Option<usize>, token: String },
}

impl PaginationParams {
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    pub fn next(mut self, token: impl Into<String>) -> Self {
        self.next = Some(token.into());
        self
    }

    pub fn search_after(mut self, since: impl Into<String>) -> Self {
        self.search_after = Some(since.into());
        self
    }

    pub fn search_before(mut self, since: impl Into<String>) -> Self {
        self.search_before = Some(since.into());
        self
    }

    /// Empty `next`, `search_after` and `search_before` values count as absent.
    pub fn validate(self) -> Result<PaginationRequest, QueryError> {
        let size = parse_limit(self.limit.as_deref())?;
        let next = non_empty(self.next);

        let resume = match (non_empty(self.search_after), non_empty(self.search_before)) {
            (Some(_), Some(_)) => {
                return Err(QueryError::BadRequest(
                    "search_after & search_before should be mutually exclusive".into(),
                ))
            }
            (Some(since), None) => Some((since, SearchDirection::After)),
            (None, Some(since)) => Some((since, SearchDirection::Before)),
            (None, None) => None,
        };

        match (next, resume) {
            (Some(_), Some(_)) => Err(QueryError::BadRequest(
                "next and search_after/search_before should be mutually exclusive".into(),
            )),
            (Some(token), None) => Ok(PaginationRequest::Continue { size, token }),
            (None, Some((since, direction))) => Ok(PaginationRequest::Resume {
                size,
                since,
                direction,
            }),
            (None, None) => Ok(PaginationRequest::FirstPage { size }),
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|value| !value.is_empty())
}

fn parse_limit(raw: Option<&str>) -> Result<Option<usize>, QueryError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let limit: usize = raw
        .trim()
        .parse()
        .map_err(|_| QueryError::BadRequest("limit must be a number".into()))?;
    match limit {
        0 => Ok(None),
        n if n > MAX_PAGE_SIZE => Err(QueryError::BadRequest(format!(
            "limit must not exceed {MAX_PAGE_SIZE}"
        ))),
        n => Ok(Some(n)),
    }
}

impl PaginationRequest {
    pub fn first_page(size: Option<usize>) -> Self {
        PaginationRequest::FirstPage { size }
    }

    pub fn size(&self) -> Option<usize> {
        match self {
            PaginationRequest::FirstPage { size }
            | PaginationRequest::Resume { size, .. }
            | PaginationRequest::Continue { size, .. } => *size,
        }
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        PaginationRequest::FirstPage { size: None }
    }
}

/// Continuation metadata of a full page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub next: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> PaginatedResult<T> {
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            meta: None,
        }
    }

    pub fn next_token(&self) -> Option<&str> {
        self.meta.as_ref().map(|meta| meta.next.as_str())
    }
}
