//! # Query Errors
//!
//! This module defines the error taxonomy shared by every stage of a read query:
//! request validation, query execution, hit extraction and pagination.
//! By centralizing error definitions, callers (typically an HTTP layer) can map
//! any failure onto a response class with a single [`QueryError::kind`] call.

/// Failures reported by a [`SearchBackend`](crate::SearchBackend) implementation.
///
/// These never reach callers directly; they are wrapped in [`QueryError::Backend`]
/// and always classified as a server error.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum BackendError {
    #[error("Transport failure: {0}")]
    Transport(String),
    #[error("Backend timed out")]
    Timeout,
    #[error("Backend rejected query: {0}")]
    Rejected(String),
}

/// Errors that can occur while building, running or paginating a query.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum QueryError {
    /// The caller supplied an invalid pagination combination, limit or token.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A single-entity lookup matched nothing, or a page came back empty.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored data did not have the shape the schema guarantees.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The search backend failed.
    #[error("Search backend error: {0}")]
    Backend(#[from] BackendError),
}

/// Response class of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    ServerError,
}

impl QueryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueryError::BadRequest(_) => ErrorKind::BadRequest,
            QueryError::NotFound(_) => ErrorKind::NotFound,
            QueryError::ServerError(_) | QueryError::Backend(_) => ErrorKind::ServerError,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub(crate) fn malformed(detail: impl std::fmt::Display) -> Self {
        QueryError::ServerError(format!("Malformed data: {detail}"))
    }
}
