//! # Explorer Query
//!
//! The read-query engine of a block explorer API. Given a term, an address or a
//! snapshot reference, it builds search requests, pages through large result sets
//! with stable cursors, and reshapes raw hits into typed results.
//!
//! ## Architecture Overview
//!
//! The crate is split along the path a request takes:
//!
//! 1. **Validation** ([`PaginationParams`]) - raw query parameters become one [`PaginationRequest`]
//! 2. **Resolution** ([`SearchClient::paginate`]) - the request becomes a concrete [`SortSpec`]
//! 3. **Query building** ([`query`]) - pure functions producing [`SearchRequest`]s
//! 4. **Execution** ([`SearchBackend`]) - the only I/O seam
//! 5. **Extraction** ([`extract`]) - hits become entities, nested hits become [`ExtractedResult`]s
//! 6. **Paging** ([`PaginatedResult::from_rows`]) - a full page gets a `next` token ([`cursor`])
//!
//! ## Cursor Pagination
//!
//! A [`SortSpec`] drives both the `sort` array and the `search_after` array of a
//! request, in the same order. A continuation token is that spec, with the last
//! row's sort values as `since`, serialized as base64 JSON. Resuming a listing
//! therefore needs no server-side state:
//!
//! ```rust
//! use explorer_query::{cursor, QueryField, SearchDirection, SortSpec, SortValue};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
//! enum Field {
//!     #[serde(rename = "ordinal")]
//!     Ordinal,
//! }
//!
//! impl QueryField for Field {
//!     fn path(self) -> &'static str {
//!         "ordinal"
//!     }
//! }
//!
//! let first = SortSpec::natural(&[Field::Ordinal], SearchDirection::Before, Some(10)).unwrap();
//! let next = first.resume_from(vec![SortValue::Integer(41)]).unwrap();
//!
//! let token = cursor::encode(&next).unwrap();
//! let decoded: SortSpec<Field> = cursor::decode(&token).unwrap();
//! assert_eq!(decoded, next);
//! ```
//!
//! ## Namespaces
//!
//! Currency documents live in their own indices inside a `{identifier, data}`
//! envelope. Every builder, extractor and client call takes an explicit
//! [`Namespace`]; nothing is inferred from document shape.
//!
//! ## Testing
//!
//! See [`mock`] for a scripted [`MockBackend`](mock::MockBackend) and an
//! [`InMemoryBackend`](mock::InMemoryBackend) that evaluates the emitted queries.

pub mod backend;
pub mod client;
pub mod cursor;
pub mod document;
pub mod error;
pub mod extract;
pub mod mock;
pub mod namespace;
pub mod pagination;
pub mod query;
pub mod sort;
pub mod tracing;

// Re-export core types for convenience
pub use backend::SearchBackend;
pub use client::{Resume, SearchClient};
pub use document::Document;
pub use error::{BackendError, ErrorKind, QueryError};
pub use extract::{
    CurrencyEnvelope, ExtractedResult, GetResponse, ItemResult, RawHit, SearchResponse,
};
pub use namespace::Namespace;
pub use pagination::{PageMeta, PaginatedResult, PaginationParams, PaginationRequest};
pub use query::{DocumentGetRequest, NestedQuery, SearchRequest};
pub use sort::{
    QueryField, SearchDirection, SortOption, SortOrder, SortSpec, SortValue, MAX_PAGE_SIZE,
};
