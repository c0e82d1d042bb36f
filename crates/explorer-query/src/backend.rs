//! # Search Backend
//!
//! The only I/O seam of the crate. A production implementation talks to a search
//! cluster; tests use the doubles in [`crate::mock`].

use crate::error::BackendError;
use crate::extract::{GetResponse, SearchResponse};
use crate::query::{DocumentGetRequest, SearchRequest};
use async_trait::async_trait;

#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Point-get by index and primary key. A missing document is `found: false`,
    /// not an error.
    async fn get(&self, request: DocumentGetRequest) -> Result<GetResponse, BackendError>;

    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError>;
}
