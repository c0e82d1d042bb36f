//! # DocumentClient Trait
//!
//! Provides a common interface for entity-specific clients, adding a default
//! `find_by_hash` point lookup built on top of the shared `SearchClient`.
use crate::model::Index;
use async_trait::async_trait;
use explorer_query::{query, Document, ItemResult, Namespace, QueryError, SearchClient};

/// Trait for entity clients whose documents are keyed by hash.
#[async_trait]
pub trait DocumentClient<T: Document>: Send + Sync {
    /// Index family holding `T`.
    const INDEX: Index;

    /// Access the inner generic SearchClient.
    fn inner(&self) -> &SearchClient;

    /// Fetch a document by hash.
    #[tracing::instrument(skip(self))]
    async fn find_by_hash(&self, hash: &str, ns: &Namespace) -> Result<ItemResult<T>, QueryError> {
        tracing::debug!("Sending request");
        let request = query::point_lookup(Self::INDEX.name(ns), hash, ns);
        self.inner().get_one(request, ns).await
    }
}
