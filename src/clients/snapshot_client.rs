//! # Snapshot Client
//!
//! Lookups of global and currency snapshots by term, and snapshot listings.
use crate::model::{
    CurrencySnapshot, CurrencySnapshotField, Index, RewardTransaction, Snapshot, SnapshotField,
    SnapshotOrdinal, SnapshotRewards, Term,
};
use explorer_query::{
    query, Document, ItemResult, Namespace, PaginatedResult, PaginationRequest, QueryError, Resume,
    SearchClient, SearchDirection, SearchRequest, SortSpec,
};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SnapshotClient {
    inner: SearchClient,
}

impl SnapshotClient {
    pub fn new(inner: SearchClient) -> Self {
        Self { inner }
    }

    /// Global snapshot `term` refers to.
    #[instrument(skip(self))]
    pub async fn find_snapshot(&self, term: &Term) -> Result<ItemResult<Snapshot>, QueryError> {
        debug!("find_snapshot called");
        self.find_by_term(term, &Snapshot::FIELDS, &Namespace::Global)
            .await
    }

    /// Snapshot of currency `identifier`, with its fee and ownership data.
    #[instrument(skip(self))]
    pub async fn find_currency_snapshot(
        &self,
        identifier: &str,
        term: &Term,
    ) -> Result<ItemResult<CurrencySnapshot>, QueryError> {
        debug!("find_currency_snapshot called");
        let ns = Namespace::currency(identifier);
        self.find_by_term(term, &CurrencySnapshot::FIELDS, &ns).await
    }

    #[instrument(skip(self))]
    pub async fn find_snapshot_rewards(
        &self,
        term: &Term,
        ns: &Namespace,
    ) -> Result<ItemResult<Vec<RewardTransaction>>, QueryError> {
        debug!("find_snapshot_rewards called");
        let found: ItemResult<SnapshotRewards> = self.find_by_term(term, &["rewards"], ns).await?;
        Ok(found.map(|snapshot| snapshot.rewards))
    }

    /// Global snapshots newest first. `since` may be an ordinal or a snapshot hash.
    #[instrument(skip(self))]
    pub async fn list_snapshots(
        &self,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<Snapshot>, QueryError> {
        self.list(pagination, SnapshotField::Ordinal, &Namespace::Global)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_currency_snapshots(
        &self,
        identifier: &str,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<CurrencySnapshot>, QueryError> {
        let ns = Namespace::currency(identifier);
        self.list(pagination, CurrencySnapshotField::Ordinal, &ns)
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_currency_snapshots_by_owner_address(
        &self,
        identifier: &str,
        owner_address: &str,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<CurrencySnapshot>, QueryError> {
        let ns = Namespace::currency(identifier);
        let index = Index::Snapshots.name(&ns);
        self.inner
            .paginate(
                pagination,
                &[CurrencySnapshotField::Ordinal],
                Resume::ordinal_or_lookup(index),
                &ns,
                |spec| {
                    query::by_field(
                        index,
                        CurrencySnapshotField::OwnerAddress,
                        owner_address,
                        spec,
                        &ns,
                    )
                },
            )
            .await
    }

    /// Ordinal of the snapshot `term` refers to. Fails with `NotFound` when no such
    /// snapshot exists.
    pub async fn resolve_ordinal(&self, term: &Term, ns: &Namespace) -> Result<u64, QueryError> {
        let found: ItemResult<SnapshotOrdinal> = self.find_by_term(term, &["ordinal"], ns).await?;
        Ok(found.data.ordinal)
    }

    /// Search request selecting the single snapshot `term` refers to, for terms
    /// that are not served by a point lookup.
    pub(crate) fn term_request(term: &Term, ns: &Namespace) -> Result<SearchRequest, QueryError> {
        let index = Index::Snapshots.name(ns);
        let single =
            SortSpec::natural(&[SnapshotField::Ordinal], SearchDirection::Before, Some(1))?;
        Ok(match term {
            Term::Latest => query::latest(index, SnapshotField::Ordinal, ns),
            Term::Ordinal(ordinal) => {
                query::by_field(index, SnapshotField::Ordinal, *ordinal, &single, ns)
            }
            Term::Hash(hash) => {
                query::by_field(index, SnapshotField::Hash, hash.as_str(), &single, ns)
            }
        })
    }

    async fn list<T: Document>(
        &self,
        pagination: PaginationRequest,
        ordinal: T::Field,
        ns: &Namespace,
    ) -> Result<PaginatedResult<T>, QueryError> {
        let index = Index::Snapshots.name(ns);
        self.inner
            .paginate(
                pagination,
                &[ordinal],
                Resume::ordinal_or_lookup(index),
                ns,
                |spec| query::all(index, spec, ns),
            )
            .await
    }

    async fn find_by_term<T: DeserializeOwned>(
        &self,
        term: &Term,
        includes: &[&str],
        ns: &Namespace,
    ) -> Result<ItemResult<T>, QueryError> {
        let result = match term {
            Term::Hash(hash) => {
                let request = query::point_lookup(Index::Snapshots.name(ns), hash, ns);
                self.inner.get_one(request, ns).await
            }
            _ => {
                let request = Self::term_request(term, ns)?.with_includes(includes, ns);
                self.inner.search_one(request, ns).await
            }
        };
        result.map_err(|e| match e {
            QueryError::NotFound(_) => QueryError::NotFound(format!("snapshot {term} not found")),
            other => other,
        })
    }
}
