//! Fee transactions only exist for metagraph currencies, so every call takes the
//! currency identifier instead of a [`Namespace`].
use crate::clients::document_client::DocumentClient;
use crate::clients::listing::{self, TransactionFilter};
use crate::clients::SnapshotClient;
use crate::model::{FeeTransaction, Index, Term, TransactionField};
use explorer_query::{
    ItemResult, Namespace, PaginatedResult, PaginationRequest, QueryError, SearchClient,
};
use serde_json::Value;
use tracing::instrument;

#[derive(Clone)]
pub struct FeeTransactionClient {
    inner: SearchClient,
    snapshots: SnapshotClient,
}

impl FeeTransactionClient {
    pub fn new(inner: SearchClient, snapshots: SnapshotClient) -> Self {
        Self { inner, snapshots }
    }

    #[instrument(skip(self))]
    pub async fn find_fee_transaction_by_hash(
        &self,
        identifier: &str,
        hash: &str,
    ) -> Result<ItemResult<FeeTransaction>, QueryError> {
        self.find_by_hash(hash, &Namespace::currency(identifier)).await
    }

    #[instrument(skip(self))]
    pub async fn find_fee_transactions_by_snapshot(
        &self,
        identifier: &str,
        term: &Term,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<FeeTransaction>, QueryError> {
        let ns = Namespace::currency(identifier);
        listing::list_by_snapshot(
            &self.inner,
            &self.snapshots,
            Index::FeeTransactions.name(&ns),
            term,
            pagination,
            &ns,
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn find_fee_transactions_by_address(
        &self,
        identifier: &str,
        address: &str,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<FeeTransaction>, QueryError> {
        self.list(identifier, TransactionFilter::address(address), pagination)
            .await
    }

    #[instrument(skip(self))]
    pub async fn find_fee_transactions_by_source(
        &self,
        identifier: &str,
        address: &str,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<FeeTransaction>, QueryError> {
        let filter = TransactionFilter::Eq(TransactionField::Source, Value::from(address));
        self.list(identifier, filter, pagination).await
    }

    #[instrument(skip(self))]
    pub async fn find_fee_transactions_by_destination(
        &self,
        identifier: &str,
        address: &str,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<FeeTransaction>, QueryError> {
        let filter = TransactionFilter::Eq(TransactionField::Destination, Value::from(address));
        self.list(identifier, filter, pagination).await
    }

    async fn list(
        &self,
        identifier: &str,
        filter: TransactionFilter,
        pagination: PaginationRequest,
    ) -> Result<PaginatedResult<FeeTransaction>, QueryError> {
        let ns = Namespace::currency(identifier);
        let index = Index::FeeTransactions.name(&ns);
        listing::list(&self.inner, index, filter, pagination, &ns).await
    }
}

impl DocumentClient<FeeTransaction> for FeeTransactionClient {
    const INDEX: Index = Index::FeeTransactions;

    fn inner(&self) -> &SearchClient {
        &self.inner
    }
}
