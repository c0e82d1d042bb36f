use crate::clients::document_client::DocumentClient;
use crate::clients::listing::{self, TransactionFilter};
use crate::clients::SnapshotClient;
use crate::model::{Index, Term, Transaction, TransactionField};
use explorer_query::{
    ItemResult, Namespace, PaginatedResult, PaginationRequest, QueryError, SearchClient,
};
use serde_json::Value;
use tracing::{debug, instrument};

/// Client for transactions in the global or a currency namespace.
#[derive(Clone)]
pub struct TransactionClient {
    inner: SearchClient,
    snapshots: SnapshotClient,
}

impl TransactionClient {
    pub fn new(inner: SearchClient, snapshots: SnapshotClient) -> Self {
        Self { inner, snapshots }
    }
}

impl DocumentClient<Transaction> for TransactionClient {
    const INDEX: Index = Index::Transactions;

    fn inner(&self) -> &SearchClient {
        &self.inner
    }
}

impl TransactionClient {
    #[instrument(skip(self))]
    pub async fn find_transaction_by_hash(
        &self,
        hash: &str,
        ns: &Namespace,
    ) -> Result<ItemResult<Transaction>, QueryError> {
        self.find_by_hash(hash, ns).await
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        pagination: PaginationRequest,
        ns: &Namespace,
    ) -> Result<PaginatedResult<Transaction>, QueryError> {
        debug!("Sending request");
        let index = Index::Transactions.name(ns);
        listing::list(&self.inner, index, TransactionFilter::All, pagination, ns).await
    }

    #[instrument(skip(self))]
    pub async fn find_transactions_by_snapshot(
        &self,
        term: &Term,
        pagination: PaginationRequest,
        ns: &Namespace,
    ) -> Result<PaginatedResult<Transaction>, QueryError> {
        debug!("Sending request");
        listing::list_by_snapshot(
            &self.inner,
            &self.snapshots,
            Index::Transactions.name(ns),
            term,
            pagination,
            ns,
        )
        .await
    }

    /// Transactions sent or received by `address`.
    #[instrument(skip(self))]
    pub async fn find_transactions_by_address(
        &self,
        address: &str,
        pagination: PaginationRequest,
        ns: &Namespace,
    ) -> Result<PaginatedResult<Transaction>, QueryError> {
        debug!("Sending request");
        let filter = TransactionFilter::address(address);
        listing::list(&self.inner, Index::Transactions.name(ns), filter, pagination, ns).await
    }

    #[instrument(skip(self))]
    pub async fn find_transactions_by_source(
        &self,
        address: &str,
        pagination: PaginationRequest,
        ns: &Namespace,
    ) -> Result<PaginatedResult<Transaction>, QueryError> {
        debug!("Sending request");
        let filter = TransactionFilter::Eq(TransactionField::Source, Value::from(address));
        listing::list(&self.inner, Index::Transactions.name(ns), filter, pagination, ns).await
    }

    #[instrument(skip(self))]
    pub async fn find_transactions_by_destination(
        &self,
        address: &str,
        pagination: PaginationRequest,
        ns: &Namespace,
    ) -> Result<PaginatedResult<Transaction>, QueryError> {
        debug!("Sending request");
        let filter = TransactionFilter::Eq(TransactionField::Destination, Value::from(address));
        listing::list(&self.inner, Index::Transactions.name(ns), filter, pagination, ns).await
    }
}
