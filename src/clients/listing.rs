//! Listings shared by transactions and fee transactions. Both use the same
//! stored schema and natural order, so the helpers are generic over the entity.

use super::SnapshotClient;
use crate::model::{Term, TransactionField};
use explorer_query::{
    query, Document, Namespace, PaginatedResult, PaginationRequest, QueryError, Resume,
    SearchClient,
};
use serde_json::Value;
use tracing::info;

/// Predicate of a transaction listing.
#[derive(Debug, Clone)]
pub enum TransactionFilter {
    All,
    Eq(TransactionField, Value),
    Any(&'static [TransactionField], Value),
}

impl TransactionFilter {
    pub fn address(address: &str) -> Self {
        TransactionFilter::Any(
            &[TransactionField::Source, TransactionField::Destination],
            Value::from(address),
        )
    }
}

pub async fn list<T>(
    inner: &SearchClient,
    index: &str,
    filter: TransactionFilter,
    pagination: PaginationRequest,
    ns: &Namespace,
) -> Result<PaginatedResult<T>, QueryError>
where
    T: Document<Field = TransactionField>,
{
    inner
        .paginate(
            pagination,
            &TransactionField::NATURAL,
            Resume::lookup(index),
            ns,
            |spec| match filter {
                TransactionFilter::All => query::all(index, spec, ns),
                TransactionFilter::Eq(field, value) => {
                    query::by_field(index, field, value, spec, ns)
                }
                TransactionFilter::Any(fields, value) => {
                    query::by_any_field(index, fields, value, spec, ns)
                }
            },
        )
        .await
}

/// Transactions of one snapshot. The snapshot must resolve; a snapshot without
/// transactions is an empty page, not an error.
pub async fn list_by_snapshot<T>(
    inner: &SearchClient,
    snapshots: &SnapshotClient,
    index: &str,
    term: &Term,
    pagination: PaginationRequest,
    ns: &Namespace,
) -> Result<PaginatedResult<T>, QueryError>
where
    T: Document<Field = TransactionField>,
{
    let ordinal = snapshots.resolve_ordinal(term, ns).await?;
    let filter = TransactionFilter::Eq(TransactionField::SnapshotOrdinal, Value::from(ordinal));
    match list(inner, index, filter, pagination, ns).await {
        Err(e) if e.is_not_found() => {
            info!(%term, ordinal, "Snapshot has no transactions on this page");
            Ok(PaginatedResult::empty())
        }
        other => other,
    }
}
