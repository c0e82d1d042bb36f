//! # Balance Client
//!
//! Two views of an address balance:
//!
//! | Method | Source | Missing address |
//! |--------|--------|-----------------|
//! | [`find_balance_by_address`](BalanceClient::find_balance_by_address) | balance records, newest at or before an ordinal | balance `0` at the requested or latest ordinal |
//! | [`find_snapshot_balance`](BalanceClient::find_snapshot_balance) | nested `info.balances` of one snapshot | balance `0` at the snapshot ordinal |
//!
//! A missing snapshot is `NotFound` in both views.
use crate::clients::SnapshotClient;
use crate::model::{
    Balance, BalanceField, BalanceRecord, BalanceValue, Index, SnapshotOrdinal, Term,
};
use explorer_query::{
    query, ItemResult, Namespace, QueryError, SearchClient, SearchDirection, SortOption, SortSpec,
};
use tracing::{debug, info, instrument};

const BALANCES_PATH: &str = "info.balances";

#[derive(Clone)]
pub struct BalanceClient {
    inner: SearchClient,
    snapshots: SnapshotClient,
}

impl BalanceClient {
    pub fn new(inner: SearchClient, snapshots: SnapshotClient) -> Self {
        Self { inner, snapshots }
    }

    /// Balance of `address` as of `ordinal`, or as of the latest snapshot.
    #[instrument(skip(self))]
    pub async fn find_balance_by_address(
        &self,
        address: &str,
        ordinal: Option<u64>,
        ns: &Namespace,
    ) -> Result<ItemResult<Balance>, QueryError> {
        debug!("Sending request");
        let spec = match ordinal {
            // search_after is exclusive, so start one past the requested ordinal
            Some(ordinal) => SortSpec::new(
                vec![SortOption::since(
                    BalanceField::SnapshotOrdinal,
                    SearchDirection::Before,
                    ordinal.saturating_add(1),
                )],
                Some(1),
            )?,
            None => SortSpec::natural(
                &[BalanceField::SnapshotOrdinal],
                SearchDirection::Before,
                Some(1),
            )?,
        };
        let request = query::by_field(
            Index::Balances.name(ns),
            BalanceField::Address,
            address,
            &spec,
            ns,
        );
        match self.inner.search_one::<BalanceRecord>(request, ns).await {
            Ok(found) => Ok(found.map(Balance::from)),
            Err(e) if e.is_not_found() => {
                let ordinal = match ordinal {
                    Some(ordinal) => ordinal,
                    None => self.snapshots.resolve_ordinal(&Term::Latest, ns).await?,
                };
                info!(ordinal, "No balance record, reporting zero");
                Ok(ItemResult::new(Balance {
                    address: address.to_string(),
                    balance: 0,
                    ordinal,
                }))
            }
            Err(e) => Err(e),
        }
    }

    /// Balance of `address` recorded in the snapshot `term` refers to.
    #[instrument(skip(self))]
    pub async fn find_snapshot_balance(
        &self,
        address: &str,
        term: &Term,
        ns: &Namespace,
    ) -> Result<ItemResult<Balance>, QueryError> {
        debug!("Sending request");
        let path = ns.field_path(BALANCES_PATH);
        let request = SnapshotClient::term_request(term, ns)?
            .with_includes(&["ordinal"], ns)
            .with_optional_nested(query::nested(&path, "address", address, &["balance"]));

        let found = self
            .inner
            .search_inner::<SnapshotOrdinal, BalanceValue>(&path, request, ns)
            .await?;
        let snapshot = found
            .into_iter()
            .next()
            .ok_or_else(|| QueryError::NotFound(format!("snapshot {term} not found")))?;
        let balance = snapshot.inner.first().map_or(0, |value| value.balance);
        Ok(ItemResult::new(Balance {
            address: address.to_string(),
            balance,
            ordinal: snapshot.outer.ordinal,
        }))
    }
}
