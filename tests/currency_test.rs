use explorer_api::lifecycle::{ExplorerConfig, ExplorerSystem};
use explorer_api::model::{
    CurrencySnapshot, FeeTransaction, Snapshot, Term, Transaction, TransactionReference,
};
use explorer_query::mock::InMemoryBackend;
use explorer_query::{CurrencyEnvelope, ErrorKind, Namespace, PaginationRequest};
use serde_json::{json, Value};
use std::sync::Arc;

fn currency_snapshot(ordinal: u64, owner: &str) -> Value {
    let doc = CurrencySnapshot {
        snapshot: Snapshot {
            hash: format!("csnap-{ordinal}"),
            ordinal,
            height: ordinal,
            sub_height: 0,
            last_snapshot_hash: format!("csnap-{}", ordinal - 1),
            timestamp: "2024-02-01T00:00:00Z".to_string(),
            blocks: Vec::new(),
        },
        fee: Some(ordinal * 10),
        owner_address: Some(owner.to_string()),
        staking_address: Some(format!("DAG-stake-{ordinal}")),
        size_in_kb: Some(4),
    };
    serde_json::to_value(doc).unwrap()
}

fn fee(hash: &str, ordinal: u64, source: &str, destination: &str) -> FeeTransaction {
    FeeTransaction {
        hash: hash.to_string(),
        source: source.to_string(),
        destination: destination.to_string(),
        amount: 1,
        parent: TransactionReference {
            hash: String::new(),
            ordinal: 0,
        },
        snapshot_hash: format!("csnap-{ordinal}"),
        snapshot_ordinal: ordinal,
        timestamp: "2024-02-01T00:00:00Z".to_string(),
    }
}

fn store(backend: &InMemoryBackend, index: &str, identifier: &str, id: &str, data: Value) {
    let ns = Namespace::currency(identifier);
    let doc = CurrencyEnvelope::new(identifier, data).to_document().unwrap();
    backend.index_document(index, ns.document_id(id), doc);
}

/// Currency `DAG0` with snapshots 6..=8, plus a neighbour currency `DAG9`
/// sharing addresses, to catch leaks across namespaces.
fn seeded() -> ExplorerSystem {
    let backend = InMemoryBackend::new();

    for ordinal in 6..=8 {
        let owner = if ordinal == 8 { "DAG-other" } else { "DAG-owner" };
        let mut data = currency_snapshot(ordinal, owner);
        if ordinal == 7 {
            data["info"] = json!({ "balances": [{ "address": "DAG-alice", "balance": 77 }] });
        }
        store(&backend, "currency-snapshots", "DAG0", &format!("csnap-{ordinal}"), data);
    }
    store(
        &backend,
        "currency-snapshots",
        "DAG9",
        "csnap-50",
        currency_snapshot(50, "DAG-owner"),
    );

    for (identifier, tx) in [
        ("DAG0", fee("fee-1", 6, "DAG-alice", "DAG-owner")),
        ("DAG0", fee("fee-2", 7, "DAG-bob", "DAG-alice")),
        ("DAG9", fee("fee-9", 6, "DAG-alice", "DAG-owner")),
    ] {
        let data = serde_json::to_value(&tx).unwrap();
        store(&backend, "currency-fee-transactions", identifier, &tx.hash, data);
    }

    let tx = Transaction {
        hash: "ctx-1".to_string(),
        source: "DAG-alice".to_string(),
        destination: "DAG-bob".to_string(),
        amount: 3,
        fee: 0,
        parent: TransactionReference {
            hash: String::new(),
            ordinal: 0,
        },
        block_hash: "cblock-6".to_string(),
        snapshot_hash: "csnap-6".to_string(),
        snapshot_ordinal: 6,
        timestamp: "2024-02-01T00:00:00Z".to_string(),
    };
    store(
        &backend,
        "currency-transactions",
        "DAG0",
        "ctx-1",
        serde_json::to_value(&tx).unwrap(),
    );

    ExplorerSystem::new(ExplorerConfig::default(), Arc::new(backend))
}

#[tokio::test]
async fn test_currency_latest_snapshot_stays_in_namespace() {
    let system = seeded();
    let snapshots = &system.snapshot_client;

    let latest = snapshots
        .find_currency_snapshot("DAG0", &Term::Latest)
        .await
        .unwrap();
    assert_eq!(latest.data.snapshot.ordinal, 8);

    let by_hash = snapshots
        .find_currency_snapshot("DAG0", &Term::parse("csnap-7"))
        .await
        .unwrap();
    assert_eq!(by_hash.data.snapshot.ordinal, 7);

    // DAG9's snapshot is invisible from DAG0
    let err = snapshots
        .find_currency_snapshot("DAG0", &Term::Ordinal(50))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    // Global lookups never see currency snapshots
    let err = snapshots.find_snapshot(&Term::Latest).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_currency_snapshot_keeps_fee_and_ownership() {
    let system = seeded();
    let snapshots = &system.snapshot_client;

    // 1. Searched by term, projected through the stored field list
    let latest = snapshots
        .find_currency_snapshot("DAG0", &Term::Latest)
        .await
        .unwrap();
    assert_eq!(latest.data.fee, Some(80));
    assert_eq!(latest.data.owner_address.as_deref(), Some("DAG-other"));
    assert_eq!(latest.data.staking_address.as_deref(), Some("DAG-stake-8"));
    assert_eq!(latest.data.size_in_kb, Some(4));

    // 2. Point lookup by hash
    let by_hash = snapshots
        .find_currency_snapshot("DAG0", &Term::parse("csnap-6"))
        .await
        .unwrap();
    assert_eq!(by_hash.data.fee, Some(60));
    assert_eq!(by_hash.data.owner_address.as_deref(), Some("DAG-owner"));

    // 3. Listing
    let page = snapshots
        .list_currency_snapshots("DAG0", PaginationRequest::default())
        .await
        .unwrap();
    let fees: Vec<Option<u64>> = page.data.iter().map(|s| s.fee).collect();
    assert_eq!(fees, vec![Some(80), Some(70), Some(60)]);
    assert_eq!(page.data[1].owner_address.as_deref(), Some("DAG-owner"));
    assert_eq!(page.data[1].staking_address.as_deref(), Some("DAG-stake-7"));
}

#[tokio::test]
async fn test_currency_snapshots_by_owner_address() {
    let system = seeded();
    let page = system
        .snapshot_client
        .find_currency_snapshots_by_owner_address("DAG0", "DAG-owner", PaginationRequest::default())
        .await
        .unwrap();
    let ordinals: Vec<u64> = page.data.iter().map(|s| s.snapshot.ordinal).collect();
    assert_eq!(ordinals, vec![7, 6]);
    assert_eq!(page.data[0].fee, Some(70));
    assert_eq!(page.data[0].size_in_kb, Some(4));
}

#[tokio::test]
async fn test_fee_transaction_by_hash() {
    let system = seeded();
    let fees = &system.fee_transaction_client;

    let found = fees.find_fee_transaction_by_hash("DAG0", "fee-1").await.unwrap();
    assert_eq!(found.data.source, "DAG-alice");

    let err = fees
        .find_fee_transaction_by_hash("DAG9", "fee-1")
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_fee_transactions_by_address() {
    let system = seeded();
    let fees = &system.fee_transaction_client;

    let any = fees
        .find_fee_transactions_by_address("DAG0", "DAG-alice", PaginationRequest::default())
        .await
        .unwrap();
    let hashes: Vec<&str> = any.data.iter().map(|f| f.hash.as_str()).collect();
    assert_eq!(hashes, vec!["fee-2", "fee-1"]);

    let sent = fees
        .find_fee_transactions_by_source("DAG0", "DAG-bob", PaginationRequest::default())
        .await
        .unwrap();
    assert_eq!(sent.data.len(), 1);
    assert_eq!(sent.data[0].hash, "fee-2");

    let received = fees
        .find_fee_transactions_by_destination("DAG9", "DAG-owner", PaginationRequest::default())
        .await
        .unwrap();
    assert_eq!(received.data.len(), 1);
    assert_eq!(received.data[0].hash, "fee-9");
}

#[tokio::test]
async fn test_fee_transactions_by_snapshot() {
    let system = seeded();
    let fees = &system.fee_transaction_client;

    let page = fees
        .find_fee_transactions_by_snapshot("DAG0", &Term::Ordinal(7), PaginationRequest::default())
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].hash, "fee-2");

    // Snapshot exists but has no fee transactions
    let empty = fees
        .find_fee_transactions_by_snapshot("DAG0", &Term::Latest, PaginationRequest::default())
        .await
        .unwrap();
    assert!(empty.data.is_empty());

    let err = fees
        .find_fee_transactions_by_snapshot("DAG0", &Term::Ordinal(99), PaginationRequest::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_currency_transactions_listing() {
    let system = seeded();
    let ns = Namespace::currency("DAG0");

    let page = system
        .transaction_client
        .list_transactions(PaginationRequest::default(), &ns)
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].hash, "ctx-1");

    let err = system
        .transaction_client
        .list_transactions(PaginationRequest::default(), &Namespace::currency("DAG9"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_currency_snapshot_balance() {
    let system = seeded();
    let ns = Namespace::currency("DAG0");

    let alice = system
        .balance_client
        .find_snapshot_balance("DAG-alice", &Term::Ordinal(7), &ns)
        .await
        .unwrap();
    assert_eq!((alice.data.balance, alice.data.ordinal), (77, 7));

    let bob = system
        .balance_client
        .find_snapshot_balance("DAG-bob", &Term::Ordinal(7), &ns)
        .await
        .unwrap();
    assert_eq!((bob.data.balance, bob.data.ordinal), (0, 7));
}
