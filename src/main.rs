//! # Explorer Demo
//!
//! Seeds an in-memory index with a few snapshots and transactions, then walks a
//! transaction listing page by page the way an API consumer would, following
//! each page's `next` token.

use explorer_api::lifecycle::{ExplorerConfig, ExplorerSystem};
use explorer_api::model::{Snapshot, Term, Transaction, TransactionReference};
use explorer_query::mock::InMemoryBackend;
use explorer_query::tracing::setup_tracing;
use explorer_query::{Namespace, PaginationParams};
use std::sync::Arc;
use tracing::{info, Instrument};

fn snapshot(ordinal: u64) -> Snapshot {
    Snapshot {
        hash: format!("snapshot-{ordinal}"),
        ordinal,
        height: ordinal * 2,
        sub_height: 0,
        last_snapshot_hash: format!("snapshot-{}", ordinal.saturating_sub(1)),
        timestamp: format!("2024-01-01T00:00:0{ordinal}Z"),
        blocks: Vec::new(),
    }
}

fn transaction(ordinal: u64, source: &str, parent: u64) -> Transaction {
    Transaction {
        hash: format!("tx-{ordinal}-{source}-{parent}"),
        source: source.to_string(),
        destination: "DAG-destination".to_string(),
        amount: 100 * (parent + 1),
        fee: 0,
        parent: TransactionReference {
            hash: format!("tx-parent-{parent}"),
            ordinal: parent,
        },
        block_hash: format!("block-{ordinal}"),
        snapshot_hash: format!("snapshot-{ordinal}"),
        snapshot_ordinal: ordinal,
        timestamp: format!("2024-01-01T00:00:0{ordinal}Z"),
    }
}

fn seed(backend: &InMemoryBackend) -> Result<(), String> {
    for ordinal in 1..=3 {
        let doc = snapshot(ordinal);
        let source = serde_json::to_value(&doc).map_err(|e| e.to_string())?;
        backend.index_document("snapshots", doc.hash.clone(), source);
    }
    let transactions = [
        transaction(1, "DAG-alice", 0),
        transaction(2, "DAG-alice", 1),
        transaction(2, "DAG-bob", 0),
        transaction(3, "DAG-alice", 2),
        transaction(3, "DAG-carol", 0),
    ];
    for tx in transactions {
        let source = serde_json::to_value(&tx).map_err(|e| e.to_string())?;
        backend.index_document("transactions", tx.hash.clone(), source);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ExplorerConfig::from_env().map_err(|e| e.to_string())?;
    info!(search_node = %config.search_node, "Starting explorer demo");

    let backend = InMemoryBackend::new();
    seed(&backend)?;
    let system = ExplorerSystem::new(config, Arc::new(backend));
    let ns = Namespace::Global;

    let latest = system
        .snapshot_client
        .find_snapshot(&Term::Latest)
        .await
        .map_err(|e| e.to_string())?;
    info!(ordinal = latest.data.ordinal, hash = %latest.data.hash, "Latest snapshot");

    let mut params = PaginationParams::default().limit(2);
    for page in 1..=2 {
        let span = tracing::info_span!("transaction_page", page);
        let result = async {
            let request = system.pagination(params.clone())?;
            system.transaction_client.list_transactions(request, &ns).await
        }
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

        for tx in &result.data {
            info!(page, hash = %tx.hash, ordinal = tx.snapshot_ordinal, "Transaction");
        }
        match result.next_token() {
            Some(token) => {
                info!(page, next = %token, "Page has a continuation token");
                params = PaginationParams::default().next(token);
            }
            None => {
                info!(page, "Last page reached");
                break;
            }
        }
    }

    info!("Demo completed successfully");
    Ok(())
}
