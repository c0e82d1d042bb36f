use explorer_api::lifecycle::{ExplorerConfig, ExplorerSystem};
use explorer_api::model::Term;
use explorer_query::mock::MockBackend;
use explorer_query::{
    BackendError, ErrorKind, GetResponse, Namespace, PaginationRequest, RawHit, SearchResponse,
};
use serde_json::json;
use std::sync::Arc;

fn system(mock: &MockBackend) -> ExplorerSystem {
    ExplorerSystem::new(ExplorerConfig::default(), Arc::new(mock.clone()))
}

#[tokio::test]
async fn test_latest_snapshot_request_shape() {
    let mock = MockBackend::new();
    mock.expect_search().return_ok(SearchResponse::from_hits(vec![RawHit::new(
        "s4",
        json!({
            "hash": "s4", "ordinal": 4, "height": 1, "subHeight": 0,
            "lastSnapshotHash": "s3", "timestamp": "t"
        }),
    )]));

    let found = system(&mock)
        .snapshot_client
        .find_snapshot(&Term::Latest)
        .await
        .unwrap();
    assert_eq!(found.data.ordinal, 4);

    let searches = mock.searches();
    let body = searches[0].to_json()["body"].clone();
    assert_eq!(searches[0].index, "snapshots");
    assert_eq!(body["size"], 1);
    assert_eq!(body["sort"], json!([{ "ordinal": "desc" }]));
    assert_eq!(body["_source"]["includes"].as_array().unwrap().len(), 7);
    mock.verify();
}

#[tokio::test]
async fn test_backend_failure_is_server_error() {
    let mock = MockBackend::new();
    mock.expect_get().return_err(BackendError::Timeout);

    let err = system(&mock)
        .block_client
        .find_block_by_hash("b1", &Namespace::Global)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);
    mock.verify();
}

#[tokio::test]
async fn test_transactions_by_snapshot_resolves_first() {
    let mock = MockBackend::new();
    // 1. Snapshot lookup, then an empty listing
    mock.expect_get().return_ok(GetResponse::found("h4", json!({ "ordinal": 4 })));
    mock.expect_search().return_ok(SearchResponse::default());

    let page = system(&mock)
        .transaction_client
        .find_transactions_by_snapshot(
            &Term::parse("h4"),
            PaginationRequest::first_page(Some(5)),
            &Namespace::Global,
        )
        .await
        .unwrap();
    assert!(page.data.is_empty());

    // 2. The listing filters on the resolved ordinal in natural order
    assert_eq!(mock.gets()[0].id, "h4");
    let body = mock.searches()[0].to_json()["body"].clone();
    assert_eq!(body["size"], 5);
    assert_eq!(body["query"]["bool"]["must"][0], json!({ "term": { "snapshotOrdinal": 4 } }));
    assert_eq!(
        body["sort"],
        json!([
            { "snapshotOrdinal": "desc" },
            { "source": "desc" },
            { "parent.ordinal": "desc" }
        ])
    );
    mock.verify();
}

#[tokio::test]
async fn test_snapshot_balance_without_inner_hits_is_server_error() {
    let mock = MockBackend::new();
    mock.expect_search().return_ok(SearchResponse::from_hits(vec![RawHit::new(
        "s4",
        json!({ "ordinal": 4 }),
    )]));

    let err = system(&mock)
        .balance_client
        .find_snapshot_balance("DAG-alice", &Term::Ordinal(4), &Namespace::Global)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ServerError);

    // The nested clause is optional so the snapshot matches without the address
    let body = mock.searches()[0].to_json()["body"].clone();
    assert_eq!(body["query"]["bool"]["should"][0]["nested"]["path"], "info.balances");
    assert_eq!(body["query"]["bool"]["should"][0]["nested"]["inner_hits"]["size"], 7);
    mock.verify();
}
