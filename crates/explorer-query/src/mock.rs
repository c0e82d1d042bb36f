//! # Test Doubles & Testing Guide
//!
//! Two [`SearchBackend`] implementations that run entirely in memory.
//!
//! ## When to use which
//!
//! | Feature | MockBackend | InMemoryBackend |
//! |---------|-------------|-----------------|
//! | **Responses** | Scripted, in order | Computed from indexed documents |
//! | **Request capture** | Yes (`gets()`, `searches()`) | No |
//! | **Error Injection** | Easy (`return_err`) | Not supported |
//! | **Use Case** | Orchestration logic around one or two calls | End-to-end listings, paging through real data |
//!
//! ## Pattern 0: Scripted Backend
//!
//! ```rust
//! use explorer_query::mock::MockBackend;
//! use explorer_query::{query, BackendError, Namespace, QueryError, SearchClient};
//! use serde_json::Value;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockBackend::new();
//!     mock.expect_get().return_err(BackendError::Timeout);
//!
//!     let client = SearchClient::new(Arc::new(mock.clone()));
//!     let lookup = query::point_lookup("snapshots", "abc", &Namespace::Global);
//!     let result = client.get_one::<Value>(lookup, &Namespace::Global).await;
//!
//!     assert!(matches!(result, Err(QueryError::Backend(BackendError::Timeout))));
//!     mock.verify();
//! }
//! ```
//!
//! ## Pattern 1: In-Memory Index
//!
//! ```rust
//! use explorer_query::mock::InMemoryBackend;
//! use explorer_query::{query, Namespace, SearchClient};
//! use serde_json::{json, Value};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = InMemoryBackend::new();
//!     backend.index_document("snapshots", "a", json!({ "hash": "a", "ordinal": 1 }));
//!
//!     let client = SearchClient::new(Arc::new(backend));
//!     let lookup = query::point_lookup("snapshots", "a", &Namespace::Global);
//!     let found = client.get_one::<Value>(lookup, &Namespace::Global).await.unwrap();
//!     assert_eq!(found.data["ordinal"], 1);
//! }
//! ```
//!
//! The in-memory evaluator understands the subset of the query DSL the builders in
//! [`crate::query`] emit: `match_all`, `term`, `match`, `bool` with
//! `must`/`filter`/`should`/`minimum_should_match`, and `nested` with `inner_hits`.

use crate::backend::SearchBackend;
use crate::error::BackendError;
use crate::extract::{GetResponse, HitList, InnerHits, RawHit, SearchResponse};
use crate::query::{DocumentGetRequest, SearchRequest, SortClause};
use crate::sort::SortOrder;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation {
    Get(Result<GetResponse, BackendError>),
    Search(Result<SearchResponse, BackendError>),
}

/// A scripted backend. Expectations are consumed in order; a request that does
/// not match the next expectation panics.
#[derive(Clone, Default)]
pub struct MockBackend {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    gets: Arc<Mutex<Vec<DocumentGetRequest>>>,
    searches: Arc<Mutex<Vec<SearchRequest>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a point-get.
    pub fn expect_get(&self) -> GetExpectationBuilder {
        GetExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a search.
    pub fn expect_search(&self) -> SearchExpectationBuilder {
        SearchExpectationBuilder {
            expectations: self.expectations.clone(),
        }
    }

    /// Point-gets received so far.
    pub fn gets(&self) -> Vec<DocumentGetRequest> {
        lock(&self.gets).clone()
    }

    /// Searches received so far.
    pub fn searches(&self) -> Vec<SearchRequest> {
        lock(&self.searches).clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.expectations).len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn next_expectation(&self) -> Option<Expectation> {
        lock(&self.expectations).pop_front()
    }
}

pub struct GetExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl GetExpectationBuilder {
    pub fn return_ok(self, response: GetResponse) {
        lock(&self.expectations).push_back(Expectation::Get(Ok(response)));
    }

    pub fn return_err(self, error: BackendError) {
        lock(&self.expectations).push_back(Expectation::Get(Err(error)));
    }
}

pub struct SearchExpectationBuilder {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl SearchExpectationBuilder {
    pub fn return_ok(self, response: SearchResponse) {
        lock(&self.expectations).push_back(Expectation::Search(Ok(response)));
    }

    pub fn return_err(self, error: BackendError) {
        lock(&self.expectations).push_back(Expectation::Search(Err(error)));
    }
}

#[async_trait]
impl SearchBackend for MockBackend {
    async fn get(&self, request: DocumentGetRequest) -> Result<GetResponse, BackendError> {
        lock(&self.gets).push(request.clone());
        match self.next_expectation() {
            Some(Expectation::Get(response)) => response,
            _ => panic!("Unexpected get request or expectation mismatch: {request:?}"),
        }
    }

    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        lock(&self.searches).push(request.clone());
        match self.next_expectation() {
            Some(Expectation::Search(response)) => response,
            _ => panic!("Unexpected search request or expectation mismatch: {request:?}"),
        }
    }
}

// =============================================================================
// IN-MEMORY INDEX
// =============================================================================

/// Documents per index, in insertion order.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    indices: Arc<Mutex<HashMap<String, Vec<(String, Value)>>>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `doc` under `id`, replacing any previous document with that id.
    pub fn index_document(&self, index: &str, id: impl Into<String>, doc: Value) {
        let id = id.into();
        let mut indices = lock(&self.indices);
        let docs = indices.entry(index.to_string()).or_default();
        match docs.iter_mut().find(|(existing, _)| *existing == id) {
            Some(slot) => slot.1 = doc,
            None => docs.push((id, doc)),
        }
    }

    pub fn len(&self, index: &str) -> usize {
        lock(&self.indices).get(index).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, index: &str) -> bool {
        self.len(index) == 0
    }
}

#[async_trait]
impl SearchBackend for InMemoryBackend {
    async fn get(&self, request: DocumentGetRequest) -> Result<GetResponse, BackendError> {
        let indices = lock(&self.indices);
        let found = indices
            .get(&request.index)
            .and_then(|docs| docs.iter().find(|(id, _)| *id == request.id));
        Ok(match found {
            Some((id, doc)) => GetResponse::found(id.clone(), doc.clone()),
            None => GetResponse::missing(request.id),
        })
    }

    async fn search(&self, request: SearchRequest) -> Result<SearchResponse, BackendError> {
        let body = request.body;
        let mut matched: Vec<(String, Value)> = lock(&self.indices)
            .get(&request.index)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, doc)| matches(&body.query, doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        matched.sort_by(|(_, a), (_, b)| compare_docs(a, b, &body.sort));

        if let Some(after) = &body.search_after {
            let after: Vec<Value> = after.iter().cloned().map(Value::from).collect();
            matched.retain(|(_, doc)| {
                compare_to_cursor(doc, &after, &body.sort) == Ordering::Greater
            });
        }
        matched.truncate(body.size);

        let nested = nested_clauses(&body.query);
        let hits = matched
            .into_iter()
            .map(|(id, doc)| {
                let inner_hits = (!nested.is_empty()).then(|| {
                    nested
                        .iter()
                        .map(|clause| (clause.path.clone(), clause.inner_hits(&doc)))
                        .collect()
                });
                let source = match &body.source {
                    Some(filter) => project(&doc, &filter.includes),
                    None => doc.clone(),
                };
                RawHit {
                    id,
                    sort: Some(
                        body.sort
                            .iter()
                            .map(|clause| first_value(&doc, &clause.field).unwrap_or(Value::Null))
                            .collect(),
                    ),
                    source,
                    inner_hits,
                }
            })
            .collect();

        Ok(SearchResponse::from_hits(hits))
    }
}

// --- query evaluation ---

fn matches(query: &Value, doc: &Value) -> bool {
    let Some((kind, clause)) = query.as_object().and_then(|q| q.iter().next()) else {
        return false;
    };
    match kind.as_str() {
        "match_all" => true,
        "term" | "match" => clause.as_object().is_some_and(|fields| {
            fields.iter().all(|(field, expected)| {
                let expected = expected
                    .get("value")
                    .or_else(|| expected.get("query"))
                    .unwrap_or(expected);
                values_at(doc, field).iter().any(|v| equal(v, expected))
            })
        }),
        "bool" => matches_bool(clause, doc),
        "nested" => {
            NestedClause::parse(clause).is_some_and(|nested| !nested.matching(doc).is_empty())
        }
        _ => false,
    }
}

fn clauses(value: Option<&Value>) -> Vec<&Value> {
    match value {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single) => vec![single],
        None => Vec::new(),
    }
}

fn matches_bool(clause: &Value, doc: &Value) -> bool {
    let must = clauses(clause.get("must"));
    let filter = clauses(clause.get("filter"));
    let should = clauses(clause.get("should"));

    if !must.iter().chain(filter.iter()).all(|q| matches(q, doc)) {
        return false;
    }
    if should.is_empty() {
        return true;
    }
    let default_minimum = if must.is_empty() && filter.is_empty() { 1 } else { 0 };
    let minimum = clause
        .get("minimum_should_match")
        .and_then(Value::as_u64)
        .map_or(default_minimum, |n| n as usize);
    should.iter().filter(|q| matches(q, doc)).count() >= minimum
}

struct NestedClause {
    path: String,
    query: Value,
    size: usize,
    includes: Vec<String>,
}

impl NestedClause {
    fn parse(clause: &Value) -> Option<Self> {
        let inner_hits = clause.get("inner_hits");
        Some(Self {
            path: clause.get("path")?.as_str()?.to_string(),
            query: clause.get("query")?.clone(),
            size: inner_hits
                .and_then(|h| h.get("size"))
                .and_then(Value::as_u64)
                .map_or(3, |n| n as usize),
            includes: inner_hits
                .and_then(|h| h.pointer("/_source/includes"))
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Nested objects under `path` that satisfy the nested query. Field names in
    /// the query are full paths, so each object is re-rooted at `path` first.
    fn matching(&self, doc: &Value) -> Vec<Value> {
        values_at(doc, &self.path)
            .into_iter()
            .filter(|item| matches(&self.query, &root_at(&self.path, (*item).clone())))
            .cloned()
            .collect()
    }

    fn inner_hits(&self, doc: &Value) -> InnerHits {
        let prefix = format!("{}.", self.path);
        let includes: Vec<String> = self
            .includes
            .iter()
            .filter_map(|path| path.strip_prefix(&prefix).map(str::to_string))
            .collect();
        let hits = self
            .matching(doc)
            .into_iter()
            .take(self.size)
            .map(|item| {
                let source = if includes.is_empty() {
                    item
                } else {
                    project(&item, &includes)
                };
                RawHit::new("", source)
            })
            .collect();
        InnerHits {
            hits: HitList { hits },
        }
    }
}

fn nested_clauses(query: &Value) -> Vec<NestedClause> {
    let mut found = Vec::new();
    collect_nested(query, &mut found);
    found
}

fn collect_nested(value: &Value, found: &mut Vec<NestedClause>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "nested" {
                    found.extend(NestedClause::parse(child));
                } else {
                    collect_nested(child, found);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_nested(item, found)),
        _ => {}
    }
}

// --- document access ---

/// Every value reachable at a dotted path, flattening arrays along the way.
fn values_at<'a>(doc: &'a Value, path: &str) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for segment in path.split('.') {
        current = current
            .into_iter()
            .flat_map(|value| match value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(|i| i.get(segment))
                    .collect::<Vec<_>>(),
                other => other.get(segment).into_iter().collect(),
            })
            .collect();
    }
    current
        .into_iter()
        .flat_map(|value| match value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .collect()
}

fn first_value(doc: &Value, path: &str) -> Option<Value> {
    values_at(doc, path).into_iter().next().cloned()
}

fn root_at(path: &str, value: Value) -> Value {
    path.rsplit('.').fold(value, |inner, segment| {
        let mut map = Map::new();
        map.insert(segment.to_string(), inner);
        Value::Object(map)
    })
}

/// Keeps only the given dotted paths of `doc`.
fn project(doc: &Value, includes: &[String]) -> Value {
    let mut out = Value::Object(Map::new());
    for path in includes {
        let segments: Vec<&str> = path.split('.').collect();
        let Some(value) = segments
            .iter()
            .try_fold(doc, |value, segment| value.get(*segment))
        else {
            continue;
        };
        let mut slot = &mut out;
        for segment in &segments {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            slot = match slot {
                Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
                other => other,
            };
        }
        *slot = value.clone();
    }
    out
}

// --- ordering ---

fn equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match (a.as_f64(), b.as_f64(), a.as_str(), b.as_str()) {
            (Some(x), Some(y), _, _) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (_, _, Some(x), Some(y)) => x.cmp(y),
            (Some(_), None, _, _) => Ordering::Less,
            (None, Some(_), _, _) => Ordering::Greater,
            _ => a.to_string().cmp(&b.to_string()),
        },
    }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

fn compare_docs(a: &Value, b: &Value, sort: &[SortClause]) -> Ordering {
    sort.iter()
        .map(|clause| {
            let ordering = compare_values(
                values_at(a, &clause.field).first().copied(),
                values_at(b, &clause.field).first().copied(),
            );
            directed(ordering, clause.order)
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn compare_to_cursor(doc: &Value, cursor: &[Value], sort: &[SortClause]) -> Ordering {
    sort.iter()
        .zip(cursor)
        .map(|(clause, after)| {
            let current = values_at(doc, &clause.field).first().copied();
            let ordering = compare_values(current, Some(after));
            directed(ordering, clause.order)
        })
        .find(|ordering| *ordering != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}
