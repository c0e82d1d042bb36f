//! # Search Client
//!
//! [`SearchClient`] runs built requests against a [`SearchBackend`] and extracts the
//! hits. Its [`paginate`](SearchClient::paginate) method is the orchestration entry
//! point for every listing: it resolves a [`PaginationRequest`] into a concrete
//! [`SortSpec`], runs the query, and decides whether the page gets a continuation
//! token.
//!
//! Calls are stateless. At most two backend round trips happen per listing: an
//! optional point lookup that translates a document id into sort key values, then
//! the main search. They are sequential because the second depends on the first.
//! Backend failures are logged and wrapped; nothing is retried.

use crate::backend::SearchBackend;
use crate::cursor;
use crate::document::Document;
use crate::error::QueryError;
use crate::extract::{self, ExtractedResult, ItemResult};
use crate::namespace::Namespace;
use crate::pagination::{PageMeta, PaginatedResult, PaginationRequest};
use crate::query::{self, DocumentGetRequest, SearchRequest};
use crate::sort::{SearchDirection, SortOption, SortSpec, SortValue};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// How a `since` value of a [`PaginationRequest::Resume`] maps onto sort keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resume {
    /// `since` is the value of the single natural sort field.
    SortKey,
    /// `since` is a document id in `index`; its sort values are looked up.
    Lookup { index: String },
    /// Numeric `since` is the sort key, anything else is a document id in `index`.
    OrdinalOrLookup { index: String },
}

impl Resume {
    pub fn lookup(index: impl Into<String>) -> Self {
        Resume::Lookup {
            index: index.into(),
        }
    }

    pub fn ordinal_or_lookup(index: impl Into<String>) -> Self {
        Resume::OrdinalOrLookup {
            index: index.into(),
        }
    }
}

/// Cheap to clone; all clones share one backend handle.
#[derive(Clone)]
pub struct SearchClient {
    backend: Arc<dyn SearchBackend>,
}

impl SearchClient {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    #[instrument(skip(self, ns))]
    pub async fn get_one<T: DeserializeOwned>(
        &self,
        request: DocumentGetRequest,
        ns: &Namespace,
    ) -> Result<ItemResult<T>, QueryError> {
        debug!("Sending get request");
        let id = request.id.clone();
        let response = self.backend.get(request).await.map_err(|e| {
            warn!(error = %e, "Get request failed");
            QueryError::from(e)
        })?;
        extract::extract_one(response.into_hits(), ns).map_err(|e| match e {
            QueryError::NotFound(_) => QueryError::NotFound(format!("document {id} not found")),
            other => other,
        })
    }

    pub async fn search_one<T: DeserializeOwned>(
        &self,
        request: SearchRequest,
        ns: &Namespace,
    ) -> Result<ItemResult<T>, QueryError> {
        let hits = self.run(request).await?;
        extract::extract_one(hits, ns)
    }

    pub async fn search_all<T: DeserializeOwned>(
        &self,
        request: SearchRequest,
        ns: &Namespace,
    ) -> Result<Vec<T>, QueryError> {
        let hits = self.run(request).await?;
        extract::extract_all(hits, ns)
    }

    pub async fn search_inner<O: DeserializeOwned, I: DeserializeOwned>(
        &self,
        path: &str,
        request: SearchRequest,
        ns: &Namespace,
    ) -> Result<Vec<ExtractedResult<O, I>>, QueryError> {
        let hits = self.run(request).await?;
        extract::extract_inner(path, hits, ns)
    }

    /// Resolves `request`, runs the listing built by `build` and pages the result.
    ///
    /// An empty page is `NotFound`; callers listing children of a resolved parent
    /// turn that into an empty page themselves.
    #[instrument(skip(self, natural, build))]
    pub async fn paginate<T, B>(
        &self,
        request: PaginationRequest,
        natural: &[T::Field],
        resume: Resume,
        ns: &Namespace,
        build: B,
    ) -> Result<PaginatedResult<T>, QueryError>
    where
        T: Document,
        B: FnOnce(&SortSpec<T::Field>) -> SearchRequest + Send,
    {
        let spec = self.resolve::<T>(request, natural, resume, ns).await?;
        let hits = self.run(build(&spec)).await?;
        let data: Vec<T> = extract::extract_outer(hits, ns)?;
        if data.is_empty() {
            return Err(QueryError::NotFound("no results for this page".into()));
        }
        PaginatedResult::from_rows(data, &spec)
    }

    async fn resolve<T: Document>(
        &self,
        request: PaginationRequest,
        natural: &[T::Field],
        resume: Resume,
        ns: &Namespace,
    ) -> Result<SortSpec<T::Field>, QueryError> {
        match request {
            PaginationRequest::FirstPage { size } => {
                SortSpec::natural(natural, SearchDirection::Before, size)
            }
            PaginationRequest::Continue { size, token } => {
                let spec = cursor::decode::<T::Field>(&token)?;
                if !spec.fields().eq(natural.iter().copied()) {
                    return Err(QueryError::BadRequest(
                        "next token does not belong to this listing".into(),
                    ));
                }
                spec.with_size(size)
            }
            PaginationRequest::Resume {
                size,
                since,
                direction,
            } => {
                let index = match resume {
                    Resume::SortKey => None,
                    Resume::Lookup { index } => Some(index),
                    Resume::OrdinalOrLookup { index } => {
                        match SortValue::parse(&since) {
                            SortValue::Integer(_) => None,
                            SortValue::Text(_) => Some(index),
                        }
                    }
                };
                match index {
                    None => {
                        let [field] = natural else {
                            return Err(QueryError::ServerError(
                                "sort key resume needs exactly one sort field".into(),
                            ));
                        };
                        let option = SortOption::since(*field, direction, SortValue::parse(&since));
                        SortSpec::new(vec![option], size)
                    }
                    Some(index) => {
                        debug!(%since, %index, "Resolving resume point by lookup");
                        let anchor: T = self
                            .get_one(query::point_lookup(&index, &since, ns), ns)
                            .await?
                            .data;
                        let values = anchor.sort_values(natural.iter().copied())?;
                        SortSpec::natural(natural, direction, size)?.resume_from(values)
                    }
                }
            }
        }
    }

    async fn run(&self, request: SearchRequest) -> Result<Vec<extract::RawHit>, QueryError> {
        debug!(index = %request.index, size = request.body.size, "Sending search request");
        let response = self.backend.search(request).await.map_err(|e| {
            warn!(error = %e, "Search request failed");
            QueryError::from(e)
        })?;
        Ok(response.into_hits())
    }
}

impl<T: Document> PaginatedResult<T> {
    /// Pages `data` that was fetched with `spec`. A full page carries a token that
    /// resumes after its last row; a short page is the end of the listing.
    pub fn from_rows(data: Vec<T>, spec: &SortSpec<T::Field>) -> Result<Self, QueryError> {
        if data.len() < spec.effective_size() {
            return Ok(Self { data, meta: None });
        }
        let next = match data.last() {
            Some(last) => {
                let values = last.sort_values(spec.fields())?;
                let next = cursor::encode(&spec.resume_from(values)?)?;
                debug!(rows = data.len(), "Page is full, emitting next token");
                Some(PageMeta { next })
            }
            None => None,
        };
        Ok(Self { data, meta: next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::tests::Row;
    use crate::mock::MockBackend;
    use crate::sort::tests::TestField;
    use crate::{BackendError, ErrorKind, GetResponse, RawHit, SearchResponse};
    use serde_json::json;

    fn rows(ordinals: &[i64]) -> Vec<RawHit> {
        ordinals
            .iter()
            .map(|n| RawHit::new(n.to_string(), json!({ "ordinal": n, "parent": 0 })))
            .collect()
    }

    fn listing(spec: &SortSpec<TestField>) -> SearchRequest {
        query::all("rows", spec, &Namespace::Global)
    }

    #[test]
    fn test_full_page_emits_token_for_last_row() {
        let spec =
            SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, Some(2)).unwrap();
        let data = vec![Row { ordinal: 9, parent: None }, Row { ordinal: 8, parent: None }];
        let page = PaginatedResult::from_rows(data, &spec).unwrap();

        let next: SortSpec<TestField> = cursor::decode(page.next_token().unwrap()).unwrap();
        assert_eq!(next.since_values(), Some(vec![SortValue::Integer(8)]));
        assert_eq!(next.size(), Some(2));
        assert_eq!(next.direction(), SearchDirection::Before);
    }

    #[test]
    fn test_short_page_has_no_token() {
        let spec =
            SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, Some(3)).unwrap();
        let data = vec![Row { ordinal: 9, parent: None }];
        assert!(PaginatedResult::from_rows(data, &spec).unwrap().meta.is_none());
    }

    #[tokio::test]
    async fn test_first_page_uses_natural_descending_order() {
        // 1. Setup
        let mock = MockBackend::new();
        mock.expect_search()
            .return_ok(SearchResponse::from_hits(rows(&[3, 2])));
        let client = SearchClient::new(Arc::new(mock.clone()));

        // 2. Paginate
        let page: PaginatedResult<Row> = client
            .paginate(
                PaginationRequest::first_page(Some(2)),
                &[TestField::Ordinal],
                Resume::SortKey,
                &Namespace::Global,
                listing,
            )
            .await
            .unwrap();

        // 3. Verify
        assert_eq!(page.data.len(), 2);
        assert!(page.next_token().is_some());
        let sent = mock.searches();
        assert_eq!(sent[0].to_json()["body"]["sort"], json!([{ "ordinal": "desc" }]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_resume_by_lookup_translates_id_into_sort_values() {
        let mock = MockBackend::new();
        mock.expect_get()
            .return_ok(GetResponse::found("abc", json!({ "ordinal": 7, "parent": 1 })));
        mock.expect_search().return_ok(SearchResponse::from_hits(rows(&[8])));
        let client = SearchClient::new(Arc::new(mock.clone()));

        let request = PaginationRequest::Resume {
            size: Some(5),
            since: "abc".into(),
            direction: SearchDirection::After,
        };
        let page: PaginatedResult<Row> = client
            .paginate(
                request,
                &[TestField::Ordinal, TestField::ParentOrdinal],
                Resume::lookup("rows"),
                &Namespace::Global,
                |spec| query::all("rows", spec, &Namespace::Global),
            )
            .await
            .unwrap();

        assert!(page.meta.is_none());
        let body = mock.searches()[0].to_json();
        assert_eq!(body["body"]["search_after"], json!([7, 1]));
        assert_eq!(
            body["body"]["sort"],
            json!([{ "ordinal": "asc" }, { "parent.ordinal": "asc" }])
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_numeric_since_skips_lookup() {
        let mock = MockBackend::new();
        mock.expect_search().return_ok(SearchResponse::from_hits(rows(&[4])));
        let client = SearchClient::new(Arc::new(mock.clone()));

        let request = PaginationRequest::Resume {
            size: None,
            since: "5".into(),
            direction: SearchDirection::Before,
        };
        let _: PaginatedResult<Row> = client
            .paginate(
                request,
                &[TestField::Ordinal],
                Resume::ordinal_or_lookup("rows"),
                &Namespace::Global,
                listing,
            )
            .await
            .unwrap();

        assert!(mock.gets().is_empty());
        assert_eq!(mock.searches()[0].body.search_after, Some(vec![SortValue::Integer(5)]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_empty_page_is_not_found() {
        let mock = MockBackend::new();
        mock.expect_search().return_ok(SearchResponse::default());
        let client = SearchClient::new(Arc::new(mock.clone()));

        let err = client
            .paginate::<Row, _>(
                PaginationRequest::default(),
                &[TestField::Ordinal],
                Resume::SortKey,
                &Namespace::Global,
                listing,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_backend_failure_is_server_error() {
        let mock = MockBackend::new();
        mock.expect_search().return_err(BackendError::Timeout);
        let client = SearchClient::new(Arc::new(mock.clone()));

        let spec = SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, None).unwrap();
        let err = client
            .search_all::<Row>(listing(&spec), &Namespace::Global)
            .await
            .unwrap_err();
        assert_eq!(err, QueryError::Backend(BackendError::Timeout));
        assert_eq!(err.kind(), ErrorKind::ServerError);
    }

    #[tokio::test]
    async fn test_bad_token_short_circuits() {
        let mock = MockBackend::new();
        let client = SearchClient::new(Arc::new(mock.clone()));

        let request = PaginationRequest::Continue {
            size: None,
            token: "not a token".into(),
        };
        let err = client
            .paginate::<Row, _>(
                request,
                &[TestField::Ordinal],
                Resume::SortKey,
                &Namespace::Global,
                listing,
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(mock.searches().is_empty());
    }
}
