//! # Query Builders
//!
//! Pure functions translating a logical request (index, predicate, sort) into a
//! search-engine request. Nothing here performs I/O.
//!
//! Every multi-result request carries `sort` clauses in option order and, only when
//! the [`SortSpec`] resumes from a position, a `search_after` array in the same order.

use crate::namespace::Namespace;
use crate::sort::{QueryField, SortOrder, SortSpec, SortValue};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};

/// Upper bound on nested sub-documents returned per outer hit.
pub const INNER_HITS_SIZE: usize = 7;

/// Fetch of exactly one document by primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentGetRequest {
    pub index: String,
    pub id: String,
}

/// One `{field: order}` entry of a `sort` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl Serialize for SortClause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.field, &self.order)?;
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceFilter {
    pub includes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_after: Option<Vec<SortValue>>,
    pub size: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sort: Vec<SortClause>,
    pub query: Value,
    #[serde(rename = "_source", skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceFilter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchRequest {
    pub index: String,
    pub body: SearchBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InnerHitsSpec {
    pub from: usize,
    pub size: usize,
    #[serde(rename = "_source")]
    pub source: SourceFilter,
}

/// A `nested` query clause plus its `inner_hits` block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NestedQuery {
    pub path: String,
    pub query: Value,
    pub ignore_unmapped: bool,
    pub inner_hits: InnerHitsSpec,
}

impl SearchRequest {
    /// Ands a nested clause into the request's filter context. Only documents with
    /// at least one matching sub-document are returned.
    pub fn with_nested(self, nested: NestedQuery) -> Self {
        self.push_clause("filter", json!({ "nested": nested }))
    }

    /// Adds a nested clause as an optional `should`. Documents without a matching
    /// sub-document still match and come back with empty inner hits.
    pub fn with_optional_nested(self, nested: NestedQuery) -> Self {
        self.push_clause("should", json!({ "nested": nested }))
    }

    fn push_clause(mut self, occurrence: &str, clause: Value) -> Self {
        let mut query = match std::mem::take(&mut self.body.query) {
            Value::Object(outer) if outer.contains_key("bool") => Value::Object(outer),
            other => json!({ "bool": { "filter": [other] } }),
        };
        if let Some(Value::Object(bool_query)) = query.get_mut("bool") {
            let slot = bool_query
                .entry(occurrence)
                .or_insert_with(|| Value::Array(Vec::new()));
            match slot {
                Value::Array(clauses) => clauses.push(clause),
                single => *single = json!([single.take(), clause]),
            }
        }
        self.body.query = query;
        self
    }

    /// Restricts returned `_source` to the given document paths. Currency documents
    /// keep their `identifier` so the envelope can still be recognized.
    pub fn with_includes(mut self, includes: &[&str], ns: &Namespace) -> Self {
        let mut includes: Vec<String> = includes.iter().map(|path| ns.field_path(path)).collect();
        if ns.is_currency() {
            includes.push("identifier".to_string());
        }
        self.body.source = Some(SourceFilter { includes });
        self
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

pub fn point_lookup(index: &str, id: &str, ns: &Namespace) -> DocumentGetRequest {
    DocumentGetRequest {
        index: index.to_string(),
        id: ns.document_id(id),
    }
}

/// Newest document by `field`, used to resolve the term `latest`.
pub fn latest<F: QueryField>(index: &str, field: F, ns: &Namespace) -> SearchRequest {
    SearchRequest {
        index: index.to_string(),
        body: SearchBody {
            search_after: None,
            size: 1,
            sort: vec![SortClause {
                field: ns.field_path(field.path()),
                order: SortOrder::Desc,
            }],
            query: scoped(Vec::new(), ns),
            source: None,
        },
    }
}

/// Exact-term filter on one field.
pub fn by_field<F: QueryField>(
    index: &str,
    field: F,
    value: impl Into<Value>,
    sort: &SortSpec<F>,
    ns: &Namespace,
) -> SearchRequest {
    let value: Value = value.into();
    let term = json!({ "term": { ns.field_path(field.path()): value } });
    let mut must = vec![term];
    must.extend(ns.identifier_clause());
    search(index, json!({ "bool": { "must": must } }), sort, ns)
}

/// Term filter matching when any of `fields` equals `value`.
pub fn by_any_field<F: QueryField>(
    index: &str,
    fields: &[F],
    value: impl Into<Value>,
    sort: &SortSpec<F>,
    ns: &Namespace,
) -> SearchRequest {
    let value: Value = value.into();
    let should: Vec<Value> = fields
        .iter()
        .map(|field| json!({ "term": { ns.field_path(field.path()): value.clone() } }))
        .collect();
    let mut bool_query = json!({
        "should": should,
        "minimum_should_match": 1,
    });
    if let Some(clause) = ns.identifier_clause() {
        bool_query["must"] = json!([clause]);
    }
    search(index, json!({ "bool": bool_query }), sort, ns)
}

/// Unfiltered listing.
pub fn all<F: QueryField>(index: &str, sort: &SortSpec<F>, ns: &Namespace) -> SearchRequest {
    search(index, scoped(Vec::new(), ns), sort, ns)
}

/// Nested sub-query on `path` matching `path.field == value`, returning the
/// matching sub-documents as inner hits restricted to `includes`.
pub fn nested(path: &str, field: &str, value: impl Into<Value>, includes: &[&str]) -> NestedQuery {
    let value: Value = value.into();
    let term = json!({ "term": { format!("{path}.{field}"): { "value": value } } });
    NestedQuery {
        path: path.to_string(),
        query: json!({ "bool": { "filter": term } }),
        ignore_unmapped: false,
        inner_hits: InnerHitsSpec {
            from: 0,
            size: INNER_HITS_SIZE,
            source: SourceFilter {
                includes: includes
                    .iter()
                    .map(|name| format!("{path}.{name}"))
                    .collect(),
            },
        },
    }
}

fn scoped(mut must: Vec<Value>, ns: &Namespace) -> Value {
    must.extend(ns.identifier_clause());
    if must.is_empty() {
        json!({ "match_all": {} })
    } else {
        json!({ "bool": { "must": must } })
    }
}

fn search<F: QueryField>(
    index: &str,
    query: Value,
    sort: &SortSpec<F>,
    ns: &Namespace,
) -> SearchRequest {
    let clauses = sort
        .options()
        .iter()
        .map(|option| SortClause {
            field: ns.field_path(option.field.path()),
            order: option.direction.sort_order(),
        })
        .collect();

    SearchRequest {
        index: index.to_string(),
        body: SearchBody {
            search_after: sort.since_values(),
            size: sort.effective_size(),
            sort: clauses,
            query,
            source: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::tests::TestField;
    use crate::sort::{SearchDirection, SortOption};

    fn since_spec() -> SortSpec<TestField> {
        SortSpec::new(
            vec![
                SortOption::since(TestField::Ordinal, SearchDirection::After, 7i64),
                SortOption::since(TestField::ParentOrdinal, SearchDirection::After, 2i64),
            ],
            Some(5),
        )
        .unwrap()
    }

    #[test]
    fn test_point_lookup_prefixes_currency_ids() {
        let get = point_lookup("snapshots", "abc", &Namespace::currency("DAG0"));
        assert_eq!(get.id, "DAG0abc");
        assert_eq!(point_lookup("snapshots", "abc", &Namespace::Global).id, "abc");
    }

    #[test]
    fn test_latest_sorts_descending_with_size_one() {
        let body = latest("snapshots", TestField::Ordinal, &Namespace::Global).to_json();
        assert_eq!(
            body["body"],
            json!({
                "size": 1,
                "sort": [{ "ordinal": "desc" }],
                "query": { "match_all": {} }
            })
        );
    }

    #[test]
    fn test_latest_in_currency_namespace_filters_identifier() {
        let body = latest("snapshots", TestField::Ordinal, &Namespace::currency("DAG0")).to_json();
        assert_eq!(body["body"]["sort"], json!([{ "data.ordinal": "desc" }]));
        assert_eq!(
            body["body"]["query"],
            json!({ "bool": { "must": [{ "term": { "identifier": "DAG0" } }] } })
        );
    }

    #[test]
    fn test_by_field_pairs_sort_and_search_after() {
        let request = by_field(
            "transactions",
            TestField::Ordinal,
            3,
            &since_spec(),
            &Namespace::Global,
        );
        let body = request.to_json();
        assert_eq!(body["body"]["size"], json!(5));
        assert_eq!(
            body["body"]["sort"],
            json!([{ "ordinal": "asc" }, { "parent.ordinal": "asc" }])
        );
        assert_eq!(body["body"]["search_after"], json!([7, 2]));
        assert_eq!(
            body["body"]["query"],
            json!({ "bool": { "must": [{ "term": { "ordinal": 3 } }] } })
        );
    }

    #[test]
    fn test_plain_sort_omits_search_after() {
        let spec = SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, None).unwrap();
        let body = all("snapshots", &spec, &Namespace::Global).to_json();
        assert!(body["body"].get("search_after").is_none());
        assert_eq!(body["body"]["size"], json!(crate::MAX_PAGE_SIZE));
        assert_eq!(body["body"]["sort"], json!([{ "ordinal": "desc" }]));
    }

    #[test]
    fn test_by_any_field_is_a_should_query() {
        let spec = SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, None).unwrap();
        let body = by_any_field(
            "transactions",
            &[TestField::Ordinal, TestField::ParentOrdinal],
            "x",
            &spec,
            &Namespace::currency("DAG0"),
        )
        .to_json();
        assert_eq!(
            body["body"]["query"],
            json!({ "bool": {
                "should": [
                    { "term": { "data.ordinal": "x" } },
                    { "term": { "data.parent.ordinal": "x" } }
                ],
                "minimum_should_match": 1,
                "must": [{ "term": { "identifier": "DAG0" } }]
            } })
        );
    }

    #[test]
    fn test_nested_query_and_inner_hits() {
        let fragment = nested("info.balances", "address", "DAG1", &["balance"]);
        assert_eq!(fragment.inner_hits.size, INNER_HITS_SIZE);
        assert_eq!(
            fragment.inner_hits.source.includes,
            vec!["info.balances.balance".to_string()]
        );
        assert_eq!(
            fragment.query,
            json!({
                "bool": { "filter": { "term": { "info.balances.address": { "value": "DAG1" } } } }
            })
        );
    }

    #[test]
    fn test_with_nested_ands_into_existing_bool() {
        let spec =
            SortSpec::natural(&[TestField::Ordinal], SearchDirection::Before, Some(1)).unwrap();
        let request = by_field("snapshots", TestField::Ordinal, 5, &spec, &Namespace::Global)
            .with_nested(nested("info.balances", "address", "DAG1", &["balance"]));
        let filters = &request.body.query["bool"]["filter"];
        assert_eq!(filters.as_array().map(Vec::len), Some(1));
        assert_eq!(filters[0]["nested"]["path"], json!("info.balances"));

        let latest = latest("snapshots", TestField::Ordinal, &Namespace::Global)
            .with_nested(nested("info.balances", "address", "DAG1", &["balance"]));
        assert_eq!(latest.body.query["bool"]["filter"][0], json!({ "match_all": {} }));
    }

    #[test]
    fn test_optional_nested_is_a_should_clause() {
        let request = latest("snapshots", TestField::Ordinal, &Namespace::Global)
            .with_optional_nested(nested("info.balances", "address", "DAG1", &["balance"]));
        let query = &request.body.query["bool"];
        assert_eq!(query["filter"], json!([{ "match_all": {} }]));
        assert_eq!(query["should"][0]["nested"]["path"], json!("info.balances"));
    }

    #[test]
    fn test_includes_keep_currency_identifier() {
        let request = latest("snapshots", TestField::Ordinal, &Namespace::currency("DAG0"))
            .with_includes(&["ordinal", "hash"], &Namespace::currency("DAG0"));
        assert_eq!(
            request.to_json()["body"]["_source"],
            json!({ "includes": ["data.ordinal", "data.hash", "identifier"] })
        );
    }
}
