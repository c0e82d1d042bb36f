//! # Result Extraction
//!
//! Converts raw hits into typed entities. A get-by-id response and a size-1 search
//! response are both normalized into a list of [`RawHit`] first, so the functions
//! here never care which backend call produced them.
//!
//! Empty input is only an error for [`extract_one`]. Whether an empty page is a
//! `NotFound` is decided by the caller.

use crate::error::QueryError;
use crate::namespace::Namespace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: HitList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitList {
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

/// One stored document as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_hits: Option<HashMap<String, InnerHits>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InnerHits {
    #[serde(default)]
    pub hits: HitList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl RawHit {
    pub fn new(id: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            source,
            ..Default::default()
        }
    }
}

impl SearchResponse {
    pub fn from_hits(hits: Vec<RawHit>) -> Self {
        Self {
            hits: HitList { hits },
        }
    }

    pub fn into_hits(self) -> Vec<RawHit> {
        self.hits.hits
    }
}

impl GetResponse {
    pub fn found(id: impl Into<String>, source: Value) -> Self {
        Self {
            found: true,
            id: id.into(),
            source: Some(source),
        }
    }

    pub fn missing(id: impl Into<String>) -> Self {
        Self {
            found: false,
            id: id.into(),
            source: None,
        }
    }

    /// Zero or one hits, matching the shape of a search response.
    pub fn into_hits(self) -> Vec<RawHit> {
        match (self.found, self.source) {
            (true, Some(source)) => vec![RawHit::new(self.id, source)],
            _ => Vec::new(),
        }
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// Single-entity result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl<T> ItemResult<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ItemResult<U> {
        ItemResult {
            data: f(self.data),
            meta: self.meta,
        }
    }
}

/// A parent document paired with the nested sub-documents that matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedResult<O, I> {
    pub outer: O,
    pub inner: Vec<I>,
}

/// Stored shape of a document that belongs to a currency namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyEnvelope<T> {
    pub identifier: String,
    pub data: T,
}

impl<T: Serialize> CurrencyEnvelope<T> {
    pub fn new(identifier: impl Into<String>, data: T) -> Self {
        Self {
            identifier: identifier.into(),
            data,
        }
    }

    pub fn to_document(&self) -> Result<Value, QueryError> {
        serde_json::to_value(self).map_err(QueryError::malformed)
    }
}

// =============================================================================
// EXTRACTION
// =============================================================================

/// Strips the `{identifier, data}` envelope when `ns` is a currency namespace.
/// Anything else is returned unchanged.
pub fn unwrap_envelope(doc: Value, ns: &Namespace) -> Value {
    if !ns.is_currency() {
        return doc;
    }
    match doc {
        Value::Object(mut map) if map.contains_key("identifier") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn decode<T: DeserializeOwned>(source: Value, ns: &Namespace) -> Result<T, QueryError> {
    serde_json::from_value(unwrap_envelope(source, ns)).map_err(QueryError::malformed)
}

pub fn extract_one<T: DeserializeOwned>(
    hits: Vec<RawHit>,
    ns: &Namespace,
) -> Result<ItemResult<T>, QueryError> {
    let hit = hits
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::NotFound("no matching document".into()))?;
    Ok(ItemResult::new(decode(hit.source, ns)?))
}

pub fn extract_all<T: DeserializeOwned>(
    hits: Vec<RawHit>,
    ns: &Namespace,
) -> Result<Vec<T>, QueryError> {
    hits.into_iter().map(|hit| decode(hit.source, ns)).collect()
}

/// Parent documents only; any inner hits are ignored.
pub fn extract_outer<T: DeserializeOwned>(
    hits: Vec<RawHit>,
    ns: &Namespace,
) -> Result<Vec<T>, QueryError> {
    extract_all(hits, ns)
}

/// Pairs every hit with its `inner_hits[path]` sub-documents.
///
/// Inner documents are nested objects, never envelopes, so they are decoded as-is.
pub fn extract_inner<O: DeserializeOwned, I: DeserializeOwned>(
    path: &str,
    hits: Vec<RawHit>,
    ns: &Namespace,
) -> Result<Vec<ExtractedResult<O, I>>, QueryError> {
    hits.into_iter()
        .map(|mut hit| {
            let inner_hits = hit
                .inner_hits
                .as_mut()
                .and_then(|inner| inner.remove(path))
                .ok_or_else(|| {
                    QueryError::malformed(format!("inner hits for {path} missing from {}", hit.id))
                })?;
            let inner = extract_all(inner_hits.hits.hits, &Namespace::Global)?;
            Ok(ExtractedResult {
                outer: decode(hit.source, ns)?,
                inner,
            })
        })
        .collect()
}
