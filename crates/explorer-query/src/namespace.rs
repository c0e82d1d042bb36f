//! # Namespaces
//!
//! Documents of a secondary ("currency") namespace are stored in their own index
//! family, wrapped in a `{identifier, data}` envelope and keyed by `identifier + id`.
//! [`Namespace`] is the explicit flag that tells builders and extractors which
//! layout applies; nothing in this crate infers it from document shape.

use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Namespace {
    #[default]
    Global,
    Currency(String),
}

impl Namespace {
    pub fn currency(identifier: impl Into<String>) -> Self {
        Namespace::Currency(identifier.into())
    }

    /// Builds a namespace from an optional path parameter.
    pub fn from_identifier(identifier: Option<&str>) -> Self {
        identifier.map_or(Namespace::Global, Namespace::currency)
    }

    pub fn identifier(&self) -> Option<&str> {
        match self {
            Namespace::Global => None,
            Namespace::Currency(identifier) => Some(identifier),
        }
    }

    pub fn is_currency(&self) -> bool {
        matches!(self, Namespace::Currency(_))
    }

    /// Rewrites a document path for this namespace (`ordinal` -> `data.ordinal`).
    pub fn field_path(&self, path: &str) -> String {
        match self {
            Namespace::Global => path.to_string(),
            Namespace::Currency(_) => format!("data.{path}"),
        }
    }

    /// Primary key of a document in this namespace.
    pub fn document_id(&self, id: &str) -> String {
        match self {
            Namespace::Global => id.to_string(),
            Namespace::Currency(identifier) => format!("{identifier}{id}"),
        }
    }

    /// `identifier == tenant` filter clause, for currency namespaces only.
    pub fn identifier_clause(&self) -> Option<Value> {
        self.identifier()
            .map(|identifier| json!({ "term": { "identifier": identifier } }))
    }
}
