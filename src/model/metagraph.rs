use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetagraphField {
    #[serde(rename = "identifier")]
    Identifier,
}

impl QueryField for MetagraphField {
    fn path(self) -> &'static str {
        match self {
            MetagraphField::Identifier => "identifier",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metagraph {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_snapshot_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staking_address: Option<String>,
}

impl Document for Metagraph {
    type Field = MetagraphField;

    fn sort_value(&self, field: MetagraphField) -> Option<SortValue> {
        match field {
            MetagraphField::Identifier => Some(self.identifier.as_str().into()),
        }
    }
}
