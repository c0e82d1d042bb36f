use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockField {
    #[serde(rename = "hash")]
    Hash,
}

impl QueryField for BlockField {
    fn path(self) -> &'static str {
        match self {
            BlockField::Hash => "hash",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockReference {
    pub hash: String,
    pub height: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub hash: String,
    pub height: u64,
    #[serde(default)]
    pub transactions: Vec<String>,
    #[serde(default)]
    pub parent: Vec<BlockReference>,
    pub snapshot_hash: String,
    pub snapshot_ordinal: u64,
    pub timestamp: String,
}

impl Document for Block {
    type Field = BlockField;

    fn sort_value(&self, field: BlockField) -> Option<SortValue> {
        match field {
            BlockField::Hash => Some(self.hash.as_str().into()),
        }
    }
}
