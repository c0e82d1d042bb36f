use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotField {
    #[serde(rename = "hash")]
    Hash,
    #[serde(rename = "ordinal")]
    Ordinal,
}

impl QueryField for SnapshotField {
    fn path(self) -> &'static str {
        match self {
            SnapshotField::Hash => "hash",
            SnapshotField::Ordinal => "ordinal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub hash: String,
    pub ordinal: u64,
    pub height: u64,
    pub sub_height: u64,
    pub last_snapshot_hash: String,
    pub timestamp: String,
    #[serde(default)]
    pub blocks: Vec<String>,
}

impl Snapshot {
    /// Stored fields returned for a snapshot; rewards are served separately.
    pub const FIELDS: [&'static str; 7] = [
        "hash",
        "ordinal",
        "height",
        "subHeight",
        "lastSnapshotHash",
        "timestamp",
        "blocks",
    ];
}

impl Document for Snapshot {
    type Field = SnapshotField;

    fn sort_value(&self, field: SnapshotField) -> Option<SortValue> {
        match field {
            SnapshotField::Hash => Some(self.hash.as_str().into()),
            SnapshotField::Ordinal => Some(self.ordinal.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardTransaction {
    pub destination: String,
    pub amount: u64,
}

/// Projection of a snapshot document onto its rewards.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct SnapshotRewards {
    #[serde(default)]
    pub rewards: Vec<RewardTransaction>,
}

/// Projection of a snapshot document onto its ordinal.
#[derive(Debug, Clone, Copy, Deserialize)]
pub(crate) struct SnapshotOrdinal {
    pub ordinal: u64,
}
