use super::{Snapshot, SnapshotField};
use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencySnapshotField {
    #[serde(rename = "hash")]
    Hash,
    #[serde(rename = "ordinal")]
    Ordinal,
    #[serde(rename = "ownerAddress")]
    OwnerAddress,
}

impl QueryField for CurrencySnapshotField {
    fn path(self) -> &'static str {
        match self {
            CurrencySnapshotField::Hash => "hash",
            CurrencySnapshotField::Ordinal => "ordinal",
            CurrencySnapshotField::OwnerAddress => "ownerAddress",
        }
    }
}

/// A metagraph snapshot: a global snapshot plus fee and ownership data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencySnapshot {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staking_address: Option<String>,
    #[serde(default, rename = "sizeInKB", skip_serializing_if = "Option::is_none")]
    pub size_in_kb: Option<u64>,
}

impl CurrencySnapshot {
    /// Stored fields returned for a currency snapshot.
    pub const FIELDS: [&'static str; 11] = [
        "hash",
        "ordinal",
        "height",
        "subHeight",
        "lastSnapshotHash",
        "timestamp",
        "blocks",
        "fee",
        "ownerAddress",
        "stakingAddress",
        "sizeInKB",
    ];
}

impl Document for CurrencySnapshot {
    type Field = CurrencySnapshotField;

    fn sort_value(&self, field: CurrencySnapshotField) -> Option<SortValue> {
        match field {
            CurrencySnapshotField::Hash => self.snapshot.sort_value(SnapshotField::Hash),
            CurrencySnapshotField::Ordinal => self.snapshot.sort_value(SnapshotField::Ordinal),
            CurrencySnapshotField::OwnerAddress => {
                self.owner_address.as_deref().map(SortValue::from)
            }
        }
    }
}
