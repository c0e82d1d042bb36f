use super::{TransactionField, TransactionReference};
use explorer_query::{Document, SortValue};
use serde::{Deserialize, Serialize};

/// Fee paid for a metagraph data update. Only exists in currency namespaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeTransaction {
    pub hash: String,
    pub source: String,
    pub destination: String,
    pub amount: u64,
    pub parent: TransactionReference,
    pub snapshot_hash: String,
    pub snapshot_ordinal: u64,
    pub timestamp: String,
}

impl Document for FeeTransaction {
    type Field = TransactionField;

    fn sort_value(&self, field: TransactionField) -> Option<SortValue> {
        Some(match field {
            TransactionField::Hash => self.hash.as_str().into(),
            TransactionField::Source => self.source.as_str().into(),
            TransactionField::Destination => self.destination.as_str().into(),
            TransactionField::SnapshotOrdinal => self.snapshot_ordinal.into(),
            TransactionField::ParentOrdinal => self.parent.ordinal.into(),
        })
    }
}
