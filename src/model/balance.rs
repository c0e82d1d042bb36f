use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceField {
    #[serde(rename = "address")]
    Address,
    #[serde(rename = "snapshotOrdinal")]
    SnapshotOrdinal,
}

impl QueryField for BalanceField {
    fn path(self) -> &'static str {
        match self {
            BalanceField::Address => "address",
            BalanceField::SnapshotOrdinal => "snapshotOrdinal",
        }
    }
}

/// Balance of an address as stored, one record per snapshot that changed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceRecord {
    pub address: String,
    pub balance: u64,
    pub snapshot_ordinal: u64,
    #[serde(default)]
    pub snapshot_hash: String,
    #[serde(default)]
    pub timestamp: String,
}

impl Document for BalanceRecord {
    type Field = BalanceField;

    fn sort_value(&self, field: BalanceField) -> Option<SortValue> {
        match field {
            BalanceField::Address => Some(self.address.as_str().into()),
            BalanceField::SnapshotOrdinal => Some(self.snapshot_ordinal.into()),
        }
    }
}

/// Balance of an address as of a snapshot ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: String,
    pub balance: u64,
    pub ordinal: u64,
}

impl From<BalanceRecord> for Balance {
    fn from(record: BalanceRecord) -> Self {
        Self {
            address: record.address,
            balance: record.balance,
            ordinal: record.snapshot_ordinal,
        }
    }
}

/// One entry of a snapshot's nested `info.balances` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct BalanceValue {
    pub balance: u64,
}
