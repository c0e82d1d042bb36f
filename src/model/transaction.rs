use explorer_query::{Document, QueryField, SortValue};
use serde::{Deserialize, Serialize};

/// Queryable fields shared by transactions and fee transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionField {
    #[serde(rename = "hash")]
    Hash,
    #[serde(rename = "source")]
    Source,
    #[serde(rename = "destination")]
    Destination,
    #[serde(rename = "snapshotOrdinal")]
    SnapshotOrdinal,
    #[serde(rename = "parent.ordinal")]
    ParentOrdinal,
}

impl TransactionField {
    /// Natural order of every transaction listing. Trailing fields break ties
    /// between transactions of the same snapshot.
    pub const NATURAL: [TransactionField; 3] = [
        TransactionField::SnapshotOrdinal,
        TransactionField::Source,
        TransactionField::ParentOrdinal,
    ];
}

impl QueryField for TransactionField {
    fn path(self) -> &'static str {
        match self {
            TransactionField::Hash => "hash",
            TransactionField::Source => "source",
            TransactionField::Destination => "destination",
            TransactionField::SnapshotOrdinal => "snapshotOrdinal",
            TransactionField::ParentOrdinal => "parent.ordinal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReference {
    pub hash: String,
    pub ordinal: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub hash: String,
    pub source: String,
    pub destination: String,
    pub amount: u64,
    pub fee: u64,
    pub parent: TransactionReference,
    pub block_hash: String,
    pub snapshot_hash: String,
    pub snapshot_ordinal: u64,
    pub timestamp: String,
}

impl Document for Transaction {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_fields_are_the_queried_ones() {
        let natural: Vec<&str> = TransactionField::NATURAL.iter().map(|f| f.path()).collect();
        assert_eq!(natural, vec!["snapshotOrdinal", "source", "parent.ordinal"]);

        let parsed: TransactionField = serde_json::from_str(r#""parent.ordinal""#).unwrap();
        assert_eq!(parsed, TransactionField::ParentOrdinal);
        assert!(serde_json::from_str::<TransactionField>(r#""snapshotHash""#).is_err());
    }

    #[test]
    fn test_sort_values_follow_the_document() {
        let tx = Transaction {
            hash: "tx-1".into(),
            source: "DAG-alice".into(),
            destination: "DAG-bob".into(),
            amount: 5,
            fee: 0,
            parent: TransactionReference {
                hash: "tx-0".into(),
                ordinal: 3,
            },
            block_hash: "block-1".into(),
            snapshot_hash: "snapshot-1".into(),
            snapshot_ordinal: 1,
            timestamp: "2024-01-01T00:00:00Z".into(),
        };
        assert_eq!(
            tx.sort_values(TransactionField::NATURAL).unwrap(),
            vec![
                SortValue::Integer(1),
                SortValue::from("DAG-alice"),
                SortValue::Integer(3),
            ]
        );
    }
}
