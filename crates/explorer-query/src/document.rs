//! # Documents
//!
//! A [`Document`] is an entity that can be deserialized from a stored hit and that
//! knows how to read each of its sortable fields. The getter is what the paginator
//! uses to turn the last row of a page into the next cursor.

use crate::error::QueryError;
use crate::sort::{QueryField, SortValue};
use serde::de::DeserializeOwned;

pub trait Document: DeserializeOwned + Send + Sync + 'static {
    /// Queryable fields of this entity.
    type Field: QueryField;

    /// Value of `field` on this document, if it has one.
    fn sort_value(&self, field: Self::Field) -> Option<SortValue>;

    /// Values of `fields` in order. A missing value means the stored document does
    /// not match its schema.
    fn sort_values(
        &self,
        fields: impl IntoIterator<Item = Self::Field>,
    ) -> Result<Vec<SortValue>, QueryError> {
        fields
            .into_iter()
            .map(|field| {
                self.sort_value(field).ok_or_else(|| {
                    QueryError::malformed(format!("document has no value for {}", field.path()))
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::sort::tests::TestField;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    pub(crate) struct Row {
        pub ordinal: i64,
        #[serde(default)]
        pub parent: Option<i64>,
    }

    impl Document for Row {
        type Field = TestField;

        fn sort_value(&self, field: TestField) -> Option<SortValue> {
            match field {
                TestField::Ordinal => Some(self.ordinal.into()),
                TestField::ParentOrdinal => self.parent.map(SortValue::from),
            }
        }
    }

    #[test]
    fn test_sort_values_in_field_order() {
        let row = Row {
            ordinal: 4,
            parent: Some(1),
        };
        let values = row
            .sort_values([TestField::ParentOrdinal, TestField::Ordinal])
            .unwrap();
        assert_eq!(values, vec![SortValue::Integer(1), SortValue::Integer(4)]);
    }

    #[test]
    fn test_missing_sort_value_is_server_error() {
        let row = Row {
            ordinal: 4,
            parent: None,
        };
        let err = row
            .sort_values([TestField::Ordinal, TestField::ParentOrdinal])
            .unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ServerError);
    }
}
