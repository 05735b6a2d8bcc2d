//! Configuration-time description of how a destination document is produced.

use crate::core::identifiers::DocumentName;
use serde::{Deserialize, Serialize};

/// Key column used when a mapping does not name one explicitly.
pub const DEFAULT_KEY_COLUMN: &str = "entity_id";

/// One destination column and the source-side SQL expression that computes it.
///
/// The expression is emitted verbatim into the projection, so it may be a plain
/// column reference (`sales_order.status`) or any computed value the
/// destination engine understands (`CONCAT(...)`, `IFNULL(...)`, `CASE ...`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub column: String,
    pub expression: String,
}

impl ColumnMapping {
    pub fn new(column: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expression: expression.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMapping {
    /// Builder key selecting the join plan for the destination document.
    pub kind: String,
    pub source: DocumentName,
    pub destination: DocumentName,
    /// Conflict target of the upsert.
    pub key: Vec<String>,
    /// Ordered; insert column list and select list are derived from it.
    pub columns: Vec<ColumnMapping>,
}

impl DocumentMapping {
    pub fn new(
        kind: impl Into<String>,
        source: impl Into<DocumentName>,
        destination: impl Into<DocumentName>,
        columns: Vec<ColumnMapping>,
    ) -> Self {
        Self {
            kind: kind.into(),
            source: source.into(),
            destination: destination.into(),
            key: vec![DEFAULT_KEY_COLUMN.to_string()],
            columns,
        }
    }

    pub fn with_key(mut self, key: Vec<String>) -> Self {
        self.key = key;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_key_to_entity_id() {
        let mapping = DocumentMapping::new(
            "sales_order_grid",
            "sales_flat_order_grid",
            "sales_order_grid",
            vec![
                ColumnMapping::new("entity_id", "sales_order.entity_id"),
                ColumnMapping::new("status", "sales_order.status"),
            ],
        );

        assert_eq!(mapping.key, vec!["entity_id".to_string()]);
        assert_eq!(mapping.columns[1].expression, "sales_order.status");
    }
}
