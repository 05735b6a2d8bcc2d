use connectors::sql::base::{adapter::SqlAdapter, error::DbError};
use model::core::identifiers::DocumentName;
use planner::query::ast::common::TableRef;
use std::sync::Arc;
use tracing::info;

/// The database receiving the grid documents. Projections read the already
/// migrated order tables of this same database.
#[derive(Clone)]
pub struct Destination {
    adapter: Arc<dyn SqlAdapter>,
    prefix: String,
}

impl Destination {
    pub fn new(adapter: Arc<dyn SqlAdapter>, prefix: impl Into<String>) -> Self {
        Destination {
            adapter,
            prefix: prefix.into(),
        }
    }

    pub fn adapter(&self) -> &dyn SqlAdapter {
        self.adapter.as_ref()
    }

    pub fn add_document_prefix(&self, name: &DocumentName) -> String {
        name.prefixed(&self.prefix)
    }

    pub fn table_ref(&self, name: &DocumentName) -> TableRef {
        TableRef::new(self.add_document_prefix(name))
    }

    /// Empties a destination document before it is repopulated.
    pub async fn clear_document(&self, name: &DocumentName) -> Result<(), DbError> {
        let table = self.table_ref(name);
        info!(document = %table.name, "Clearing destination document");
        self.adapter.truncate_table(&table).await
    }
}
