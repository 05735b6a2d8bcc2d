use connectors::sql::base::adapter::SqlAdapter;
use model::core::identifiers::DocumentName;
use planner::query::ast::common::TableRef;
use std::sync::Arc;

/// Represents the migration source: the database holding the legacy grid
/// tables, optionally addressed through an explicit schema name so that id
/// selection can run as a cross-database query.
#[derive(Clone)]
pub struct Source {
    adapter: Arc<dyn SqlAdapter>,
    prefix: String,
    schema: Option<String>,
}

impl Source {
    pub fn new(adapter: Arc<dyn SqlAdapter>, prefix: impl Into<String>, schema: Option<String>) -> Self {
        Source {
            adapter,
            prefix: prefix.into(),
            schema: schema.filter(|s| !s.is_empty()),
        }
    }

    pub fn adapter(&self) -> &dyn SqlAdapter {
        self.adapter.as_ref()
    }

    pub fn add_document_prefix(&self, name: &DocumentName) -> String {
        name.prefixed(&self.prefix)
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Fully qualified reference to a source document.
    pub fn table_ref(&self, name: &DocumentName) -> TableRef {
        TableRef::new(self.add_document_prefix(name)).with_schema(self.schema())
    }
}
