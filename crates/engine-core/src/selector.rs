use crate::{connectors::source::Source, error::SelectorError};
use model::{core::identifiers::DocumentName, documents::DEFAULT_KEY_COLUMN};
use planner::query::{ast::select::Select, builder::select::SelectBuilder, ident};
use tracing::debug;

/// Server-side set of entity ids still to migrate. Never materialized: the
/// wrapped query is embedded as an `IN (...)` sub-query of the projection.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingIds(Select);

impl PendingIds {
    pub fn query(&self) -> &Select {
        &self.0
    }

    pub fn into_query(self) -> Select {
        self.0
    }
}

pub struct IdentifierSelector<'a> {
    source: &'a Source,
}

impl<'a> IdentifierSelector<'a> {
    pub fn new(source: &'a Source) -> Self {
        IdentifierSelector { source }
    }

    /// Ids of `source_document`, scoped to the source schema.
    ///
    /// Fails with [`SelectorError::DocumentNotFound`] when the document does
    /// not exist in the source database.
    pub async fn pending_ids(&self, source_document: &DocumentName) -> Result<PendingIds, SelectorError> {
        let table = self.source.table_ref(source_document);
        let exists = self
            .source
            .adapter()
            .table_exists(table.schema.as_deref(), &table.name)
            .await?;
        if !exists {
            return Err(SelectorError::DocumentNotFound(table.name));
        }

        debug!(document = %table.name, schema = ?table.schema, "Selecting pending ids");
        let query = SelectBuilder::new()
            .select(vec![ident(DEFAULT_KEY_COLUMN)])
            .from(table, None)
            .build();
        Ok(PendingIds(query))
    }
}
