//! Destination document -> source document lookup, validated once at startup.

use crate::error::MappingError;
use model::{core::identifiers::DocumentName, documents::DocumentMapping};
use std::collections::HashMap;

/// Ordered list of destination documents together with the inverse
/// destination -> source table.
///
/// Construction rejects any list in which a destination or a source document
/// appears twice, so every destination has exactly one id source per pass.
#[derive(Debug, Clone)]
pub struct DocumentMap {
    documents: Vec<DocumentMapping>,
    sources: HashMap<DocumentName, DocumentName>,
}

impl DocumentMap {
    pub fn new(documents: Vec<DocumentMapping>) -> Result<Self, MappingError> {
        let mut sources = HashMap::with_capacity(documents.len());
        let mut destinations_by_source: HashMap<&DocumentName, &DocumentName> = HashMap::new();

        for doc in &documents {
            if doc.columns.is_empty() {
                return Err(MappingError::EmptyColumns(doc.destination.to_string()));
            }

            for key in &doc.key {
                if !doc.columns.iter().any(|c| &c.column == key) {
                    return Err(MappingError::MissingKeyColumn {
                        document: doc.destination.to_string(),
                        column: key.clone(),
                    });
                }
            }

            if sources.contains_key(&doc.destination) {
                return Err(MappingError::DuplicateDestination(
                    doc.destination.to_string(),
                ));
            }

            if let Some(first) = destinations_by_source.insert(&doc.source, &doc.destination) {
                return Err(MappingError::AmbiguousSource {
                    source_document: doc.source.to_string(),
                    first: first.to_string(),
                    second: doc.destination.to_string(),
                });
            }

            sources.insert(doc.destination.clone(), doc.source.clone());
        }

        Ok(DocumentMap { documents, sources })
    }

    /// Destination documents in migration order.
    pub fn documents(&self) -> &[DocumentMapping] {
        &self.documents
    }

    pub fn source_document(&self, destination: &DocumentName) -> Result<&DocumentName, MappingError> {
        self.sources
            .get(destination)
            .ok_or_else(|| MappingError::MissingSource(destination.to_string()))
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
