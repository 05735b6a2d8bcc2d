use connectors::sql::base::error::DbError;
use model::events::progress::ProgressLevel;
use thiserror::Error;

/// The document list cannot be turned into an unambiguous
/// destination -> source mapping.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MappingError {
    #[error("Destination document `{0}` is mapped more than once")]
    DuplicateDestination(String),

    #[error("Source document `{source_document}` feeds both `{first}` and `{second}`")]
    AmbiguousSource {
        source_document: String,
        first: String,
        second: String,
    },

    #[error("No source document is mapped to destination `{0}`")]
    MissingSource(String),

    #[error("Destination document `{0}` has no columns")]
    EmptyColumns(String),

    #[error("Destination document `{document}` does not project key column `{column}`")]
    MissingKeyColumn { document: String, column: String },
}

#[derive(Error, Debug)]
pub enum SelectorError {
    #[error("Source document `{0}` does not exist")]
    DocumentNotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("No projection is registered for document type `{0}`")]
    UnknownDocumentType(String),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProgressError {
    #[error("No progress span is open")]
    NotStarted,

    #[error("Progress span mismatch: innermost span is {expected}, got {found}")]
    Unbalanced {
        expected: ProgressLevel,
        found: ProgressLevel,
    },
}

/// Errors that abort a stage run.
#[derive(Error, Debug)]
pub enum StageError {
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Selector error: {0}")]
    Selector(#[from] SelectorError),

    #[error("Projection error: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Progress error: {0}")]
    Progress(#[from] ProgressError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
