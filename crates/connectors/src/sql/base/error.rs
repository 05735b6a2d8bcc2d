use thiserror::Error;

/// All errors coming from the database/query layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// Any SQL driver error.
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    /// A statement could not be assembled from the given AST.
    #[error("Query build error: {0}")]
    QueryBuildError(String),
}

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid connection url: {0}")]
    InvalidUrl(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
