use connectors::sql::base::error::DbError;
use engine_config::error::ConfigError;
use engine_core::error::{MappingError, StageError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Document mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Migration failed: {0}")]
    Stage(#[from] StageError),

    #[error("Stage `{0}` did not complete")]
    Incomplete(String),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
