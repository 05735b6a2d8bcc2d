use connectors::{
    error::AdapterError,
    sql::base::error::{ConnectorError, DbError},
};
use engine_core::error::MappingError;
use thiserror::Error;

/// Errors raised while loading configuration or turning it into a runnable
/// stage.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Structural checks failed; every problem found is listed.
    #[error("Invalid configuration: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("Column `{column}` of document `{document}` must be a string expression")]
    InvalidColumn { document: String, column: String },

    #[error("Unsupported driver: {0}")]
    UnsupportedDriver(String),

    #[error("Source driver `{source_driver}` and destination driver `{destination_driver}` cannot be combined")]
    MixedDrivers {
        source_driver: String,
        destination_driver: String,
    },

    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    #[error("Adapter error: {0}")]
    Adapter(#[from] AdapterError),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}
