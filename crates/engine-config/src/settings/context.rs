//! Turns validated settings into connected resources and a runnable stage.

use crate::{error::ConfigError, settings::Settings};
use connectors::{
    adapter::Adapter,
    sql::{
        base::adapter::{DatabaseKind, SqlAdapter},
        sqlite::adapter::{SqliteAdapter, sqlite_path},
    },
};
use engine_core::{
    connectors::{destination::Destination, source::Source},
    mapper::DocumentMap,
    progress::{ProgressReporter, ProgressSink},
    stage::MigrationStage,
};
use std::sync::Arc;
use tracing::info;

fn driver(name: &str) -> Result<DatabaseKind, ConfigError> {
    name.parse::<DatabaseKind>()
        .map_err(ConfigError::UnsupportedDriver)
}

/// Connects both sides of the migration.
///
/// MySQL opens one pool per side and relies on both schemas living on the
/// destination server. SQLite opens the destination file and attaches the
/// source file under `source.database`, sharing one connection between both
/// sides.
pub async fn connect(settings: &Settings) -> Result<(Source, Destination), ConfigError> {
    let source_kind = driver(&settings.source.driver)?;
    let destination_kind = driver(&settings.destination.driver)?;
    let schema = Some(settings.source.database.clone());

    match (source_kind, destination_kind) {
        (DatabaseKind::MySql, DatabaseKind::MySql) => {
            let source = Adapter::sql(source_kind, &settings.source.url).await?;
            let destination = Adapter::sql(destination_kind, &settings.destination.url).await?;
            info!(kind = %source.kind(), "Connected source and destination");
            Ok((
                Source::new(source.into_shared(), &settings.source.prefix, schema),
                Destination::new(destination.into_shared(), &settings.destination.prefix),
            ))
        }
        (DatabaseKind::Sqlite, DatabaseKind::Sqlite) => {
            let adapter = SqliteAdapter::connect(&settings.destination.url).await?;
            adapter
                .attach(sqlite_path(&settings.source.url), &settings.source.database)
                .await?;
            let shared: Arc<dyn SqlAdapter> = Arc::new(adapter);
            info!(kind = %DatabaseKind::Sqlite, "Connected source and destination");
            Ok((
                Source::new(shared.clone(), &settings.source.prefix, schema),
                Destination::new(shared, &settings.destination.prefix),
            ))
        }
        (source, destination) => Err(ConfigError::MixedDrivers {
            source_driver: source.to_string(),
            destination_driver: destination.to_string(),
        }),
    }
}

/// Validates the document list, connects and assembles the order grid stage.
pub async fn build_stage(
    settings: &Settings,
    sink: Arc<dyn ProgressSink>,
) -> Result<MigrationStage, ConfigError> {
    let map = DocumentMap::new(settings.documents()?)?;
    let (source, destination) = connect(settings).await?;
    Ok(MigrationStage::new(
        map,
        source,
        destination,
        ProgressReporter::new(sink),
    ))
}
