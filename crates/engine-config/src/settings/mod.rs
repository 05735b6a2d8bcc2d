use crate::{defaults, error::ConfigError, settings::validator::SettingsValidator};
use model::{
    documents::{ColumnMapping, DocumentMapping},
    events::progress::ProgressLevel,
};
use serde::Deserialize;
use std::{fs, path::Path};
use tracing::{debug, info};

pub mod context;
pub mod validator;

pub const SOURCE_URL_ENV: &str = "GRID_MIGRATE_SOURCE_URL";
pub const DESTINATION_URL_ENV: &str = "GRID_MIGRATE_DESTINATION_URL";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source: SourceSettings,
    pub destination: DestinationSettings,
    #[serde(default)]
    pub progress: ProgressSettings,
    #[serde(default)]
    pub order_grids: OrderGridSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub driver: String,
    pub url: String,
    /// Schema the legacy grid tables live in.
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DestinationSettings {
    pub driver: String,
    pub url: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressSettings {
    #[serde(default = "default_progress_level")]
    pub level: ProgressLevel,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        ProgressSettings {
            level: default_progress_level(),
        }
    }
}

fn default_progress_level() -> ProgressLevel {
    ProgressLevel::Info
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderGridSettings {
    /// Falls back to the built-in grid list when omitted.
    pub documents: Option<Vec<DocumentSettings>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentSettings {
    pub kind: String,
    pub source: String,
    pub destination: String,
    pub key: Option<Vec<String>>,
    /// Destination column -> source expression, in file order.
    pub columns: toml::Table,
}

impl DocumentSettings {
    pub fn to_mapping(&self) -> Result<DocumentMapping, ConfigError> {
        let columns = self
            .columns
            .iter()
            .map(|(column, value)| {
                value
                    .as_str()
                    .map(|expr| ColumnMapping::new(column.as_str(), expr))
                    .ok_or_else(|| ConfigError::InvalidColumn {
                        document: self.destination.clone(),
                        column: column.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mapping = DocumentMapping::new(
            self.kind.as_str(),
            self.source.as_str(),
            self.destination.as_str(),
            columns,
        );
        Ok(match &self.key {
            Some(key) => mapping.with_key(key.clone()),
            None => mapping,
        })
    }
}

impl Settings {
    /// Reads, overrides from the environment and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut settings = Settings::from_toml(&content)?;
        settings.apply_overrides(|key| std::env::var(key).ok());
        SettingsValidator::new().validate(&settings)?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Replaces connection urls with the values of [`SOURCE_URL_ENV`] and
    /// [`DESTINATION_URL_ENV`] when `lookup` yields them.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(SOURCE_URL_ENV) {
            debug!(env = SOURCE_URL_ENV, "Overriding source url");
            self.source.url = url;
        }
        if let Some(url) = lookup(DESTINATION_URL_ENV) {
            debug!(env = DESTINATION_URL_ENV, "Overriding destination url");
            self.destination.url = url;
        }
    }

    pub fn document_settings(&self) -> Result<Vec<DocumentSettings>, ConfigError> {
        match &self.order_grids.documents {
            Some(documents) => Ok(documents.clone()),
            None => defaults::order_grid_documents(),
        }
    }

    /// Document list in migration order.
    pub fn documents(&self) -> Result<Vec<DocumentMapping>, ConfigError> {
        self.document_settings()?
            .iter()
            .map(DocumentSettings::to_mapping)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
[source]
driver = "mysql"
url = "mysql://root@localhost/magento1"
database = "magento1"

[destination]
driver = "mysql"
url = "mysql://root@localhost/magento2"
prefix = "m2_"

[progress]
level = "debug"

[[order_grids.documents]]
kind = "sales_order_grid"
source = "sales_flat_order_grid"
destination = "sales_order_grid"
[order_grids.documents.columns]
entity_id = "sales_order.entity_id"
status = "sales_order.status"
increment_id = "sales_order.increment_id"
"#;

    #[test]
    fn test_parse_keeps_column_order() {
        let settings = Settings::from_toml(CONFIG).unwrap();
        assert_eq!(settings.progress.level, ProgressLevel::Debug);
        assert_eq!(settings.destination.prefix, "m2_");
        assert_eq!(settings.source.prefix, "");

        let documents = settings.documents().unwrap();
        assert_eq!(documents.len(), 1);
        let columns: Vec<&str> = documents[0].columns.iter().map(|c| c.column.as_str()).collect();
        assert_eq!(columns, vec!["entity_id", "status", "increment_id"]);
    }

    #[test]
    fn test_documents_default_to_builtin_grids() {
        let config = CONFIG.split("[[order_grids.documents]]").next().unwrap();
        let settings = Settings::from_toml(config).unwrap();
        assert_eq!(settings.documents().unwrap().len(), 4);
    }

    #[test]
    fn test_non_string_column_is_rejected() {
        let config = CONFIG.replace(r#"status = "sales_order.status""#, "status = 1");
        let err = Settings::from_toml(&config).unwrap().documents().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColumn { column, .. } if column == "status"));
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::from_toml(CONFIG).unwrap();
        settings.apply_overrides(|key| {
            (key == DESTINATION_URL_ENV).then(|| "mysql://migrator@db/magento2".to_string())
        });

        assert_eq!(settings.source.url, "mysql://root@localhost/magento1");
        assert_eq!(settings.destination.url, "mysql://migrator@db/magento2");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.source.database, "magento1");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/grid-migrate.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
