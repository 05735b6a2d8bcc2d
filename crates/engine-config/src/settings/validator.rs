use crate::{
    error::ConfigError,
    settings::{DocumentSettings, Settings},
};
use connectors::sql::base::adapter::DatabaseKind;
use tracing::{info, warn};

/// Structural checks run on every loaded configuration. Nothing here touches
/// a database.
#[derive(Debug, Default)]
pub struct SettingsValidator;

impl SettingsValidator {
    pub fn new() -> Self {
        SettingsValidator
    }

    pub fn validate(&self, settings: &Settings) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        self.validate_connections(settings, &mut errors);
        match settings.document_settings() {
            Ok(documents) => self.validate_documents(&documents, &mut errors),
            Err(err) => errors.push(err.to_string()),
        }

        if !errors.is_empty() {
            for error in &errors {
                warn!("{error}");
            }
            return Err(ConfigError::ValidationFailed(errors));
        }

        info!("Settings validation completed successfully");
        Ok(())
    }

    fn validate_connections(&self, settings: &Settings, errors: &mut Vec<String>) {
        if settings.source.url.trim().is_empty() {
            errors.push("source.url must not be empty".to_string());
        }
        if settings.destination.url.trim().is_empty() {
            errors.push("destination.url must not be empty".to_string());
        }
        if settings.source.database.trim().is_empty() {
            errors.push("source.database must name the source schema".to_string());
        }

        for (section, driver) in [
            ("source", &settings.source.driver),
            ("destination", &settings.destination.driver),
        ] {
            if driver.parse::<DatabaseKind>().is_err() {
                errors.push(format!(
                    "{section}.driver `{driver}` is not supported (expected mysql or sqlite)"
                ));
            }
        }
    }

    fn validate_documents(&self, documents: &[DocumentSettings], errors: &mut Vec<String>) {
        for (i, doc) in documents.iter().enumerate() {
            let label = if doc.destination.is_empty() {
                format!("order_grids.documents[{i}]")
            } else {
                doc.destination.clone()
            };

            if doc.kind.trim().is_empty() {
                errors.push(format!("{label}: kind must not be empty"));
            }
            if doc.source.trim().is_empty() {
                errors.push(format!("{label}: source must not be empty"));
            }
            if doc.destination.trim().is_empty() {
                errors.push(format!("{label}: destination must not be empty"));
            }
            if doc.columns.is_empty() {
                errors.push(format!("{label}: at least one column is required"));
            }
            if doc.key.as_ref().is_some_and(|key| key.is_empty()) {
                errors.push(format!("{label}: key must name at least one column"));
            }
        }
    }
}
