use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{StepCatalog, StepDefinition};
use tracing::info;

use crate::repository::{CatalogSource, ContentError};

/// Parse a JSON array of step definitions and validate it as a catalog.
///
/// # Errors
///
/// Returns `ContentError::Serialization` for malformed JSON and
/// `ContentError::Catalog` for invariant violations.
pub fn parse_catalog(raw: &str) -> Result<StepCatalog, ContentError> {
    let steps: Vec<StepDefinition> =
        serde_json::from_str(raw).map_err(|e| ContentError::Serialization(e.to_string()))?;
    Ok(StepCatalog::new(steps)?)
}

/// Render a catalog back into the JSON wire format.
///
/// # Errors
///
/// Returns `ContentError::Serialization` if serialization fails.
pub fn to_json_pretty(catalog: &StepCatalog) -> Result<String, ContentError> {
    serde_json::to_string_pretty(catalog.steps())
        .map_err(|e| ContentError::Serialization(e.to_string()))
}

/// Catalog stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load_catalog(&self) -> Result<StepCatalog, ContentError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ContentError::NotFound(self.path.clone()),
                _ => ContentError::Io(e.to_string()),
            })?;
        let catalog = parse_catalog(&raw)?;
        info!(path = %self.path.display(), steps = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
