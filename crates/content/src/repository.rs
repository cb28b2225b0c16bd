use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{CatalogError, StepCatalog};
use thiserror::Error;

use crate::builtin::BuiltinCatalog;
use crate::json::JsonFileCatalog;

/// Errors surfaced by catalog sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("catalog not found: {0}")]
    NotFound(PathBuf),

    #[error("io error: {0}")]
    Io(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Model(#[from] quiz_core::Error),
}

/// Anything that can hand the session a validated step catalog.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load and validate the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the catalog cannot be read or violates the
    /// catalog invariants.
    async fn load_catalog(&self) -> Result<StepCatalog, ContentError>;

    /// Short human-readable description, used in logs.
    fn describe(&self) -> String;
}

/// Holds an already-built catalog; handy for tests and previews.
#[derive(Clone)]
pub struct InMemoryCatalogSource {
    catalog: StepCatalog,
}

impl InMemoryCatalogSource {
    #[must_use]
    pub fn new(catalog: StepCatalog) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalogSource {
    async fn load_catalog(&self) -> Result<StepCatalog, ContentError> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        "in-memory catalog".to_string()
    }
}

/// Pick a source: the JSON file at `path` when given, the built-in funnel otherwise.
#[must_use]
pub fn source_for(path: Option<PathBuf>) -> Arc<dyn CatalogSource> {
    match path {
        Some(path) => Arc::new(JsonFileCatalog::new(path)),
        None => Arc::new(BuiltinCatalog),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{StepDefinition, StepId, StepKind};

    fn catalog(kinds: &[StepKind]) -> StepCatalog {
        let steps = kinds
            .iter()
            .zip(1..)
            .map(|(kind, id)| StepDefinition::new(StepId::new(id), *kind))
            .collect();
        StepCatalog::new(steps).unwrap()
    }

    #[tokio::test]
    async fn in_memory_source_returns_catalog() {
        let source = InMemoryCatalogSource::new(catalog(&[StepKind::Intro, StepKind::PreRevelation]));
        let loaded = source.load_catalog().await.unwrap();
        assert_eq!(loaded.len(), 2);
    }

    #[tokio::test]
    async fn source_for_defaults_to_builtin() {
        let source = source_for(None);
        assert_eq!(source.describe(), "built-in funnel");
        assert_eq!(source.load_catalog().await.unwrap().len(), 13);
    }
}
