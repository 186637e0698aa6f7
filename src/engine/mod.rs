//! Mapping engine hand-off
//!
//! The persistence engine is an external collaborator: it receives the rendered mapping
//! document plus any auxiliary database objects and turns them into its own runtime
//! configuration. [`InMemoryEngine`] is a recording implementation used by hosts that
//! only need the rendered output, and by tests.

use crate::export::{DocumentFormat, ExportResult};
use crate::models::AuxiliaryObject;
use serde::{Deserialize, Serialize};

/// Error reported by a mapping engine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Engine rejected mapping: {0}")]
    Rejected(String),
    #[error("Engine has no mappings to finish")]
    NoMappings,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Consumer of finished mapping documents
pub trait MappingEngine {
    /// What the engine produces once every input has been handed over
    type Handle;

    fn add_mapping(&mut self, mapping: &ExportResult) -> Result<(), EngineError>;

    fn add_auxiliary_object(&mut self, object: &AuxiliaryObject) -> Result<(), EngineError>;

    fn finish(self) -> Result<Self::Handle, EngineError>;
}

/// Snapshot of everything an [`InMemoryEngine`] received
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfiguration {
    pub mappings: Vec<RenderedMapping>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auxiliary_objects: Vec<AuxiliaryObject>,
}

impl EngineConfiguration {
    /// Rendered mapping of the given format, if one was added
    pub fn mapping(&self, format: DocumentFormat) -> Option<&str> {
        self.mappings
            .iter()
            .find(|m| m.format == format)
            .map(|m| m.content.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMapping {
    pub format: DocumentFormat,
    pub content: String,
}

/// Engine that records its inputs
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    configuration: EngineConfiguration,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configuration(&self) -> &EngineConfiguration {
        &self.configuration
    }
}

impl MappingEngine for InMemoryEngine {
    type Handle = EngineConfiguration;

    fn add_mapping(&mut self, mapping: &ExportResult) -> Result<(), EngineError> {
        if mapping.content.trim().is_empty() {
            return Err(EngineError::Rejected("mapping is empty".to_string()));
        }
        self.configuration.mappings.push(RenderedMapping {
            format: mapping.format,
            content: mapping.content.clone(),
        });
        Ok(())
    }

    fn add_auxiliary_object(&mut self, object: &AuxiliaryObject) -> Result<(), EngineError> {
        self.configuration.auxiliary_objects.push(object.clone());
        Ok(())
    }

    fn finish(self) -> Result<EngineConfiguration, EngineError> {
        if self.configuration.mappings.is_empty() {
            return Err(EngineError::NoMappings);
        }
        Ok(self.configuration)
    }
}
