//! Build errors

use super::config::ConfigError;
use crate::conventions::{PipelineError, RegistryError};
use crate::discovery::DiscoveryError;
use crate::engine::EngineError;
use crate::export::ExportError;
use crate::validation::ColumnValidationResult;

/// Error returned by [`SchemaBuilder`](super::SchemaBuilder)
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Convention ordering error: {0}")]
    Registry(#[from] RegistryError),
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("Finishing transform failed: {0}")]
    Transform(#[source] anyhow::Error),
    #[error("Duplicate column mappings: {0}")]
    DuplicateColumns(ColumnValidationResult),
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
