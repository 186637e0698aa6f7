//! YAML exporter

use super::{DocumentFormat, ExportError, ExportResult, MappingPayload};
use crate::models::MappingDocument;

/// Exporter for YAML mapping documents.
pub struct YamlExporter;

impl YamlExporter {
    pub fn export(document: &MappingDocument) -> Result<ExportResult, ExportError> {
        let content = serde_yaml::to_string(&MappingPayload::from(document))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: DocumentFormat::Yaml,
        })
    }
}
