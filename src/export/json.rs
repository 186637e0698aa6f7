//! JSON exporter

use super::{DocumentFormat, ExportError, ExportResult, MappingPayload};
use crate::models::MappingDocument;

/// Exporter for pretty-printed JSON mapping documents.
pub struct JsonExporter;

impl JsonExporter {
    pub fn export(document: &MappingDocument) -> Result<ExportResult, ExportError> {
        let content = serde_json::to_string_pretty(&MappingPayload::from(document))
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: DocumentFormat::Json,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassFragment, TypeName};

    #[test]
    fn test_json_round_trips_document() {
        let mut document = MappingDocument::new();
        document
            .classes
            .push(ClassFragment::new(TypeName::new("Order"), "Orders"));

        let result = JsonExporter::export(&document).unwrap();
        let parsed: MappingDocument = serde_json::from_str(&result.content).unwrap();
        assert_eq!(parsed, document);
        assert!(!result.content.contains("identity"));
    }
}
