//! Export functionality
//!
//! Renders a finished [`MappingDocument`] into the form handed to the mapping engine:
//! - XML (the native mapping format)
//! - JSON
//! - YAML
//!
//! Rendering is a pure function of the document, so the same document always renders
//! to byte-identical output. Only the class mappings are rendered: auxiliary objects reach
//! the engine through [`MappingEngine::add_auxiliary_object`](crate::engine::MappingEngine)
//! and nowhere else.

pub mod json;
pub mod xml;
pub mod yaml;

use crate::models::{ClassFragment, MappingDocument};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use json::JsonExporter;
pub use xml::XmlExporter;
pub use yaml::YamlExporter;

/// Output format of a rendered mapping document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    #[default]
    Xml,
    Json,
    Yaml,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Xml => "xml",
            DocumentFormat::Json => "json",
            DocumentFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xml" => Ok(DocumentFormat::Xml),
            "json" => Ok(DocumentFormat::Json),
            "yaml" | "yml" => Ok(DocumentFormat::Yaml),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Rendered document
    pub content: String,
    pub format: DocumentFormat,
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),
}

/// Serialized shape of a rendered mapping
#[derive(Serialize)]
pub(crate) struct MappingPayload<'a> {
    classes: &'a [ClassFragment],
}

impl<'a> From<&'a MappingDocument> for MappingPayload<'a> {
    fn from(document: &'a MappingDocument) -> Self {
        Self {
            classes: &document.classes,
        }
    }
}

/// Render a document in the given format
pub fn render(
    document: &MappingDocument,
    format: DocumentFormat,
) -> Result<ExportResult, ExportError> {
    match format {
        DocumentFormat::Xml => XmlExporter::export(document),
        DocumentFormat::Json => JsonExporter::export(document),
        DocumentFormat::Yaml => YamlExporter::export(document),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("XML".parse::<DocumentFormat>().unwrap(), DocumentFormat::Xml);
        assert_eq!("yml".parse::<DocumentFormat>().unwrap(), DocumentFormat::Yaml);
        assert!(matches!(
            "hbm".parse::<DocumentFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
        assert_eq!(DocumentFormat::default().to_string(), "xml");
    }

    #[test]
    fn test_render_reports_format() {
        let document = MappingDocument::new();
        for format in [DocumentFormat::Xml, DocumentFormat::Json, DocumentFormat::Yaml] {
            let result = render(&document, format).unwrap();
            assert_eq!(result.format, format);
            assert!(!result.content.is_empty());
        }
    }
}
