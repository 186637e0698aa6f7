//! XML exporter
//!
//! Writes the mapping document as an XML mapping file:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <mapping>
//!   <class name="Order" table="Orders">
//!     <id name="Id" column="Id" access="property"/>
//!     <version name="Version" column="Version"/>
//!     <component name="ShippingAddress" access="property">
//!       <property name="Street" column="ShippingAddress_Street" access="property"/>
//!     </component>
//!   </class>
//! </mapping>
//! ```
//!
//! Auxiliary objects are not part of the rendered mapping; the builder hands them to the
//! engine separately.

use super::{DocumentFormat, ExportError, ExportResult};
use crate::models::{ClassFragment, Component, MappingDocument, Property};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

const ROOT: &str = "mapping";

/// Exporter for XML mapping documents.
pub struct XmlExporter;

impl XmlExporter {
    pub fn export(document: &MappingDocument) -> Result<ExportResult, ExportError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        write(
            &mut writer,
            Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
        )?;
        write(&mut writer, Event::Start(BytesStart::new(ROOT)))?;
        for class in &document.classes {
            Self::write_class(&mut writer, class)?;
        }
        write(&mut writer, Event::End(BytesEnd::new(ROOT)))?;

        let content = String::from_utf8(writer.into_inner())
            .map_err(|e| ExportError::SerializationError(e.to_string()))?;
        Ok(ExportResult {
            content,
            format: DocumentFormat::Xml,
        })
    }

    fn write_class(writer: &mut Writer<Vec<u8>>, class: &ClassFragment) -> Result<(), ExportError> {
        let mut start = BytesStart::new("class");
        start.push_attribute(("name", class.name.as_str()));
        start.push_attribute(("table", class.table.as_str()));
        write(writer, Event::Start(start))?;

        if let Some(identity) = &class.identity {
            let mut id = BytesStart::new("id");
            id.push_attribute(("name", identity.name.as_str()));
            id.push_attribute(("column", identity.column.as_str()));
            id.push_attribute(("access", identity.access.as_str()));
            write(writer, Event::Empty(id))?;
        }
        if let Some(version) = &class.version {
            let mut element = BytesStart::new("version");
            element.push_attribute(("name", version.name.as_str()));
            element.push_attribute(("column", version.column.as_str()));
            write(writer, Event::Empty(element))?;
        }
        for property in &class.properties {
            Self::write_property(writer, property)?;
        }
        for component in &class.components {
            Self::write_component(writer, component)?;
        }

        write(writer, Event::End(BytesEnd::new("class")))
    }

    fn write_property(writer: &mut Writer<Vec<u8>>, property: &Property) -> Result<(), ExportError> {
        let mut element = BytesStart::new("property");
        element.push_attribute(("name", property.name.as_str()));
        element.push_attribute(("column", property.column.as_str()));
        element.push_attribute(("access", property.access.as_str()));
        write(writer, Event::Empty(element))
    }

    fn write_component(
        writer: &mut Writer<Vec<u8>>,
        component: &Component,
    ) -> Result<(), ExportError> {
        let mut start = BytesStart::new("component");
        start.push_attribute(("name", component.name.as_str()));
        start.push_attribute(("access", component.access.as_str()));

        if component.properties.is_empty() && component.components.is_empty() {
            return write(writer, Event::Empty(start));
        }

        write(writer, Event::Start(start))?;
        for property in &component.properties {
            Self::write_property(writer, property)?;
        }
        for nested in &component.components {
            Self::write_component(writer, nested)?;
        }
        write(writer, Event::End(BytesEnd::new("component")))
    }
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::SerializationError(e.to_string()))
}
