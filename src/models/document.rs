//! Mapping document model
//!
//! The document is an explicit tree: one `ClassFragment` per entity type, each holding an
//! optional identity and version plus the property/component tree built by conventions.
//! Rendering to a concrete format lives in `crate::export`.

use super::model_type::{Access, TypeName};
use serde::{Deserialize, Serialize};

/// Non-composite identifier of a class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub column: String,
    pub access: Access,
}

/// Optimistic-concurrency version descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub name: String,
    pub column: String,
}

/// Leaf mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    /// Column name, already prefixed by every enclosing component
    pub column: String,
    pub access: Access,
}

/// Embedded value object, possibly nesting further components
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub access: Access,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl Component {
    pub fn new(name: impl Into<String>, access: Access) -> Self {
        Self {
            name: name.into(),
            access,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Leaf properties of this component and every nested component, depth first
    pub fn leaf_properties(&self) -> Vec<&Property> {
        let mut leaves: Vec<&Property> = self.properties.iter().collect();
        for nested in &self.components {
            leaves.extend(nested.leaf_properties());
        }
        leaves
    }
}

/// Mapping fragment for one entity type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFragment {
    /// Model type this fragment maps
    pub name: TypeName,
    /// Storage name
    pub table: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Component>,
}

impl ClassFragment {
    pub fn new(name: TypeName, table: impl Into<String>) -> Self {
        Self {
            name,
            table: table.into(),
            identity: None,
            version: None,
            properties: Vec::new(),
            components: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Whether the identity, the version or a property already maps the member `name`
    pub fn claims(&self, name: &str) -> bool {
        self.identity.as_ref().is_some_and(|i| i.name == name)
            || self.version.as_ref().is_some_and(|v| v.name == name)
            || self.property(name).is_some()
    }

    /// Every column this class writes to, in document order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = Vec::new();
        if let Some(identity) = &self.identity {
            columns.push(identity.column.as_str());
        }
        if let Some(version) = &self.version {
            columns.push(version.column.as_str());
        }
        columns.extend(self.properties.iter().map(|p| p.column.as_str()));
        for component in &self.components {
            columns.extend(component.leaf_properties().into_iter().map(|p| p.column.as_str()));
        }
        columns
    }
}

/// Engine-specific object attached alongside the class mappings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxiliaryObject {
    pub name: String,
    /// Dialects the object applies to; empty means every dialect
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dialect_scope: Vec<String>,
    pub create_sql: String,
    pub drop_sql: String,
}

impl AuxiliaryObject {
    pub fn new(
        name: impl Into<String>,
        create_sql: impl Into<String>,
        drop_sql: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            dialect_scope: Vec::new(),
            create_sql: create_sql.into(),
            drop_sql: drop_sql.into(),
        }
    }

    pub fn for_dialect(mut self, dialect: impl Into<String>) -> Self {
        self.dialect_scope.push(dialect.into());
        self
    }
}

/// Full mapping description handed to the consuming engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDocument {
    #[serde(default)]
    pub classes: Vec<ClassFragment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auxiliary_objects: Vec<AuxiliaryObject>,
}

impl MappingDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn class(&self, name: &TypeName) -> Option<&ClassFragment> {
        self.classes.iter().find(|c| &c.name == name)
    }

    pub fn class_mut(&mut self, name: &TypeName) -> Option<&mut ClassFragment> {
        self.classes.iter_mut().find(|c| &c.name == name)
    }

    /// Borrow one class mutably together with a scope over the rest of the document.
    pub fn split_class_mut(
        &mut self,
        name: &TypeName,
    ) -> Option<(&mut ClassFragment, DocumentScope<'_>)> {
        let idx = self.classes.iter().position(|c| &c.name == name)?;
        let (before, rest) = self.classes.split_at_mut(idx);
        let (current, after) = rest.split_first_mut()?;
        Some((
            current,
            DocumentScope {
                before,
                after,
                auxiliary_objects: &mut self.auxiliary_objects,
            },
        ))
    }
}

/// View of a document while one of its classes is borrowed mutably
///
/// Other classes are readable; auxiliary objects may be appended.
pub struct DocumentScope<'a> {
    before: &'a [ClassFragment],
    after: &'a [ClassFragment],
    auxiliary_objects: &'a mut Vec<AuxiliaryObject>,
}

impl DocumentScope<'_> {
    /// Any class other than the one currently borrowed
    pub fn class(&self, name: &TypeName) -> Option<&ClassFragment> {
        self.other_classes().find(|c| &c.name == name)
    }

    pub fn other_classes(&self) -> impl Iterator<Item = &ClassFragment> {
        self.before.iter().chain(self.after.iter())
    }

    pub fn attach(&mut self, object: AuxiliaryObject) {
        self.auxiliary_objects.push(object);
    }

    pub fn auxiliary_objects(&self) -> &[AuxiliaryObject] {
        self.auxiliary_objects
    }
}
