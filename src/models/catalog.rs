//! Type catalog
//!
//! The catalog is the static replacement for runtime type introspection: every model type
//! a build may reach is declared up front, either in code through [`ModelDescriptor`] or in
//! a YAML/JSON manifest.

use super::model_type::{ModelType, TypeName};
use crate::discovery::DiscoveryError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Implemented by Rust types that can describe their own persisted shape
pub trait ModelDescriptor {
    fn describe() -> ModelType;
}

/// Name-indexed, insertion-ordered set of model type descriptors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "CatalogManifest", into = "CatalogManifest")]
pub struct TypeCatalog {
    types: Vec<ModelType>,
    index: HashMap<TypeName, usize>,
}

#[derive(Serialize, Deserialize)]
struct CatalogManifest {
    #[serde(default)]
    types: Vec<ModelType>,
}

impl From<CatalogManifest> for TypeCatalog {
    fn from(manifest: CatalogManifest) -> Self {
        let mut catalog = TypeCatalog::new();
        for model in manifest.types {
            catalog.insert(model);
        }
        catalog
    }
}

impl From<TypeCatalog> for CatalogManifest {
    fn from(catalog: TypeCatalog) -> Self {
        CatalogManifest {
            types: catalog.types,
        }
    }
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog from a YAML manifest (`types: [...]`)
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load a catalog from a JSON manifest (`{"types": [...]}`)
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Insert or replace a descriptor. A replaced descriptor keeps its original position.
    pub fn insert(&mut self, model: ModelType) -> &mut Self {
        match self.index.get(&model.name) {
            Some(&idx) => self.types[idx] = model,
            None => {
                self.index.insert(model.name.clone(), self.types.len());
                self.types.push(model);
            }
        }
        self
    }

    pub fn with_type(mut self, model: ModelType) -> Self {
        self.insert(model);
        self
    }

    pub fn register<T: ModelDescriptor>(&mut self) -> &mut Self {
        self.insert(T::describe())
    }

    pub fn get(&self, name: &TypeName) -> Option<&ModelType> {
        self.index.get(name).map(|&idx| &self.types[idx])
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.index.contains_key(name)
    }

    pub fn resolve(&self, name: &TypeName) -> Result<&ModelType, DiscoveryError> {
        self.get(name)
            .ok_or_else(|| DiscoveryError::UnknownType(name.clone()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelType> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, Primitive, TypeRef};

    struct Customer;

    impl ModelDescriptor for Customer {
        fn describe() -> ModelType {
            ModelType::new("Customer")
                .with_member(Member::primitive("Id", Primitive::Guid))
                .with_member(Member::primitive("Name", Primitive::String))
        }
    }

    #[test]
    fn test_register_descriptor() {
        let mut catalog = TypeCatalog::new();
        catalog.register::<Customer>();

        let customer = catalog.resolve(&TypeName::new("Customer")).unwrap();
        assert_eq!(customer.members.len(), 2);
        assert!(catalog.resolve(&TypeName::new("Missing")).is_err());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut catalog = TypeCatalog::new()
            .with_type(ModelType::new("A"))
            .with_type(ModelType::new("B"));
        catalog.insert(ModelType::new("A").embeddable());

        let names: Vec<_> = catalog.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(catalog.get(&TypeName::new("A")).unwrap().embeddable);
    }

    #[test]
    fn test_load_yaml_manifest() {
        let yaml = r#"
types:
  - name: Order
    members:
      - name: Id
        type: int
      - name: Lines
        type: Collection<OrderLine>
  - name: OrderLine
    members:
      - name: Quantity
        type: int
        kind: field
"#;
        let catalog = TypeCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 2);

        let order = catalog.get(&TypeName::new("Order")).unwrap();
        assert_eq!(
            order.member("Lines").unwrap().value_type,
            TypeRef::collection_of(TypeRef::model("OrderLine"))
        );

        let json = serde_json::to_string(&catalog).unwrap();
        let reloaded = TypeCatalog::from_json_str(&json).unwrap();
        assert!(reloaded.contains(&TypeName::new("OrderLine")));
    }
}
