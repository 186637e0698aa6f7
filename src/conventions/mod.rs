//! Mapping conventions
//!
//! A convention is a named rule that inspects one entity type and mutates that type's
//! class fragment. Conventions declare "runs after" constraints on each other; the
//! registry turns those into a single application order and the pipeline applies every
//! convention to every entity in that order.
//!
//! # Example
//!
//! ```rust
//! use data_modelling_codefirst::conventions::{Convention, ConventionContext, ConventionError};
//! use data_modelling_codefirst::models::{ClassFragment, ModelType};
//!
//! struct UppercaseTables;
//!
//! impl Convention for UppercaseTables {
//!     fn name(&self) -> &'static str {
//!         "UppercaseTables"
//!     }
//!
//!     fn apply(
//!         &self,
//!         _model: &ModelType,
//!         class: &mut ClassFragment,
//!         _ctx: &mut ConventionContext<'_>,
//!     ) -> Result<(), ConventionError> {
//!         class.table = class.table.to_uppercase();
//!         Ok(())
//!     }
//! }
//! ```

pub mod basic_properties;
pub mod component;
pub mod component_properties;
pub mod identity;
pub mod pipeline;
pub mod registry;
pub mod version;

pub use basic_properties::{CreateBasicProperties, basic_property};
pub use component::{
    ComponentMapper, ComponentRule, ComponentRules, register_component_rule,
};
pub use component_properties::CreateComponentMappedProperties;
pub use identity::CreateNonCompositeIdentity;
pub use pipeline::{ConventionPipeline, PipelineEnv, PipelineError};
pub use registry::{ConventionRegistry, RegistryError};
pub use version::AddVersion;

use crate::builder::BuilderConfig;
use crate::discovery::EntityTypeSet;
use crate::models::{
    AuxiliaryObject, ClassFragment, DocumentScope, ModelType, TypeCatalog, TypeName,
};
use crate::naming::NamingService;

/// A pluggable mapping rule
pub trait Convention: Send + Sync {
    /// Unique name, referenced by other conventions' `runs_after`
    fn name(&self) -> &'static str;

    /// Conventions that must have been applied to every entity before this one runs
    fn runs_after(&self) -> &'static [&'static str] {
        &[]
    }

    /// Apply the rule to one entity type and its class fragment
    fn apply(
        &self,
        model: &ModelType,
        class: &mut ClassFragment,
        ctx: &mut ConventionContext<'_>,
    ) -> Result<(), ConventionError>;

    /// Engine-specific objects this convention contributes once per build
    fn auxiliary_objects(&self) -> Vec<AuxiliaryObject> {
        Vec::new()
    }
}

/// Everything a convention may consult besides its own class fragment
pub struct ConventionContext<'a> {
    /// Every entity type in the build
    pub entity_types: &'a EntityTypeSet,
    pub catalog: &'a TypeCatalog,
    pub config: &'a BuilderConfig,
    pub component_rules: &'a ComponentRules,
    pub naming: &'a dyn NamingService,
    /// The rest of the document
    pub document: DocumentScope<'a>,
}

impl ConventionContext<'_> {
    pub fn component_mapper(&self) -> ComponentMapper<'_> {
        ComponentMapper::new(
            self.catalog,
            self.component_rules,
            &self.config.column_separator,
        )
    }

    pub fn is_entity(&self, name: &TypeName) -> bool {
        self.entity_types.contains(name)
    }
}

/// Error raised by a single convention application
#[derive(Debug, thiserror::Error)]
pub enum ConventionError {
    #[error("Cyclic component embedding: {}", .path.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(" -> "))]
    ComponentCycle { path: Vec<TypeName> },
    #[error("Component type '{0}' is not in the catalog")]
    UnknownComponentType(TypeName),
    #[error("Convention error: {0}")]
    Failed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConventionError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
