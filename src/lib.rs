//! Data Modelling Code-First - convention-driven persistence mappings
//!
//! Derives a persistence mapping document from ahead-of-time model type descriptors:
//! - Entity discovery (walking the related-type graph from root types)
//! - Pluggable mapping conventions with "runs after" ordering constraints
//! - Component flattening of embedded value objects
//! - Rendering (XML / JSON / YAML) and hand-off to a mapping engine
//!
//! # Example
//!
//! ```rust
//! use data_modelling_codefirst::{
//!     BuildRequest, InMemoryEngine, Member, ModelType, Primitive, SchemaBuilder, TypeCatalog,
//!     TypeRef,
//! };
//!
//! let catalog = TypeCatalog::new()
//!     .with_type(
//!         ModelType::new("Order")
//!             .with_member(Member::primitive("Id", Primitive::Int))
//!             .with_member(Member::primitive("Version", Primitive::Int))
//!             .with_member(Member::new("ShippingAddress", TypeRef::model("Address")).embedded()),
//!     )
//!     .with_type(
//!         ModelType::new("Address")
//!             .with_member(Member::primitive("Street", Primitive::String))
//!             .with_member(Member::primitive("City", Primitive::String)),
//!     );
//!
//! let configuration = SchemaBuilder::new(catalog)
//!     .build(BuildRequest::new(["Order"]), InMemoryEngine::new())
//!     .unwrap();
//! assert_eq!(configuration.mappings.len(), 1);
//! ```

pub mod builder;
pub mod conventions;
pub mod discovery;
pub mod engine;
pub mod export;
pub mod models;
pub mod naming;
pub mod validation;

// Re-export commonly used types
pub use builder::{BuildError, BuildRequest, BuilderConfig, ConfigError, SchemaBuilder};
pub use conventions::{
    ComponentMapper, ComponentRules, Convention, ConventionContext, ConventionError,
    ConventionPipeline, ConventionRegistry, PipelineError, RegistryError,
    register_component_rule,
};
pub use discovery::{DiscoveryError, EntityTypeSet, MatchEntities, TypeGraphWalker};
pub use engine::{EngineConfiguration, EngineError, InMemoryEngine, MappingEngine};
pub use export::{DocumentFormat, ExportError, ExportResult};
pub use naming::{EnglishPluralizer, NamingService};
pub use validation::{ColumnValidationResult, ColumnValidator};

// Re-export models
pub use models::{
    Access, AuxiliaryObject, ClassFragment, Component, Identity, MappingDocument, Member,
    ModelDescriptor, ModelType, Primitive, Property, TypeCatalog, TypeName, TypeRef, Version,
};
