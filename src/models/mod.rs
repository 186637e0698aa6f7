//! Models module
//!
//! Defines the model type descriptors a build starts from and the mapping document it
//! produces.

pub mod catalog;
pub mod document;
pub mod model_type;

pub use catalog::{ModelDescriptor, TypeCatalog};
pub use document::{
    AuxiliaryObject, ClassFragment, Component, DocumentScope, Identity, MappingDocument,
    Property, Version,
};
pub use model_type::{Access, Member, MemberKind, ModelType, Primitive, TypeName, TypeRef};
