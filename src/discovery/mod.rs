//! Entity discovery
//!
//! Walks the related-type graph from a set of root types and selects the entity types a
//! mapping document is built for.

pub mod matcher;
pub mod walker;

pub use matcher::MatchEntities;
pub use walker::{EntityTypeSet, TypeGraphWalker};

use crate::models::TypeName;

/// Error during entity discovery
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Unknown root type: {0}")]
    UnknownRootType(TypeName),
    #[error("Unknown model type: {0}")]
    UnknownType(TypeName),
}
