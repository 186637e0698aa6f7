//! Entity match predicates

use crate::models::ModelType;
use std::fmt;
use std::sync::Arc;

type TypeFilter = Arc<dyn Fn(&ModelType) -> bool + Send + Sync>;

/// Composable filter deciding which discovered types are entities
///
/// Entity filters decide whether a type is mapped as a top-level class; traversal filters
/// decide whether the walk continues through a type. Each list is a conjunction: every
/// filter must pass. An empty traversal list traverses every related type.
#[derive(Clone)]
pub struct MatchEntities {
    entity_filters: Vec<TypeFilter>,
    traversal_filters: Vec<TypeFilter>,
}

impl MatchEntities {
    /// Match every type
    pub fn all() -> Self {
        Self {
            entity_filters: Vec::new(),
            traversal_filters: Vec::new(),
        }
    }

    /// Match types declaring a member named `Id`
    pub fn with_id_property() -> Self {
        Self::all().and_where(|t| t.has_member("Id"))
    }

    /// Add an entity filter
    pub fn and_where<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ModelType) -> bool + Send + Sync + 'static,
    {
        self.entity_filters.push(Arc::new(filter));
        self
    }

    /// Add a traversal filter
    pub fn traverse_where<F>(mut self, filter: F) -> Self
    where
        F: Fn(&ModelType) -> bool + Send + Sync + 'static,
    {
        self.traversal_filters.push(Arc::new(filter));
        self
    }

    pub fn is_entity(&self, model: &ModelType) -> bool {
        self.entity_filters.iter().all(|f| f(model))
    }

    pub fn is_traversable(&self, model: &ModelType) -> bool {
        self.traversal_filters.iter().all(|f| f(model))
    }
}

impl Default for MatchEntities {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for MatchEntities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchEntities")
            .field("entity_filters", &self.entity_filters.len())
            .field("traversal_filters", &self.traversal_filters.len())
            .finish()
    }
}
