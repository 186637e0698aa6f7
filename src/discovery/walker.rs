//! Type graph walker
//!
//! Breadth-first reachability walk over related-type edges. A visited set bounds the
//! queue to the distinct types reachable from the roots, so mutually referencing types
//! terminate.

use super::DiscoveryError;
use super::matcher::MatchEntities;
use crate::models::{ModelType, TypeCatalog, TypeName};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, warn};

/// Deduplicated entity types in first-discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityTypeSet {
    order: Vec<TypeName>,
    members: HashSet<TypeName>,
}

impl EntityTypeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a type; returns false if it was already present
    pub fn insert(&mut self, name: TypeName) -> bool {
        if self.members.insert(name.clone()) {
            self.order.push(name);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.members.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeName> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<'a> IntoIterator for &'a EntityTypeSet {
    type Item = &'a TypeName;
    type IntoIter = std::slice::Iter<'a, TypeName>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Discovers entity types reachable from a set of roots
pub struct TypeGraphWalker<'a> {
    catalog: &'a TypeCatalog,
}

impl<'a> TypeGraphWalker<'a> {
    pub fn new(catalog: &'a TypeCatalog) -> Self {
        Self { catalog }
    }

    /// Discover entity types.
    ///
    /// Without a matcher the result is exactly the (deduplicated) roots and no related
    /// type is visited.
    pub fn discover(
        &self,
        roots: &[TypeName],
        matcher: Option<&MatchEntities>,
    ) -> Result<EntityTypeSet, DiscoveryError> {
        let mut queue: VecDeque<&ModelType> = VecDeque::with_capacity(roots.len());
        let mut visited: HashSet<&TypeName> = HashSet::new();

        for root in roots {
            let model = self
                .catalog
                .get(root)
                .ok_or_else(|| DiscoveryError::UnknownRootType(root.clone()))?;
            if visited.insert(&model.name) {
                queue.push_back(model);
            }
        }

        let mut entities = EntityTypeSet::new();

        let Some(matcher) = matcher else {
            for model in queue {
                entities.insert(model.name.clone());
            }
            debug!(count = entities.len(), "Discovery without matcher, using roots");
            return Ok(entities);
        };

        while let Some(model) = queue.pop_front() {
            if matcher.is_entity(model) {
                entities.insert(model.name.clone());
            }

            if !matcher.is_traversable(model) {
                debug!(model = %model.name, "Type excluded from traversal");
                continue;
            }

            for member in model.writable_members() {
                let Some(related_name) = member.value_type.related_type() else {
                    continue;
                };
                let Some(related) = self.catalog.get(related_name) else {
                    warn!(
                        model = %model.name,
                        member = %member.name,
                        related = %related_name,
                        "Member references a type outside the catalog, skipping"
                    );
                    continue;
                };

                if matcher.is_entity(related) {
                    entities.insert(related.name.clone());
                }

                if visited.insert(&related.name) {
                    queue.push_back(related);
                }
            }
        }

        debug!(
            count = entities.len(),
            visited = visited.len(),
            "Discovery complete"
        );
        Ok(entities)
    }
}
