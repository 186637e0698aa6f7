//! Convention registry
//!
//! Holds the compiled-in list of candidate conventions and resolves one application
//! order from their "runs after" constraints.
//!
//! The constraints form a directed graph with an edge `A -> B` for "B runs after A".
//! Ordering is Kahn's algorithm with a min-heap keyed by registration index, so
//! independent conventions keep their registration order and identical inputs always
//! give the same order.

use super::Convention;
use super::basic_properties::CreateBasicProperties;
use super::component_properties::CreateComponentMappedProperties;
use super::identity::CreateNonCompositeIdentity;
use super::version::AddVersion;
use petgraph::Direction;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use tracing::debug;

/// Error while resolving the convention order
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Convention '{0}' is registered more than once")]
    DuplicateConvention(String),
    #[error("Convention '{convention}' runs after unknown convention '{dependency}'")]
    UnknownDependency {
        convention: String,
        dependency: String,
    },
    #[error("Cyclic convention ordering constraints between: {}", .conventions.join(", "))]
    CyclicConstraints { conventions: Vec<String> },
}

/// Candidate conventions in registration order
#[derive(Clone, Default)]
pub struct ConventionRegistry {
    candidates: Vec<Arc<dyn Convention>>,
}

impl ConventionRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in conventions
    pub fn with_defaults() -> Self {
        Self::new()
            .with_convention(CreateNonCompositeIdentity)
            .with_convention(AddVersion)
            .with_convention(CreateBasicProperties)
            .with_convention(CreateComponentMappedProperties)
    }

    pub fn register<C: Convention + 'static>(&mut self, convention: C) -> &mut Self {
        self.candidates.push(Arc::new(convention));
        self
    }

    pub fn with_convention<C: Convention + 'static>(mut self, convention: C) -> Self {
        self.register(convention);
        self
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.candidates.iter().map(|c| c.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Resolve the application order of every enabled convention.
    ///
    /// Conventions named in `disabled` are filtered out, and constraints pointing at them
    /// are dropped. A constraint naming a convention that was never registered is an error.
    pub fn discover(&self, disabled: &[String]) -> Result<Vec<Arc<dyn Convention>>, RegistryError> {
        let is_disabled = |name: &str| disabled.iter().any(|d| d == name);

        let active: Vec<&Arc<dyn Convention>> = self
            .candidates
            .iter()
            .filter(|c| !is_disabled(c.name()))
            .collect();

        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(active.len(), active.len());
        let mut by_name: HashMap<&'static str, NodeIndex> = HashMap::new();
        for (idx, convention) in active.iter().enumerate() {
            let node = graph.add_node(idx);
            if by_name.insert(convention.name(), node).is_some() {
                return Err(RegistryError::DuplicateConvention(
                    convention.name().to_string(),
                ));
            }
        }

        for (idx, convention) in active.iter().enumerate() {
            let node = NodeIndex::new(idx);
            for dependency in convention.runs_after() {
                match by_name.get(dependency) {
                    Some(&before) => {
                        graph.update_edge(before, node, ());
                    }
                    None if is_disabled(*dependency) => {
                        debug!(
                            convention = convention.name(),
                            dependency, "Dropping constraint on disabled convention"
                        );
                    }
                    None => {
                        return Err(RegistryError::UnknownDependency {
                            convention: convention.name().to_string(),
                            dependency: dependency.to_string(),
                        });
                    }
                }
            }
        }

        let order = Self::topological_order(&graph).map_err(|conventions| {
            RegistryError::CyclicConstraints {
                conventions: conventions
                    .into_iter()
                    .map(|idx| active[idx].name().to_string())
                    .collect(),
            }
        })?;

        debug!(
            order = ?order.iter().map(|&idx| active[idx].name()).collect::<Vec<_>>(),
            "Resolved convention order"
        );

        Ok(order.into_iter().map(|idx| Arc::clone(active[idx])).collect())
    }

    // Kahn's algorithm; on failure returns the registration indexes caught in cycles
    fn topological_order(graph: &DiGraph<usize, ()>) -> Result<Vec<usize>, Vec<usize>> {
        let mut in_degree: Vec<usize> = graph
            .node_indices()
            .map(|n| graph.neighbors_directed(n, Direction::Incoming).count())
            .collect();

        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, deg)| **deg == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(graph.node_count());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(graph[NodeIndex::new(idx)]);
            for next in graph.neighbors_directed(NodeIndex::new(idx), Direction::Outgoing) {
                let deg = &mut in_degree[next.index()];
                *deg -= 1;
                if *deg == 0 {
                    ready.push(Reverse(next.index()));
                }
            }
        }

        if order.len() == graph.node_count() {
            return Ok(order);
        }

        let mut cyclic: Vec<usize> = tarjan_scc(graph)
            .into_iter()
            .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
            .flatten()
            .map(|n| graph[n])
            .collect();
        cyclic.sort_unstable();
        Err(cyclic)
    }
}
