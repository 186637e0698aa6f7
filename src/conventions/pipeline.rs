//! Convention pipeline
//!
//! Applies an ordered list of conventions to every entity type. Each convention runs over
//! all entities before the next one starts, so a convention that runs after another sees
//! that convention's effects on every class, not just its own.

use super::component::ComponentRules;
use super::{Convention, ConventionContext, ConventionError};
use crate::builder::BuilderConfig;
use crate::discovery::EntityTypeSet;
use crate::models::{MappingDocument, TypeCatalog, TypeName};
use crate::naming::NamingService;
use std::sync::Arc;
use tracing::{debug, error};

/// Read-only inputs shared by every convention application
pub struct PipelineEnv<'a> {
    pub catalog: &'a TypeCatalog,
    pub config: &'a BuilderConfig,
    pub component_rules: &'a ComponentRules,
    pub naming: &'a dyn NamingService,
}

/// Error while applying conventions
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Convention '{convention}' failed on '{entity}': {source}")]
    ConventionFailed {
        convention: String,
        entity: TypeName,
        #[source]
        source: ConventionError,
    },
    #[error("No class fragment seeded for entity '{0}'")]
    MissingClass(TypeName),
    #[error("Entity type '{0}' is not in the catalog")]
    UnknownEntity(TypeName),
}

/// Conventions in application order
pub struct ConventionPipeline {
    conventions: Vec<Arc<dyn Convention>>,
}

impl ConventionPipeline {
    pub fn new(conventions: Vec<Arc<dyn Convention>>) -> Self {
        Self { conventions }
    }

    pub fn conventions(&self) -> &[Arc<dyn Convention>] {
        &self.conventions
    }

    /// Apply every convention to every entity, stopping at the first failure.
    ///
    /// The document must already hold one class fragment per entity type. Auxiliary
    /// objects declared by the conventions are appended once the pass completes.
    pub fn apply(
        &self,
        entity_types: &EntityTypeSet,
        document: &mut MappingDocument,
        env: &PipelineEnv<'_>,
    ) -> Result<(), PipelineError> {
        for convention in &self.conventions {
            debug!(
                convention = convention.name(),
                count = entity_types.len(),
                "Applying convention"
            );

            for entity in entity_types {
                let model = env
                    .catalog
                    .get(entity)
                    .ok_or_else(|| PipelineError::UnknownEntity(entity.clone()))?;
                let (class, scope) = document
                    .split_class_mut(entity)
                    .ok_or_else(|| PipelineError::MissingClass(entity.clone()))?;

                let mut ctx = ConventionContext {
                    entity_types,
                    catalog: env.catalog,
                    config: env.config,
                    component_rules: env.component_rules,
                    naming: env.naming,
                    document: scope,
                };

                if let Err(source) = convention.apply(model, class, &mut ctx) {
                    error!(
                        convention = convention.name(),
                        entity = %entity,
                        error = %source,
                        "Convention failed"
                    );
                    return Err(PipelineError::ConventionFailed {
                        convention: convention.name().to_string(),
                        entity: entity.clone(),
                        source,
                    });
                }
            }
        }

        for convention in &self.conventions {
            let objects = convention.auxiliary_objects();
            if !objects.is_empty() {
                debug!(
                    convention = convention.name(),
                    count = objects.len(),
                    "Attaching auxiliary objects"
                );
                document.auxiliary_objects.extend(objects);
            }
        }

        Ok(())
    }
}
