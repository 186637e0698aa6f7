//! Schema builder
//!
//! Orchestrates a full build: order the conventions, discover the entity types, seed one
//! class fragment per entity, run the convention pipeline, apply the caller's finishing
//! transform, validate, then hand the rendered document to a mapping engine.
//!
//! Every configuration problem (bad config, unsatisfiable convention ordering) is reported
//! before any entity is touched, and nothing reaches the engine unless the whole document
//! was built successfully.

pub mod config;
pub mod error;

pub use config::{BuilderConfig, ConfigError};
pub use error::BuildError;

use crate::conventions::{
    ComponentRules, ConventionPipeline, ConventionRegistry, PipelineEnv,
};
use crate::discovery::{MatchEntities, TypeGraphWalker};
use crate::engine::MappingEngine;
use crate::export;
use crate::models::{ClassFragment, MappingDocument, TypeCatalog, TypeName};
use crate::naming::{EnglishPluralizer, NamingService};
use crate::validation::ColumnValidator;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span};

/// Caller-supplied last step run on the finished document
pub type FinishTransform = Box<dyn FnOnce(&mut MappingDocument) -> anyhow::Result<()> + Send>;

/// What to build: the root types, how to select entities, and an optional finishing step
pub struct BuildRequest {
    pub roots: Vec<TypeName>,
    /// Without a matcher only the roots themselves are entities
    pub match_entities: Option<MatchEntities>,
    pub finish: Option<FinishTransform>,
}

impl BuildRequest {
    pub fn new<I, T>(roots: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TypeName>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            match_entities: None,
            finish: None,
        }
    }

    pub fn matching(mut self, matcher: MatchEntities) -> Self {
        self.match_entities = Some(matcher);
        self
    }

    pub fn with_finish<F>(mut self, finish: F) -> Self
    where
        F: FnOnce(&mut MappingDocument) -> anyhow::Result<()> + Send + 'static,
    {
        self.finish = Some(Box::new(finish));
        self
    }
}

impl fmt::Debug for BuildRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildRequest")
            .field("roots", &self.roots)
            .field("match_entities", &self.match_entities)
            .field("finish", &self.finish.is_some())
            .finish()
    }
}

/// Builds mapping documents from a type catalog
pub struct SchemaBuilder {
    catalog: TypeCatalog,
    config: BuilderConfig,
    naming: Arc<dyn NamingService>,
    registry: ConventionRegistry,
    /// `None` means the process-wide rules, snapshotted per build
    component_rules: Option<ComponentRules>,
}

impl SchemaBuilder {
    /// Builder with the default configuration, pluralizer and built-in conventions
    pub fn new(catalog: TypeCatalog) -> Self {
        Self {
            catalog,
            config: BuilderConfig::default(),
            naming: Arc::new(EnglishPluralizer::new()),
            registry: ConventionRegistry::with_defaults(),
            component_rules: None,
        }
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_naming<N: NamingService + 'static>(mut self, naming: N) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    pub fn with_registry(mut self, registry: ConventionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use a fixed rule set instead of the process-wide one
    pub fn with_component_rules(mut self, rules: ComponentRules) -> Self {
        self.component_rules = Some(rules);
        self
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Build the mapping document without handing it to an engine
    pub fn build_document(&self, request: BuildRequest) -> Result<MappingDocument, BuildError> {
        let span = info_span!("schema_build", roots = request.roots.len());
        let _enter = span.enter();

        self.config.validate()?;
        let conventions = self.registry.discover(&self.config.disabled_conventions)?;
        let component_rules = match &self.component_rules {
            Some(rules) => rules.clone(),
            None => ComponentRules::global(),
        };

        let entity_types = TypeGraphWalker::new(&self.catalog)
            .discover(&request.roots, request.match_entities.as_ref())?;
        debug!(count = entity_types.len(), "Discovered entity types");

        let mut document = MappingDocument::new();
        for entity in &entity_types {
            let table = self.naming.pluralize(entity.as_str());
            debug!(entity = %entity, table = %table, "Seeding class fragment");
            document.classes.push(ClassFragment::new(entity.clone(), table));
        }

        let pipeline = ConventionPipeline::new(conventions);
        let env = PipelineEnv {
            catalog: &self.catalog,
            config: &self.config,
            component_rules: &component_rules,
            naming: self.naming.as_ref(),
        };
        pipeline.apply(&entity_types, &mut document, &env)?;

        if let Some(finish) = request.finish {
            finish(&mut document).map_err(BuildError::Transform)?;
        }

        if self.config.validate_columns {
            let result = ColumnValidator::new().validate(&document);
            if !result.is_valid() {
                return Err(BuildError::DuplicateColumns(result));
            }
        }

        info!(
            entities = document.classes.len(),
            conventions = pipeline.conventions().len(),
            auxiliary_objects = document.auxiliary_objects.len(),
            "Built mapping document"
        );
        Ok(document)
    }

    /// Build, render with the configured format, and hand everything to `engine`
    pub fn build<E: MappingEngine>(
        &self,
        request: BuildRequest,
        mut engine: E,
    ) -> Result<E::Handle, BuildError> {
        let document = self.build_document(request)?;
        let rendered = export::render(&document, self.config.output_format)?;

        engine.add_mapping(&rendered)?;
        for object in &document.auxiliary_objects {
            engine.add_auxiliary_object(object)?;
        }
        debug!(
            format = %rendered.format,
            auxiliary_objects = document.auxiliary_objects.len(),
            "Handing mapping document to engine"
        );
        Ok(engine.finish()?)
    }
}
