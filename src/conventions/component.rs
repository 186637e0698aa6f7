//! Component flattening
//!
//! Embedded value objects are flattened into nested `Component` fragments. Whether a
//! member is embedded is decided by a set of classification rules; a member matching any
//! rule is a component.
//!
//! The process-wide rule list is configuration: register extra rules before starting
//! builds. Each build takes a snapshot of the list when it starts, so a rule registered
//! while a build runs only affects later builds.

use super::ConventionError;
use super::basic_properties::basic_property;
use crate::models::{Component, Member, TypeCatalog, TypeName};
use once_cell::sync::Lazy;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Predicate classifying a member as an embedded component
pub type ComponentRule = Arc<dyn Fn(&Member, &TypeCatalog) -> bool + Send + Sync>;

static GLOBAL_RULES: Lazy<RwLock<ComponentRules>> =
    Lazy::new(|| RwLock::new(ComponentRules::defaults()));

/// Append a rule to the process-wide classification list
pub fn register_component_rule<F>(rule: F)
where
    F: Fn(&Member, &TypeCatalog) -> bool + Send + Sync + 'static,
{
    let mut rules = match GLOBAL_RULES.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    rules.push(Arc::new(rule));
}

/// Ordered set of component classification rules
#[derive(Clone)]
pub struct ComponentRules {
    rules: Vec<ComponentRule>,
}

impl ComponentRules {
    /// No rules: nothing is a component
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Explicitly marked members, and members whose type is marked embeddable
    pub fn defaults() -> Self {
        let mut rules = Self::empty();
        rules.push(Arc::new(|member: &Member, _: &TypeCatalog| member.embeddable));
        rules.push(Arc::new(|member: &Member, catalog: &TypeCatalog| {
            member
                .value_type
                .as_model()
                .and_then(|name| catalog.get(name))
                .is_some_and(|model| model.embeddable)
        }));
        rules
    }

    /// Snapshot of the process-wide rule list
    pub fn global() -> Self {
        match GLOBAL_RULES.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn push(&mut self, rule: ComponentRule) {
        self.rules.push(rule);
    }

    pub fn with_rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&Member, &TypeCatalog) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Arc::new(rule));
        self
    }

    pub fn matches(&self, member: &Member, catalog: &TypeCatalog) -> bool {
        self.rules.iter().any(|rule| rule(member, catalog))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ComponentRules {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for ComponentRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRules")
            .field("rules", &self.rules.len())
            .finish()
    }
}

/// Builds component trees for embedded members
pub struct ComponentMapper<'a> {
    catalog: &'a TypeCatalog,
    rules: &'a ComponentRules,
    separator: &'a str,
}

impl<'a> ComponentMapper<'a> {
    pub fn new(catalog: &'a TypeCatalog, rules: &'a ComponentRules, separator: &'a str) -> Self {
        Self {
            catalog,
            rules,
            separator,
        }
    }

    pub fn is_component(&self, member: &Member) -> bool {
        member.value_type.as_model().is_some() && self.rules.matches(member, self.catalog)
    }

    /// Build the component for `member`, or `None` if it is not a component.
    ///
    /// Leaf columns are `prefix + member + separator + leaf`, extended once per level of
    /// nesting. Members of the embedded type that are neither components nor basic
    /// properties are left out.
    pub fn build_component(
        &self,
        member: &Member,
        prefix: &str,
    ) -> Result<Option<Component>, ConventionError> {
        let mut chain = Vec::new();
        self.build(member, prefix, &mut chain)
    }

    fn build(
        &self,
        member: &Member,
        prefix: &str,
        chain: &mut Vec<TypeName>,
    ) -> Result<Option<Component>, ConventionError> {
        if !self.is_component(member) {
            return Ok(None);
        }
        let Some(type_name) = member.value_type.as_model() else {
            return Ok(None);
        };
        let model = self
            .catalog
            .get(type_name)
            .ok_or_else(|| ConventionError::UnknownComponentType(type_name.clone()))?;

        if chain.contains(type_name) {
            let mut path = chain.clone();
            path.push(type_name.clone());
            return Err(ConventionError::ComponentCycle { path });
        }
        chain.push(type_name.clone());

        let mut component = Component::new(member.name.clone(), member.access());
        let nested_prefix = format!("{}{}{}", prefix, member.name, self.separator);

        for inner in &model.members {
            if let Some(nested) = self.build(inner, &nested_prefix, chain)? {
                component.components.push(nested);
                continue;
            }
            if let Some(property) = basic_property(inner, &nested_prefix) {
                component.properties.push(property);
            }
        }

        chain.pop();
        Ok(Some(component))
    }
}
