//! Component-mapped properties

use super::identity::CreateNonCompositeIdentity;
use super::version::AddVersion;
use super::{Convention, ConventionContext, ConventionError};
use crate::models::{ClassFragment, ModelType};
use tracing::debug;

/// Flattens every embedded member of an entity into a component tree
pub struct CreateComponentMappedProperties;

impl CreateComponentMappedProperties {
    pub const NAME: &'static str = "CreateComponentMappedProperties";
}

impl Convention for CreateComponentMappedProperties {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn runs_after(&self) -> &'static [&'static str] {
        &[CreateNonCompositeIdentity::NAME, AddVersion::NAME]
    }

    fn apply(
        &self,
        model: &ModelType,
        class: &mut ClassFragment,
        ctx: &mut ConventionContext<'_>,
    ) -> Result<(), ConventionError> {
        let mapper = ctx.component_mapper();
        for member in &model.members {
            if let Some(component) = mapper.build_component(member, "")? {
                debug!(entity = %model.name, component = %component.name, "Mapped component");
                class.components.push(component);
            }
        }
        Ok(())
    }
}
