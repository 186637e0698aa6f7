//! Non-composite identity

use super::{Convention, ConventionContext, ConventionError};
use crate::models::{ClassFragment, Identity, ModelType};

/// Maps the configured identity member (default `Id`) as the class identifier
pub struct CreateNonCompositeIdentity;

impl CreateNonCompositeIdentity {
    pub const NAME: &'static str = "CreateNonCompositeIdentity";
}

impl Convention for CreateNonCompositeIdentity {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(
        &self,
        model: &ModelType,
        class: &mut ClassFragment,
        ctx: &mut ConventionContext<'_>,
    ) -> Result<(), ConventionError> {
        if let Some(member) = model.member(&ctx.config.identity_member) {
            if member.value_type.as_primitive().is_none() {
                return Err(ConventionError::failed(format!(
                    "identity member '{}' on '{}' must have a primitive type, found '{}'",
                    member.name, model.name, member.value_type
                )));
            }
            class.identity = Some(Identity {
                name: member.name.clone(),
                column: member.name.clone(),
                access: member.access(),
            });
        }
        Ok(())
    }
}
