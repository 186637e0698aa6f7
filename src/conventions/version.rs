//! Version descriptor

use super::identity::CreateNonCompositeIdentity;
use super::{Convention, ConventionContext, ConventionError};
use crate::models::{ClassFragment, ModelType, Version};

/// Maps the configured version member (default `Version`) for optimistic concurrency
pub struct AddVersion;

impl AddVersion {
    pub const NAME: &'static str = "AddVersion";
}

impl Convention for AddVersion {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn runs_after(&self) -> &'static [&'static str] {
        &[CreateNonCompositeIdentity::NAME]
    }

    fn apply(
        &self,
        model: &ModelType,
        class: &mut ClassFragment,
        ctx: &mut ConventionContext<'_>,
    ) -> Result<(), ConventionError> {
        if model.has_member(&ctx.config.version_member) {
            class.version = Some(Version {
                name: ctx.config.version_member.clone(),
                column: ctx.config.version_member.clone(),
            });
        }
        Ok(())
    }
}
