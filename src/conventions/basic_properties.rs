//! Basic (single-column) properties

use super::{Convention, ConventionContext, ConventionError};
use super::identity::CreateNonCompositeIdentity;
use super::version::AddVersion;
use crate::models::{ClassFragment, Member, ModelType, Property};

/// Map a writable member with a primitive value type to a column named
/// `prefix + member name`
pub fn basic_property(member: &Member, prefix: &str) -> Option<Property> {
    if member.read_only {
        return None;
    }
    member.value_type.as_primitive()?;
    Some(Property {
        name: member.name.clone(),
        column: format!("{}{}", prefix, member.name),
        access: member.access(),
    })
}

/// Maps every primitive member not already claimed by the identity, the version or an
/// existing property
pub struct CreateBasicProperties;

impl CreateBasicProperties {
    pub const NAME: &'static str = "CreateBasicProperties";
}

impl Convention for CreateBasicProperties {
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
            if class.claims(&member.name) || mapper.is_component(member) {
                continue;
            }
            if let Some(property) = basic_property(member, "") {
                class.properties.push(property);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Access, Primitive, TypeRef};

    #[test]
    fn test_basic_property_rules() {
        let name = Member::primitive("Name", Primitive::String);
        let property = basic_property(&name, "Billing_").unwrap();
        assert_eq!(property.column, "Billing_Name");
        assert_eq!(property.access, Access::Property);

        let derived = Member::primitive("Total", Primitive::Decimal).read_only();
        assert!(basic_property(&derived, "").is_none());

        let reference = Member::new("Customer", TypeRef::model("Customer"));
        assert!(basic_property(&reference, "").is_none());

        let tags = Member::new(
            "Tags",
            TypeRef::collection_of(TypeRef::Primitive(Primitive::String)),
        );
        assert!(basic_property(&tags, "").is_none());
    }
}
