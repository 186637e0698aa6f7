//! Model type descriptors
//!
//! A `ModelType` is the ahead-of-time description of a persisted type: its name and
//! the ordered list of members a mapping can be derived from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique, comparable identity of a model type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Scalar value kinds that map straight onto a single column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    Int,
    Long,
    Decimal,
    Float,
    String,
    Date,
    DateTime,
    Guid,
    Bytes,
}

impl Primitive {
    pub fn as_str(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Decimal => "decimal",
            Primitive::Float => "float",
            Primitive::String => "string",
            Primitive::Date => "date",
            Primitive::DateTime => "datetime",
            Primitive::Guid => "guid",
            Primitive::Bytes => "bytes",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        let primitive = match s {
            "bool" => Primitive::Bool,
            "int" => Primitive::Int,
            "long" => Primitive::Long,
            "decimal" => Primitive::Decimal,
            "float" => Primitive::Float,
            "string" => Primitive::String,
            "date" => Primitive::Date,
            "datetime" => Primitive::DateTime,
            "guid" => Primitive::Guid,
            "bytes" => Primitive::Bytes,
            _ => return None,
        };
        Some(primitive)
    }
}

/// Declared value type of a member
///
/// Serialized as a compact string: `int`, `Address`, `Collection<Line>`, `Query<Line>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    Primitive(Primitive),
    Model(TypeName),
    /// A collection of some element type (lists, sets, bags)
    Collection(Box<TypeRef>),
    /// A lazily evaluated, queryable sequence of some element type
    Query(Box<TypeRef>),
}

impl TypeRef {
    pub fn model(name: impl Into<TypeName>) -> Self {
        Self::Model(name.into())
    }

    pub fn collection_of(element: TypeRef) -> Self {
        Self::Collection(Box::new(element))
    }

    pub fn query_of(element: TypeRef) -> Self {
        Self::Query(Box::new(element))
    }

    /// Unwrap a single collection level, then a single queryable level.
    ///
    /// `Collection<Query<T>>` resolves to `T`; `Collection<Collection<T>>` stops at the
    /// inner collection, which is not a related type.
    pub fn unwrap_containers(&self) -> &TypeRef {
        let unwrapped = match self {
            TypeRef::Collection(inner) => inner.as_ref(),
            other => other,
        };
        match unwrapped {
            TypeRef::Query(inner) => inner.as_ref(),
            other => other,
        }
    }

    /// Model type reached through this reference, if any
    pub fn related_type(&self) -> Option<&TypeName> {
        match self.unwrap_containers() {
            TypeRef::Model(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_primitive(&self) -> Option<Primitive> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    pub fn as_model(&self) -> Option<&TypeName> {
        match self {
            TypeRef::Model(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(p) => f.write_str(p.as_str()),
            TypeRef::Model(name) => write!(f, "{}", name),
            TypeRef::Collection(inner) => write!(f, "Collection<{}>", inner),
            TypeRef::Query(inner) => write!(f, "Query<{}>", inner),
        }
    }
}

impl std::str::FromStr for TypeRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty type reference".to_string());
        }
        if let Some(inner) = s.strip_prefix("Collection<").and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeRef::collection_of(inner.parse()?));
        }
        if let Some(inner) = s.strip_prefix("Query<").and_then(|r| r.strip_suffix('>')) {
            return Ok(TypeRef::query_of(inner.parse()?));
        }
        if let Some(p) = Primitive::parse(s) {
            return Ok(TypeRef::Primitive(p));
        }
        if s.contains(['<', '>', ' ']) {
            return Err(format!("Invalid type reference: {}", s));
        }
        Ok(TypeRef::model(s))
    }
}

impl TryFrom<String> for TypeRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

/// Whether a member is backed by a field or exposed as a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Field,
    #[default]
    Property,
}

/// Access strategy written into generated fragments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Property,
    Field,
    NoSetter,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::Property => "property",
            Access::Field => "field",
            Access::NoSetter => "nosetter",
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed slot on a model type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: TypeRef,
    #[serde(default)]
    pub kind: MemberKind,
    /// Read-only members are treated as derived values and never persisted
    #[serde(default)]
    pub read_only: bool,
    /// Explicit marking as an embedded component
    #[serde(default)]
    pub embeddable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access: Option<Access>,
}

impl Member {
    pub fn new(name: impl Into<String>, value_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            value_type,
            kind: MemberKind::Property,
            read_only: false,
            embeddable: false,
            access: None,
        }
    }

    pub fn primitive(name: impl Into<String>, primitive: Primitive) -> Self {
        Self::new(name, TypeRef::Primitive(primitive))
    }

    pub fn field(mut self) -> Self {
        self.kind = MemberKind::Field;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn embedded(mut self) -> Self {
        self.embeddable = true;
        self
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = Some(access);
        self
    }

    /// Access classification used for generated fragments
    pub fn access(&self) -> Access {
        if let Some(access) = self.access {
            return access;
        }
        match (self.kind, self.read_only) {
            (MemberKind::Field, _) => Access::Field,
            (MemberKind::Property, true) => Access::NoSetter,
            (MemberKind::Property, false) => Access::Property,
        }
    }
}

/// Descriptor of a persisted model type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelType {
    pub name: TypeName,
    /// Marks the type itself as an embeddable value object
    #[serde(default)]
    pub embeddable: bool,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl ModelType {
    pub fn new(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            embeddable: false,
            members: Vec::new(),
        }
    }

    pub fn embeddable(mut self) -> Self {
        self.embeddable = true;
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name == name)
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }

    /// Members that may carry persisted state
    pub fn writable_members(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| !m.read_only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_single_container_level() {
        let direct = TypeRef::model("Order");
        assert_eq!(direct.related_type(), Some(&TypeName::new("Order")));

        let many = TypeRef::collection_of(TypeRef::model("Line"));
        assert_eq!(many.related_type(), Some(&TypeName::new("Line")));

        let query = TypeRef::query_of(TypeRef::model("Line"));
        assert_eq!(query.related_type(), Some(&TypeName::new("Line")));

        let nested = TypeRef::collection_of(TypeRef::query_of(TypeRef::model("Line")));
        assert_eq!(nested.related_type(), Some(&TypeName::new("Line")));

        let too_deep =
            TypeRef::collection_of(TypeRef::collection_of(TypeRef::model("Line")));
        assert_eq!(too_deep.related_type(), None);

        assert_eq!(TypeRef::Primitive(Primitive::Int).related_type(), None);
    }

    #[test]
    fn test_member_access_classification() {
        assert_eq!(Member::primitive("a", Primitive::Int).access(), Access::Property);
        assert_eq!(
            Member::primitive("a", Primitive::Int).field().access(),
            Access::Field
        );
        assert_eq!(
            Member::primitive("a", Primitive::Int).read_only().access(),
            Access::NoSetter
        );
        assert_eq!(
            Member::primitive("a", Primitive::Int)
                .with_access(Access::Field)
                .access(),
            Access::Field
        );
    }

    #[test]
    fn test_member_yaml_shape() {
        let yaml = "name: Street\ntype: string\n";
        let member: Member = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(member.value_type, TypeRef::Primitive(Primitive::String));
        assert!(!member.read_only);
        assert_eq!(member.kind, MemberKind::Property);

        let yaml = "name: Lines\ntype: Collection<Query<OrderLine>>\nread_only: true\n";
        let member: Member = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            member.value_type,
            TypeRef::collection_of(TypeRef::query_of(TypeRef::model("OrderLine")))
        );
        assert!(member.read_only);
    }

    #[test]
    fn test_type_ref_text_form() {
        let parsed: TypeRef = "Collection<Address>".parse().unwrap();
        assert_eq!(parsed.to_string(), "Collection<Address>");
        assert!("Collection<".parse::<TypeRef>().is_err());
        assert!("".parse::<TypeRef>().is_err());
    }
}
