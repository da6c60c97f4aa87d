use serde::{Deserialize, Serialize};

use super::attribute::AttributeDef;
use super::member::MemberDef;

/// Declared accessibility of a type or member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Private,
    PrivateProtected,
    Internal,
    Protected,
    ProtectedInternal,
    #[default]
    Public,
}

impl Visibility {
    /// How far the element is reachable from outside its assembly:
    /// 2 = everyone, 1 = derived types only, 0 = not at all.
    pub fn exposure(&self) -> u8 {
        match self {
            Visibility::Public => 2,
            Visibility::Protected | Visibility::ProtectedInternal => 1,
            Visibility::Private | Visibility::PrivateProtected | Visibility::Internal => 0,
        }
    }

    pub fn is_visible_outside_assembly(&self) -> bool {
        self.exposure() > 0
    }

    /// Reachable only through derivation
    pub fn is_family_only(&self) -> bool {
        self.exposure() == 1
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::PrivateProtected => "private protected",
            Visibility::Internal => "internal",
            Visibility::Protected => "protected",
            Visibility::ProtectedInternal => "protected internal",
            Visibility::Public => "public",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

impl TypeKind {
    pub fn is_value_type(&self) -> bool {
        matches!(self, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Struct => "struct",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Delegate => "delegate",
        }
    }
}

/// A type definition
///
/// `namespace` is filled in from the enclosing namespace by
/// [`super::AssemblyDef::normalize`]; surface files may omit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDef {
    #[serde(default)]
    pub namespace: String,

    /// Simple name; nested types use `Outer+Inner`
    pub name: String,

    #[serde(default)]
    pub kind: TypeKind,

    #[serde(default)]
    pub visibility: Visibility,

    #[serde(default)]
    pub generic_arity: u32,

    #[serde(default)]
    pub is_sealed: bool,

    #[serde(default)]
    pub is_abstract: bool,

    /// Fully-qualified base type, if any
    #[serde(default)]
    pub base_type: Option<String>,

    /// Fully-qualified names of implemented interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<AttributeDef>,

    #[serde(default)]
    pub members: Vec<MemberDef>,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            namespace: String::new(),
            name: name.into(),
            kind,
            visibility: Visibility::Public,
            generic_arity: 0,
            is_sealed: false,
            is_abstract: false,
            base_type: None,
            interfaces: Vec::new(),
            attributes: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Struct)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_generic_arity(mut self, arity: u32) -> Self {
        self.generic_arity = arity;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.is_sealed = true;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_base_type(mut self, base: impl Into<String>) -> Self {
        self.base_type = Some(base.into());
        self
    }

    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeDef) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn with_member(mut self, member: MemberDef) -> Self {
        self.members.push(member);
        self
    }

    /// Namespace-qualified name, with a `` `N `` suffix for generic types.
    pub fn full_name(&self) -> String {
        let mut full = if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        };
        if self.generic_arity > 0 && !self.name.contains('`') {
            full.push_str(&format!("`{}", self.generic_arity));
        }
        full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut ty = TypeDef::class("List").with_generic_arity(1);
        assert_eq!(ty.full_name(), "List`1");
        ty.namespace = "System.Collections".to_string();
        assert_eq!(ty.full_name(), "System.Collections.List`1");
    }

    #[test]
    fn test_explicit_arity_suffix_is_not_doubled() {
        let mut ty = TypeDef::class("Dictionary`2").with_generic_arity(2);
        ty.namespace = "System".to_string();
        assert_eq!(ty.full_name(), "System.Dictionary`2");
    }

    #[test]
    fn test_visibility_exposure() {
        assert!(Visibility::Public.exposure() > Visibility::Protected.exposure());
        assert_eq!(
            Visibility::Protected.exposure(),
            Visibility::ProtectedInternal.exposure()
        );
        assert!(!Visibility::Internal.is_visible_outside_assembly());
        assert!(!Visibility::PrivateProtected.is_visible_outside_assembly());
        assert!(Visibility::Protected.is_family_only());
    }
}
