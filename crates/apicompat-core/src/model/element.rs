use serde::{Deserialize, Serialize};

use super::assembly::AssemblyDef;
use super::attribute::AttributeDef;
use super::member::MemberDef;
use super::type_def::TypeDef;

/// Level of an element in the assembly → namespace → type → member hierarchy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    Assembly,
    Namespace,
    Type,
    Member,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Assembly => "assembly",
            ElementKind::Namespace => "namespace",
            ElementKind::Type => "type",
            ElementKind::Member => "member",
        }
    }
}

/// A borrowed view of one model element
///
/// Namespaces have no definition of their own; they are identified by name.
/// Members carry their declaring type so filters and rules can consult it.
#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    Assembly(&'a AssemblyDef),
    Namespace(&'a str),
    Type(&'a TypeDef),
    Member(&'a TypeDef, &'a MemberDef),
}

impl<'a> Element<'a> {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Assembly(_) => ElementKind::Assembly,
            Element::Namespace(_) => ElementKind::Namespace,
            Element::Type(_) => ElementKind::Type,
            Element::Member(..) => ElementKind::Member,
        }
    }

    /// Fully-qualified display path, e.g. `Foo.Bar(System.Int32)`
    pub fn path(&self) -> String {
        match self {
            Element::Assembly(asm) => asm.name.clone(),
            Element::Namespace(name) => name.to_string(),
            Element::Type(ty) => ty.full_name(),
            Element::Member(ty, member) => {
                format!("{}.{}", ty.full_name(), member.display_name())
            }
        }
    }

    /// Custom attributes applied directly to this element
    pub fn attributes(&self) -> &'a [AttributeDef] {
        match self {
            Element::Assembly(_) | Element::Namespace(_) => &[],
            Element::Type(ty) => &ty.attributes,
            Element::Member(_, member) => &member.attributes,
        }
    }

    pub fn as_type(&self) -> Option<&'a TypeDef> {
        match self {
            Element::Type(ty) => Some(ty),
            _ => None,
        }
    }

    pub fn as_member(&self) -> Option<(&'a TypeDef, &'a MemberDef)> {
        match self {
            Element::Member(ty, member) => Some((ty, member)),
            _ => None,
        }
    }

    pub fn as_assembly(&self) -> Option<&'a AssemblyDef> {
        match self {
            Element::Assembly(asm) => Some(asm),
            _ => None,
        }
    }
}
