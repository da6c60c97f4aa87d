//! Element equivalence across the contract and implementation sides.
//!
//! Two elements correspond when their canonical identities are equal. An
//! identity is the qualified name plus, for members, the full signature
//! (kind, generic arity, parameter types, return type), so overloads never
//! pair by name alone.
//!
//! Comparers differ only in how they canonicalise names: the default
//! comparer takes names as declared, the remapping comparer first rewrites
//! contract-side names through a [`RemapTable`].

pub mod remap;

pub use remap::{RemapComparer, RemapTable};

use crate::model::Element;
use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Which surface an element was taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Contract,
    Implementation,
}

/// Canonical identity of an element
///
/// Ordering is by name, then signature; mapping children are emitted in this
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementIdentity {
    pub name: String,
    pub signature: String,
}

pub trait ElementComparer: Send + Sync {
    /// Rewrite a qualified name (or a type reference) into canonical form.
    fn canonical_name<'n>(&self, name: &'n str, side: Side) -> Cow<'n, str>;

    fn identity(&self, element: Element<'_>, side: Side) -> ElementIdentity {
        match element {
            Element::Assembly(asm) => ElementIdentity {
                name: asm.name.clone(),
                signature: String::new(),
            },
            Element::Namespace(name) => ElementIdentity {
                name: self.canonical_name(name, side).into_owned(),
                signature: String::new(),
            },
            Element::Type(ty) => ElementIdentity {
                name: self.canonical_name(&ty.full_name(), side).into_owned(),
                signature: String::new(),
            },
            Element::Member(ty, member) => {
                let owner = self.canonical_name(&ty.full_name(), side).into_owned();
                let params: Vec<String> = member
                    .parameters
                    .iter()
                    .map(|p| self.canonical_name(&p.type_name, side).into_owned())
                    .collect();
                let ret = member
                    .return_type
                    .as_deref()
                    .map(|r| self.canonical_name(r, side).into_owned())
                    .unwrap_or_default();
                ElementIdentity {
                    name: format!("{}.{}", owner, member.name),
                    signature: format!(
                        "{}``{}({})->{}",
                        member.kind.tag(),
                        member.generic_arity,
                        params.join(","),
                        ret
                    ),
                }
            }
        }
    }

    /// Whether a contract element and an implementation element denote the
    /// same API element.
    fn equal(&self, contract: Element<'_>, implementation: Element<'_>) -> bool {
        contract.kind() == implementation.kind()
            && self.identity(contract, Side::Contract)
                == self.identity(implementation, Side::Implementation)
    }

    /// Bucket key for an element. Equal elements hash equally.
    fn hash(&self, element: Element<'_>, side: Side) -> u64 {
        let mut hasher = DefaultHasher::new();
        element.kind().hash(&mut hasher);
        self.identity(element, side).hash(&mut hasher);
        hasher.finish()
    }

    /// Whether two type references name the same type.
    fn same_type_reference(&self, contract: &str, implementation: &str) -> bool {
        self.canonical_name(contract, Side::Contract)
            == self.canonical_name(implementation, Side::Implementation)
    }
}

/// Compares names exactly as declared
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultComparer;

impl ElementComparer for DefaultComparer {
    fn canonical_name<'n>(&self, name: &'n str, _side: Side) -> Cow<'n, str> {
        Cow::Borrowed(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MemberDef, TypeDef};

    fn owner(name: &str) -> TypeDef {
        let mut ty = TypeDef::class(name);
        ty.namespace = "Foo".to_string();
        ty
    }

    #[test]
    fn test_overloads_are_distinct() {
        let ty = owner("Bar");
        let by_int = MemberDef::method("Baz").with_param("System.Int32");
        let by_long = MemberDef::method("Baz").with_param("System.Int64");
        let cmp = DefaultComparer;

        assert!(!cmp.equal(Element::Member(&ty, &by_int), Element::Member(&ty, &by_long)));
        assert!(cmp.equal(Element::Member(&ty, &by_int), Element::Member(&ty, &by_int)));
    }

    #[test]
    fn test_return_type_is_part_of_identity() {
        let ty = owner("Bar");
        let a = MemberDef::method("Get").returns("System.Int32");
        let b = MemberDef::method("Get").returns("System.String");
        assert!(!DefaultComparer.equal(Element::Member(&ty, &a), Element::Member(&ty, &b)));
    }

    #[test]
    fn test_kinds_never_compare_equal() {
        let ty = owner("Bar");
        assert!(!DefaultComparer.equal(Element::Type(&ty), Element::Namespace("Foo.Bar")));
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let ty = owner("Bar");
        let m = MemberDef::method("Baz").with_param("System.Int32");
        let cmp = DefaultComparer;
        assert_eq!(
            cmp.hash(Element::Member(&ty, &m), Side::Contract),
            cmp.hash(Element::Member(&ty, &m.clone()), Side::Implementation)
        );
    }

    #[test]
    fn test_identity_orders_by_name_then_signature() {
        let ty = owner("Bar");
        let a1 = MemberDef::method("A").with_param("System.String");
        let a0 = MemberDef::method("A");
        let b = MemberDef::method("B");
        let cmp = DefaultComparer;
        let mut ids = [
            cmp.identity(Element::Member(&ty, &b), Side::Contract),
            cmp.identity(Element::Member(&ty, &a1), Side::Contract),
            cmp.identity(Element::Member(&ty, &a0), Side::Contract),
        ];
        ids.sort();
        assert_eq!(ids[0].name, "Foo.Bar.A");
        assert!(ids[0].signature.contains("()"));
        assert_eq!(ids[1].name, "Foo.Bar.A");
        assert_eq!(ids[2].name, "Foo.Bar.B");
    }
}
