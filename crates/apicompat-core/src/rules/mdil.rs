//! Servicing-only rules. Precompiled (MDIL) consumers bake value-type layout
//! and virtual slot assignments into their images, so changes a normal build
//! tolerates become breaking.

use super::{matched_types, DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::{MappingNode, MappingState};
use crate::model::{ElementKind, MemberDef, MemberKind, TypeDef};

fn instance_fields(ty: &TypeDef) -> impl Iterator<Item = &MemberDef> {
    ty.members
        .iter()
        .filter(|m| m.kind == MemberKind::Field && !m.is_static)
}

/// Instance fields of a struct must keep their order and types.
pub struct CannotChangeValueTypeLayout;

impl DifferenceRule for CannotChangeValueTypeLayout {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::mdil("CannotChangeValueTypeLayout", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        let Some((c, i)) = matched_types(node) else {
            return Vec::new();
        };
        if !c.kind.is_value_type() {
            return Vec::new();
        }

        let contract: Vec<&MemberDef> = instance_fields(c).collect();
        let implementation: Vec<&MemberDef> = instance_fields(i).collect();
        let same_layout = contract.len() == implementation.len()
            && contract.iter().zip(&implementation).all(|(cf, jf)| {
                cf.name == jf.name
                    && match (&cf.return_type, &jf.return_type) {
                        (Some(ct), Some(it)) => ctx.comparer.same_type_reference(ct, it),
                        (None, None) => true,
                        _ => false,
                    }
            });
        if same_layout {
            return Vec::new();
        }

        vec![Difference::new(
            self.metadata().name,
            DifferenceType::Incompatible,
            format!(
                "Layout of value type '{}' differs between the contract and the implementation.",
                node.path()
            ),
            node,
        )]
    }
}

/// A new virtual member shifts the slots of every derived type.
pub struct CannotAddVirtualMembers;

impl DifferenceRule for CannotAddVirtualMembers {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::mdil("CannotAddVirtualMembers", &[ElementKind::Member])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if node.state() != MappingState::Added || ctx.parent_state() != MappingState::Matched {
            return Vec::new();
        }
        match node.implementation().and_then(|el| el.as_member()) {
            Some((ty, member)) if member.is_virtual && !ty.is_sealed => vec![Difference::new(
                self.metadata().name,
                DifferenceType::Incompatible,
                format!(
                    "Member '{}' is a new virtual member in the implementation.",
                    node.path()
                ),
                node,
            )],
            _ => Vec::new(),
        }
    }
}
