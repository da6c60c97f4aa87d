use super::{matched_members, DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::{MappingNode, MappingState};
use crate::model::{ElementKind, MemberKind, TypeKind};

const MEMBER: &[ElementKind] = &[ElementKind::Member];

fn incompatible<'a>(rule: &'static str, message: String, node: &'a MappingNode<'a>) -> Vec<Difference<'a>> {
    vec![Difference::new(rule, DifferenceType::Incompatible, message, node)]
}

/// A new abstract member breaks every existing subclass.
pub struct CannotAddAbstractMembers;

impl DifferenceRule for CannotAddAbstractMembers {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotAddAbstractMembers", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if node.state() != MappingState::Added || ctx.parent_state() != MappingState::Matched {
            return Vec::new();
        }
        match node.implementation().and_then(|el| el.as_member()) {
            Some((ty, member))
                if member.is_abstract && ty.kind == TypeKind::Class && !ty.is_sealed =>
            {
                incompatible(
                    self.metadata().name,
                    format!(
                        "Member '{}' is abstract in the implementation but is missing in the contract.",
                        node.path()
                    ),
                    node,
                )
            }
            _ => Vec::new(),
        }
    }
}

/// A new interface member breaks every existing implementer.
pub struct InterfacesShouldHaveSameMembers;

impl DifferenceRule for InterfacesShouldHaveSameMembers {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("InterfacesShouldHaveSameMembers", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if node.state() != MappingState::Added || ctx.parent_state() != MappingState::Matched {
            return Vec::new();
        }
        match node.implementation().and_then(|el| el.as_member()) {
            Some((ty, member)) if ty.kind == TypeKind::Interface && !member.is_static => incompatible(
                self.metadata().name,
                format!(
                    "Interface member '{}' is present in the implementation but not in the contract.",
                    node.path()
                ),
                node,
            ),
            _ => Vec::new(),
        }
    }
}

pub struct CannotMakeMemberNonVirtual;

impl DifferenceRule for CannotMakeMemberNonVirtual {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotMakeMemberNonVirtual", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_members(node) {
            Some(((cty, c), (_, i))) if c.is_virtual && !i.is_virtual && !cty.is_sealed => incompatible(
                self.metadata().name,
                format!(
                    "Member '{}' is virtual in the contract but is non-virtual in the implementation.",
                    node.path()
                ),
                node,
            ),
            _ => Vec::new(),
        }
    }
}

pub struct CannotMakeMemberAbstract;

impl DifferenceRule for CannotMakeMemberAbstract {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotMakeMemberAbstract", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_members(node) {
            Some(((_, c), (_, i))) if !c.is_abstract && i.is_abstract => incompatible(
                self.metadata().name,
                format!(
                    "Member '{}' is non-abstract in the contract but is abstract in the implementation.",
                    node.path()
                ),
                node,
            ),
            _ => Vec::new(),
        }
    }
}

pub struct CannotChangeStaticness;

impl DifferenceRule for CannotChangeStaticness {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotChangeStaticness", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_members(node) {
            Some(((_, c), (_, i))) if c.is_static != i.is_static => {
                let describe = |is_static: bool| if is_static { "static" } else { "an instance member" };
                incompatible(
                    self.metadata().name,
                    format!(
                        "Member '{}' is {} in the contract but {} in the implementation.",
                        node.path(),
                        describe(c.is_static),
                        describe(i.is_static)
                    ),
                    node,
                )
            }
            _ => Vec::new(),
        }
    }
}

pub struct EnumValuesMustMatch;

impl DifferenceRule for EnumValuesMustMatch {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("EnumValuesMustMatch", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_members(node) {
            Some(((cty, c), (_, i)))
                if cty.kind == TypeKind::Enum
                    && c.kind == MemberKind::Field
                    && c.constant_value != i.constant_value =>
            {
                incompatible(
                    self.metadata().name,
                    format!(
                        "Enum value '{}' is ({}) in the contract but ({}) in the implementation.",
                        node.path(),
                        c.constant_value.as_deref().unwrap_or(""),
                        i.constant_value.as_deref().unwrap_or("")
                    ),
                    node,
                )
            }
            _ => Vec::new(),
        }
    }
}

/// Renamed parameters break callers that pass arguments by name.
pub struct ParameterNamesMustMatch;

impl DifferenceRule for ParameterNamesMustMatch {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("ParameterNamesMustMatch", MEMBER)
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        let Some(((_, c), (_, i))) = matched_members(node) else {
            return Vec::new();
        };
        c.parameters
            .iter()
            .zip(&i.parameters)
            .filter(|(cp, ip)| cp.name != ip.name)
            .map(|(cp, ip)| {
                Difference::new(
                    self.metadata().name,
                    DifferenceType::Changed,
                    format!(
                        "Parameter name on member '{}' is '{}' in the contract but '{}' in the implementation.",
                        node.path(),
                        cp.name,
                        ip.name
                    ),
                    node,
                )
            })
            .collect()
    }
}
