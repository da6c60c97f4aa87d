//! Difference rules.
//!
//! A rule examines one mapping node and returns the differences it finds. Rules
//! are independent: none sees another's output, and the order in which rules
//! run on a node carries no meaning.

pub mod assembly;
pub mod attributes;
pub mod existence;
pub mod mdil;
pub mod member_rules;
pub mod registry;
pub mod type_rules;

pub use registry::{RuleDispatcher, RuleRegistry};

use crate::comparer::ElementComparer;
use crate::diff::Difference;
use crate::filter::SurfaceFilter;
use crate::mapping::{MappingNode, MappingState};
use crate::model::ElementKind;

/// What a rule declares about itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMetadata {
    pub name: &'static str,
    pub applies_to: &'static [ElementKind],
    /// Active only in servicing (MDIL) mode
    pub mdil_only: bool,
}

impl RuleMetadata {
    pub const fn new(name: &'static str, applies_to: &'static [ElementKind]) -> Self {
        Self {
            name,
            applies_to,
            mdil_only: false,
        }
    }

    pub const fn mdil(name: &'static str, applies_to: &'static [ElementKind]) -> Self {
        Self {
            name,
            applies_to,
            mdil_only: true,
        }
    }

    pub fn applies(&self, kind: ElementKind) -> bool {
        self.applies_to.contains(&kind)
    }
}

/// Read-only view of the run a rule executes in
#[derive(Clone, Copy)]
pub struct RuleContext<'c> {
    pub comparer: &'c dyn ElementComparer,
    pub filter: &'c dyn SurfaceFilter,
    /// States of the nodes above the examined one, outermost first
    pub ancestors: &'c [MappingState],
}

impl<'c> RuleContext<'c> {
    pub fn new(
        comparer: &'c dyn ElementComparer,
        filter: &'c dyn SurfaceFilter,
        ancestors: &'c [MappingState],
    ) -> Self {
        Self {
            comparer,
            filter,
            ancestors,
        }
    }

    /// State of the enclosing assembly; `Matched` for a root node
    pub fn assembly_state(&self) -> MappingState {
        self.ancestors.first().copied().unwrap_or(MappingState::Matched)
    }

    /// State of the direct parent; `Matched` for a root node
    pub fn parent_state(&self) -> MappingState {
        self.ancestors.last().copied().unwrap_or(MappingState::Matched)
    }
}

pub trait DifferenceRule: Send + Sync {
    fn metadata(&self) -> RuleMetadata;

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>>;
}

/// Contract and implementation types of a matched type node
pub(crate) fn matched_types<'a>(
    node: &'a MappingNode<'a>,
) -> Option<(&'a crate::model::TypeDef, &'a crate::model::TypeDef)> {
    let (contract, implementation) = node.matched()?;
    Some((contract.as_type()?, implementation.as_type()?))
}

/// Contract and implementation members (with declaring types) of a matched
/// member node
#[allow(clippy::type_complexity)]
pub(crate) fn matched_members<'a>(
    node: &'a MappingNode<'a>,
) -> Option<(
    (&'a crate::model::TypeDef, &'a crate::model::MemberDef),
    (&'a crate::model::TypeDef, &'a crate::model::MemberDef),
)> {
    let (contract, implementation) = node.matched()?;
    Some((contract.as_member()?, implementation.as_member()?))
}
