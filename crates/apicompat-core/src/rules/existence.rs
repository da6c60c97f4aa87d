use super::{DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::{MappingNode, MappingState};
use crate::model::ElementKind;

/// Raw existence difference for a one-sided node; the classifier decides
/// severity from the direction.
fn existence<'a>(
    rule: &'static str,
    label: &str,
    node: &'a MappingNode<'a>,
) -> Option<Difference<'a>> {
    let path = node.path();
    match node.state() {
        MappingState::Matched => None,
        MappingState::Removed => Some(Difference::new(
            rule,
            DifferenceType::Removed,
            format!(
                "{} '{}' does not exist in the implementation but it does exist in the contract.",
                label, path
            ),
            node,
        )),
        MappingState::Added => Some(Difference::new(
            rule,
            DifferenceType::Added,
            format!(
                "{} '{}' exists in the implementation but it does not exist in the contract.",
                label, path
            ),
            node,
        )),
    }
}

/// Every contract type must exist in a matched implementation assembly.
///
/// Types under a missing assembly are not reported one by one.
pub struct TypesMustExist;

impl DifferenceRule for TypesMustExist {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("TypesMustExist", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if ctx.assembly_state() != MappingState::Matched {
            return Vec::new();
        }
        existence(self.metadata().name, "Type", node).into_iter().collect()
    }
}

/// Every contract member must exist on the matched implementation type.
///
/// Members of a missing type are covered by [`TypesMustExist`].
pub struct MembersMustExist;

impl DifferenceRule for MembersMustExist {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("MembersMustExist", &[ElementKind::Member])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if ctx.parent_state() != MappingState::Matched {
            return Vec::new();
        }
        existence(self.metadata().name, "Member", node).into_iter().collect()
    }
}
