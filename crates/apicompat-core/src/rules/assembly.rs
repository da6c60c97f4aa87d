use std::cmp::Ordering;

use super::{DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::MappingNode;
use crate::model::ElementKind;

/// The implementation must not carry a lower version than the contract.
pub struct AssemblyIdentityMustMatch;

impl DifferenceRule for AssemblyIdentityMustMatch {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("AssemblyIdentityMustMatch", &[ElementKind::Assembly])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        let Some((contract, implementation)) = node.matched() else {
            return Vec::new();
        };
        let (Some(contract), Some(implementation)) =
            (contract.as_assembly(), implementation.as_assembly())
        else {
            return Vec::new();
        };

        if implementation.compare_version(contract) != Ordering::Less {
            return Vec::new();
        }
        vec![Difference::new(
            self.metadata().name,
            DifferenceType::Incompatible,
            format!(
                "Assembly '{}' has version {} in the implementation but version {} in the contract.",
                contract.name, implementation.version, contract.version
            ),
            node,
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::DefaultComparer;
    use crate::filter::{ApiFilter, FilterPolicy};
    use crate::mapping::Correspondence;
    use crate::model::{AssemblyDef, Element};

    fn run(contract: &AssemblyDef, implementation: &AssemblyDef) -> usize {
        let node = MappingNode::new(
            Correspondence::Matched {
                contract: Element::Assembly(contract),
                implementation: Element::Assembly(implementation),
            },
            vec![],
        );
        let filter = ApiFilter::new(FilterPolicy::PublicOnly);
        let ctx = RuleContext::new(&DefaultComparer, &filter, &[]);
        AssemblyIdentityMustMatch.examine(&node, &ctx).len()
    }

    #[test]
    fn test_lower_implementation_version() {
        assert_eq!(run(&AssemblyDef::new("Lib", "4.1.0.0"), &AssemblyDef::new("Lib", "4.0.9")), 1);
        assert_eq!(run(&AssemblyDef::new("Lib", "4.1"), &AssemblyDef::new("Lib", "4.1.0.0")), 0);
        assert_eq!(run(&AssemblyDef::new("Lib", "4.1"), &AssemblyDef::new("Lib", "5.0")), 0);
    }
}
