use super::{matched_members, matched_types, DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::MappingNode;
use crate::model::{ElementKind, TypeKind, Visibility};

/// Visibility of a type or member must not shrink.
pub struct CannotReduceVisibility;

impl CannotReduceVisibility {
    fn check<'a>(
        &self,
        node: &'a MappingNode<'a>,
        label: &str,
        contract: Visibility,
        implementation: Visibility,
    ) -> Vec<Difference<'a>> {
        if implementation.exposure() >= contract.exposure() {
            return Vec::new();
        }
        vec![Difference::new(
            self.metadata().name,
            DifferenceType::Incompatible,
            format!(
                "Visibility of {} '{}' is reduced from '{}' in the contract to '{}' in the implementation.",
                label,
                node.path(),
                contract.as_str(),
                implementation.as_str()
            ),
            node,
        )]
    }
}

impl DifferenceRule for CannotReduceVisibility {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new(
            "CannotReduceVisibility",
            &[ElementKind::Type, ElementKind::Member],
        )
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if let Some((c, i)) = matched_types(node) {
            return self.check(node, "type", c.visibility, i.visibility);
        }
        if let Some(((_, c), (_, i))) = matched_members(node) {
            return self.check(node, "member", c.visibility, i.visibility);
        }
        Vec::new()
    }
}

/// A class must stay a class, a struct a struct, and so on.
pub struct CannotChangeTypeKind;

impl DifferenceRule for CannotChangeTypeKind {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotChangeTypeKind", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_types(node) {
            Some((c, i)) if c.kind != i.kind => vec![Difference::new(
                self.metadata().name,
                DifferenceType::Incompatible,
                format!(
                    "Type '{}' is a {} in the contract but a {} in the implementation.",
                    node.path(),
                    c.kind.as_str(),
                    i.kind.as_str()
                ),
                node,
            )],
            _ => Vec::new(),
        }
    }
}

pub struct CannotSealType;

impl DifferenceRule for CannotSealType {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotSealType", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_types(node) {
            Some((c, i)) if c.kind == TypeKind::Class && !c.is_sealed && i.is_sealed => {
                vec![Difference::new(
                    self.metadata().name,
                    DifferenceType::Incompatible,
                    format!(
                        "Type '{}' is sealed in the implementation but not sealed in the contract.",
                        node.path()
                    ),
                    node,
                )]
            }
            _ => Vec::new(),
        }
    }
}

pub struct CannotMakeTypeAbstract;

impl DifferenceRule for CannotMakeTypeAbstract {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotMakeTypeAbstract", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, _ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        match matched_types(node) {
            Some((c, i)) if c.kind == TypeKind::Class && !c.is_abstract && i.is_abstract => {
                vec![Difference::new(
                    self.metadata().name,
                    DifferenceType::Incompatible,
                    format!(
                        "Type '{}' is abstract in the implementation but is not abstract in the contract.",
                        node.path()
                    ),
                    node,
                )]
            }
            _ => Vec::new(),
        }
    }
}

/// Base types and interfaces of the contract type must still be inherited.
pub struct CannotRemoveBaseTypeOrInterface;

impl DifferenceRule for CannotRemoveBaseTypeOrInterface {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("CannotRemoveBaseTypeOrInterface", &[ElementKind::Type])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        let Some((c, i)) = matched_types(node) else {
            return Vec::new();
        };
        let mut out = Vec::new();

        if let Some(base) = &c.base_type {
            let kept = i
                .base_type
                .as_deref()
                .is_some_and(|ib| ctx.comparer.same_type_reference(base, ib));
            if !kept {
                out.push(Difference::new(
                    self.metadata().name,
                    DifferenceType::Incompatible,
                    format!(
                        "Type '{}' does not inherit from base type '{}' in the implementation but it does in the contract.",
                        node.path(),
                        base
                    ),
                    node,
                ));
            }
        }

        for interface in &c.interfaces {
            let kept = i
                .interfaces
                .iter()
                .any(|ii| ctx.comparer.same_type_reference(interface, ii));
            if !kept {
                out.push(Difference::new(
                    self.metadata().name,
                    DifferenceType::Incompatible,
                    format!(
                        "Type '{}' does not implement interface '{}' in the implementation but it does in the contract.",
                        node.path(),
                        interface
                    ),
                    node,
                ));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::DefaultComparer;
    use crate::filter::{ApiFilter, FilterPolicy};
    use crate::mapping::Correspondence;
    use crate::model::{Element, TypeDef};

    fn examine(rule: &dyn DifferenceRule, c: &TypeDef, i: &TypeDef) -> Vec<String> {
        let node = MappingNode::new(
            Correspondence::Matched {
                contract: Element::Type(c),
                implementation: Element::Type(i),
            },
            vec![],
        );
        let filter = ApiFilter::new(FilterPolicy::PublicOnly);
        let ctx = RuleContext::new(&DefaultComparer, &filter, &[]);
        rule.examine(&node, &ctx).iter().map(|d| d.message().to_string()).collect()
    }

    #[test]
    fn test_type_kind_change() {
        let msgs = examine(&CannotChangeTypeKind, &TypeDef::class("W"), &TypeDef::structure("W"));
        assert_eq!(msgs, vec!["Type 'W' is a class in the contract but a struct in the implementation."]);
    }

    #[test]
    fn test_sealing_and_abstract() {
        assert_eq!(examine(&CannotSealType, &TypeDef::class("W"), &TypeDef::class("W").sealed()).len(), 1);
        assert!(examine(&CannotSealType, &TypeDef::class("W").sealed(), &TypeDef::class("W")).is_empty());
        assert_eq!(
            examine(&CannotMakeTypeAbstract, &TypeDef::class("W"), &TypeDef::class("W").abstract_type()).len(),
            1
        );
    }

    #[test]
    fn test_visibility_reduction() {
        let c = TypeDef::class("W");
        let i = TypeDef::class("W").with_visibility(Visibility::Protected);
        assert_eq!(examine(&CannotReduceVisibility, &c, &i).len(), 1);
        assert!(examine(&CannotReduceVisibility, &i, &c).is_empty());
    }

    #[test]
    fn test_removed_interface_and_base() {
        let c = TypeDef::class("W")
            .with_base_type("Foo.Base")
            .with_interface("System.IDisposable")
            .with_interface("System.ICloneable");
        let i = TypeDef::class("W").with_interface("System.IDisposable");
        let msgs = examine(&CannotRemoveBaseTypeOrInterface, &c, &i);
        assert_eq!(msgs.len(), 2);
        assert!(msgs[1].contains("System.ICloneable"));
    }
}
