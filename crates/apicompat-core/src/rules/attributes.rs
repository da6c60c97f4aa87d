use super::{matched_members, matched_types, DifferenceRule, RuleContext, RuleMetadata};
use crate::diff::{Difference, DifferenceType};
use crate::mapping::MappingNode;
use crate::model::{AttributeDef, ElementKind};

/// Attributes the filter selects on the contract side must still be applied,
/// with the same arguments, in the implementation.
pub struct AttributesMustMatch;

impl AttributesMustMatch {
    /// Attributes of one type may repeat, so they pair as a multiset: exact
    /// (type, arguments) matches are consumed first, then leftovers of the
    /// same type are reported as changed, then the rest as missing.
    fn compare<'a>(
        &self,
        node: &'a MappingNode<'a>,
        ctx: &RuleContext<'_>,
        contract: &[AttributeDef],
        implementation: &[AttributeDef],
    ) -> Vec<Difference<'a>> {
        let same_type =
            |c: &AttributeDef, i: &AttributeDef| ctx.comparer.same_type_reference(&c.type_name, &i.type_name);
        let mut used = vec![false; implementation.len()];

        let mut unmatched = Vec::new();
        for attribute in contract.iter().filter(|a| ctx.filter.include_attribute(a)) {
            let exact = implementation
                .iter()
                .enumerate()
                .position(|(idx, ia)| !used[idx] && same_type(attribute, ia) && ia.arguments == attribute.arguments);
            match exact {
                Some(idx) => used[idx] = true,
                None => unmatched.push(attribute),
            }
        }

        let mut out = Vec::new();
        for attribute in unmatched {
            let leftover = implementation
                .iter()
                .enumerate()
                .position(|(idx, ia)| !used[idx] && same_type(attribute, ia));
            let message = match leftover {
                Some(idx) => {
                    used[idx] = true;
                    format!(
                        "Attribute '{}' on '{}' has arguments ({}) in the contract but ({}) in the implementation.",
                        attribute.type_name,
                        node.path(),
                        attribute.arguments.join(", "),
                        implementation[idx].arguments.join(", ")
                    )
                }
                None => format!(
                    "Attribute '{}' exists on '{}' in the contract but not in the implementation.",
                    attribute.type_name,
                    node.path()
                ),
            };
            out.push(Difference::new(
                self.metadata().name,
                DifferenceType::Incompatible,
                message,
                node,
            ));
        }
        out
    }
}

impl DifferenceRule for AttributesMustMatch {
    fn metadata(&self) -> RuleMetadata {
        RuleMetadata::new("AttributesMustMatch", &[ElementKind::Type, ElementKind::Member])
    }

    fn examine<'a>(&self, node: &'a MappingNode<'a>, ctx: &RuleContext<'_>) -> Vec<Difference<'a>> {
        if let Some((c, i)) = matched_types(node) {
            return self.compare(node, ctx, &c.attributes, &i.attributes);
        }
        if let Some(((_, c), (_, i))) = matched_members(node) {
            return self.compare(node, ctx, &c.attributes, &i.attributes);
        }
        Vec::new()
    }
}
