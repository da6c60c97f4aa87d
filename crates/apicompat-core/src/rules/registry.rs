use super::{DifferenceRule, RuleContext};
use crate::diff::Difference;
use crate::mapping::MappingNode;

/// Explicitly assembled set of rules
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn DifferenceRule>>,
}

impl RuleRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in rule
    pub fn builtin() -> Self {
        Self::new()
            .with_rule(super::assembly::AssemblyIdentityMustMatch)
            .with_rule(super::existence::TypesMustExist)
            .with_rule(super::existence::MembersMustExist)
            .with_rule(super::type_rules::CannotReduceVisibility)
            .with_rule(super::type_rules::CannotChangeTypeKind)
            .with_rule(super::type_rules::CannotSealType)
            .with_rule(super::type_rules::CannotMakeTypeAbstract)
            .with_rule(super::type_rules::CannotRemoveBaseTypeOrInterface)
            .with_rule(super::attributes::AttributesMustMatch)
            .with_rule(super::member_rules::CannotAddAbstractMembers)
            .with_rule(super::member_rules::InterfacesShouldHaveSameMembers)
            .with_rule(super::member_rules::CannotMakeMemberNonVirtual)
            .with_rule(super::member_rules::CannotMakeMemberAbstract)
            .with_rule(super::member_rules::CannotChangeStaticness)
            .with_rule(super::member_rules::EnumValuesMustMatch)
            .with_rule(super::member_rules::ParameterNamesMustMatch)
            .with_rule(super::mdil::CannotChangeValueTypeLayout)
            .with_rule(super::mdil::CannotAddVirtualMembers)
    }

    pub fn with_rule(mut self, rule: impl DifferenceRule + 'static) -> Self {
        self.register(rule);
        self
    }

    pub fn register(&mut self, rule: impl DifferenceRule + 'static) {
        self.rules.push(Box::new(rule));
    }

    /// Sorted, de-duplicated rule names. Performs no diffing.
    pub fn list_rules(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.rules.iter().map(|r| r.metadata().name).collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules enabled for the given mode
    pub fn dispatcher(&self, mdil: bool) -> RuleDispatcher<'_> {
        RuleDispatcher {
            rules: self
                .rules
                .iter()
                .map(|r| r.as_ref())
                .filter(|r| mdil || !r.metadata().mdil_only)
                .collect(),
        }
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.list_rules())
            .finish()
    }
}

/// Runs the enabled rules on mapping nodes
pub struct RuleDispatcher<'r> {
    rules: Vec<&'r dyn DifferenceRule>,
}

impl RuleDispatcher<'_> {
    /// Differences from every enabled rule that applies to the node's kind
    pub fn dispatch<'a>(
        &self,
        node: &'a MappingNode<'a>,
        ctx: &RuleContext<'_>,
    ) -> Vec<Difference<'a>> {
        let kind = node.kind();
        self.rules
            .iter()
            .filter(|rule| rule.metadata().applies(kind))
            .flat_map(|rule| rule.examine(node, ctx))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
