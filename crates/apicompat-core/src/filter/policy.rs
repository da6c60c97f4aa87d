use serde::{Deserialize, Serialize};

use super::SurfaceFilter;
use crate::model::attribute::has_editor_browsable_never;
use crate::model::{AttributeDef, Element, MemberDef, MemberKind, TypeDef};

/// Which elements count as public API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterPolicy {
    /// Everything reachable from outside the defining assembly
    #[default]
    PublicOnly,
    /// `PublicOnly` minus elements marked `[EditorBrowsable(Never)]`
    PublicEditorBrowsableOnly,
    /// `PublicOnly` plus members that fix servicing layout: every field of a
    /// value type and every virtual member, whatever their accessibility
    MdilPublicOnly,
}

/// The base filter selected by a [`FilterPolicy`]
#[derive(Debug, Clone, Copy)]
pub struct ApiFilter {
    policy: FilterPolicy,
    include_forwarded_types: bool,
}

impl ApiFilter {
    pub fn new(policy: FilterPolicy) -> Self {
        Self {
            policy,
            include_forwarded_types: false,
        }
    }

    pub fn with_forwarded_types(mut self, include: bool) -> Self {
        self.include_forwarded_types = include;
        self
    }

    pub fn policy(&self) -> FilterPolicy {
        self.policy
    }

    fn type_reachable(&self, ty: &TypeDef) -> bool {
        ty.visibility.is_visible_outside_assembly()
    }

    fn member_reachable(&self, ty: &TypeDef, member: &MemberDef) -> bool {
        if !self.type_reachable(ty) {
            return false;
        }
        if self.policy == FilterPolicy::MdilPublicOnly {
            let layout_field = member.kind == MemberKind::Field && ty.kind.is_value_type();
            let vtable_slot = member.is_virtual || member.is_abstract;
            if layout_field || vtable_slot {
                return true;
            }
        }
        if !member.visibility.is_visible_outside_assembly() {
            return false;
        }
        // Protected members of a sealed type cannot be reached by derivation.
        !(member.visibility.is_family_only() && ty.is_sealed)
    }
}

impl SurfaceFilter for ApiFilter {
    fn include(&self, element: Element<'_>) -> bool {
        if !self.is_reachable(element) {
            return false;
        }
        match (self.policy, element) {
            (FilterPolicy::PublicEditorBrowsableOnly, Element::Type(ty)) => {
                !has_editor_browsable_never(&ty.attributes)
            }
            (FilterPolicy::PublicEditorBrowsableOnly, Element::Member(ty, member)) => {
                !has_editor_browsable_never(&ty.attributes)
                    && !has_editor_browsable_never(&member.attributes)
            }
            _ => true,
        }
    }

    // Attributes are never filtered by policy; hidden bearers are already
    // excluded through `include`.
    fn include_attribute(&self, _attribute: &AttributeDef) -> bool {
        true
    }

    fn is_reachable(&self, element: Element<'_>) -> bool {
        match element {
            Element::Assembly(_) | Element::Namespace(_) => true,
            Element::Type(ty) => self.type_reachable(ty),
            Element::Member(ty, member) => self.member_reachable(ty, member),
        }
    }

    fn include_forwarded_types(&self) -> bool {
        self.include_forwarded_types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Visibility;

    fn public_type() -> TypeDef {
        TypeDef::class("Widget")
    }

    #[test]
    fn test_public_only_accessibility() {
        let filter = ApiFilter::new(FilterPolicy::PublicOnly);
        let ty = public_type();
        let internal_ty = TypeDef::class("Hidden").with_visibility(Visibility::Internal);
        let public_m = MemberDef::method("Run");
        let protected_m = MemberDef::method("OnRun").with_visibility(Visibility::Protected);
        let private_m = MemberDef::method("Helper").with_visibility(Visibility::Private);

        assert!(filter.include(Element::Type(&ty)));
        assert!(!filter.include(Element::Type(&internal_ty)));
        assert!(filter.include(Element::Member(&ty, &public_m)));
        assert!(filter.include(Element::Member(&ty, &protected_m)));
        assert!(!filter.include(Element::Member(&ty, &private_m)));
        assert!(!filter.include(Element::Member(&internal_ty, &public_m)));
    }

    #[test]
    fn test_protected_member_of_sealed_type_is_hidden() {
        let filter = ApiFilter::new(FilterPolicy::PublicOnly);
        let ty = public_type().sealed();
        let protected_m = MemberDef::method("OnRun").with_visibility(Visibility::Protected);
        assert!(!filter.include(Element::Member(&ty, &protected_m)));
    }

    #[test]
    fn test_browsable_only_excludes_never_browsable() {
        let filter = ApiFilter::new(FilterPolicy::PublicEditorBrowsableOnly);
        let ty = public_type();
        let hidden = MemberDef::method("Legacy").with_attribute(AttributeDef::editor_browsable_never());
        let hidden_ty = public_type().with_attribute(AttributeDef::editor_browsable_never());
        let visible = MemberDef::method("Run");

        assert!(!filter.include(Element::Member(&ty, &hidden)));
        assert!(filter.is_reachable(Element::Member(&ty, &hidden)));
        assert!(!filter.include(Element::Type(&hidden_ty)));
        assert!(!filter.include(Element::Member(&hidden_ty, &visible)));
        assert!(filter.include(Element::Member(&ty, &visible)));
    }

    #[test]
    fn test_mdil_includes_layout_and_virtual_members() {
        let filter = ApiFilter::new(FilterPolicy::MdilPublicOnly);
        let public_only = ApiFilter::new(FilterPolicy::PublicOnly);
        let st = TypeDef::structure("Point");
        let cls = public_type();
        let private_field = MemberDef::field("x", "System.Int32").with_visibility(Visibility::Private);
        let internal_virtual = MemberDef::method("Dispatch")
            .with_visibility(Visibility::Internal)
            .virtual_member();

        assert!(filter.include(Element::Member(&st, &private_field)));
        assert!(!public_only.include(Element::Member(&st, &private_field)));
        assert!(filter.include(Element::Member(&cls, &internal_virtual)));
        assert!(!filter.include(Element::Member(&cls, &private_field)));
    }

    #[test]
    fn test_attributes_are_compared_under_every_policy() {
        let never = AttributeDef::editor_browsable_never();
        let marker = AttributeDef::new("Lib.PreviewAttribute").with_argument("\"v2\"");
        for policy in [
            FilterPolicy::PublicOnly,
            FilterPolicy::PublicEditorBrowsableOnly,
            FilterPolicy::MdilPublicOnly,
        ] {
            let filter = ApiFilter::new(policy);
            assert!(filter.include_attribute(&never), "{:?}", policy);
            assert!(filter.include_attribute(&marker), "{:?}", policy);
        }
    }

    #[test]
    fn test_forwarded_types_flag() {
        assert!(!ApiFilter::new(FilterPolicy::PublicOnly).include_forwarded_types());
        assert!(ApiFilter::new(FilterPolicy::PublicOnly)
            .with_forwarded_types(true)
            .include_forwarded_types());
    }
}
