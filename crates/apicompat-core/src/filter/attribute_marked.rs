use super::SurfaceFilter;
use crate::model::{AttributeDef, Element};

/// Excludes elements carrying an attribute of one exact type name, on top of
/// whatever the wrapped filter already excludes.
///
/// A member is also excluded when its declaring type carries the attribute.
#[derive(Debug, Clone)]
pub struct AttributeMarkedFilter<F> {
    inner: F,
    attribute_type: String,
}

impl<F: SurfaceFilter> AttributeMarkedFilter<F> {
    pub fn new(inner: F, attribute_type: impl Into<String>) -> Self {
        Self {
            inner,
            attribute_type: attribute_type.into(),
        }
    }

    pub fn attribute_type(&self) -> &str {
        &self.attribute_type
    }

    fn is_marked(&self, attributes: &[AttributeDef]) -> bool {
        attributes.iter().any(|a| a.type_name == self.attribute_type)
    }
}

impl<F: SurfaceFilter> SurfaceFilter for AttributeMarkedFilter<F> {
    fn include(&self, element: Element<'_>) -> bool {
        if !self.inner.include(element) {
            return false;
        }
        match element {
            Element::Member(ty, member) => {
                !self.is_marked(&ty.attributes) && !self.is_marked(&member.attributes)
            }
            other => !self.is_marked(other.attributes()),
        }
    }

    fn include_attribute(&self, attribute: &AttributeDef) -> bool {
        self.inner.include_attribute(attribute)
    }

    fn is_reachable(&self, element: Element<'_>) -> bool {
        self.inner.is_reachable(element)
    }

    fn include_forwarded_types(&self) -> bool {
        self.inner.include_forwarded_types()
    }
}
