//! Public-surface filters.
//!
//! A [`SurfaceFilter`] answers two questions about an element:
//!
//! - [`SurfaceFilter::is_reachable`]: may it take part in mapping at all
//!   (accessibility from outside the assembly, plus servicing exceptions)
//! - [`SurfaceFilter::include`]: should differences on it be reported
//!
//! Reachability is the same for the public-only and browsable-only policies,
//! so both build identical mapping trees and the browsable policy can only
//! drop reports, never add them.

pub mod attribute_marked;
pub mod policy;

pub use attribute_marked::AttributeMarkedFilter;
pub use policy::{ApiFilter, FilterPolicy};

use crate::model::{AttributeDef, Element};

pub trait SurfaceFilter: Send + Sync {
    /// Whether differences on this element belong to the reported surface
    fn include(&self, element: Element<'_>) -> bool;

    /// Whether an attribute takes part in attribute comparison
    ///
    /// Visibility policies scope elements, not the attributes they carry, so
    /// the shipped filters compare every attribute on an included element.
    fn include_attribute(&self, attribute: &AttributeDef) -> bool;

    /// Whether this element is part of the mapped surface
    fn is_reachable(&self, element: Element<'_>) -> bool;

    /// Whether type forwarders are followed to their target definitions
    fn include_forwarded_types(&self) -> bool;
}

impl<F: SurfaceFilter + ?Sized> SurfaceFilter for Box<F> {
    fn include(&self, element: Element<'_>) -> bool {
        (**self).include(element)
    }

    fn include_attribute(&self, attribute: &AttributeDef) -> bool {
        (**self).include_attribute(attribute)
    }

    fn is_reachable(&self, element: Element<'_>) -> bool {
        (**self).is_reachable(element)
    }

    fn include_forwarded_types(&self) -> bool {
        (**self).include_forwarded_types()
    }
}
