use super::{Difference, DifferenceFilter, DifferenceType};
use crate::filter::SurfaceFilter;

/// Refine the severity a rule assigned.
///
/// Direction decides whether a pure surface delta breaks callers: an element
/// missing from the implementation is incompatible, an element only the
/// implementation has is a compatible change.
pub fn classify(difference: Difference<'_>) -> Difference<'_> {
    match difference.kind() {
        DifferenceType::Removed => difference.with_kind(DifferenceType::Incompatible),
        DifferenceType::Added => difference.with_kind(DifferenceType::Changed),
        _ => difference,
    }
}

/// Drops unchanged differences and differences on elements outside the
/// reported surface
pub struct MappingDifferenceFilter<'f> {
    filter: &'f dyn SurfaceFilter,
}

impl<'f> MappingDifferenceFilter<'f> {
    pub fn new(filter: &'f dyn SurfaceFilter) -> Self {
        Self { filter }
    }
}

impl DifferenceFilter for MappingDifferenceFilter<'_> {
    fn include(&self, difference: &Difference<'_>) -> bool {
        difference.kind() != DifferenceType::Unchanged
            && difference
                .node()
                .elements()
                .all(|element| self.filter.include(element))
    }
}
