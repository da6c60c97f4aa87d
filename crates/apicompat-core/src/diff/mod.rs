//! Differences, their severity taxonomy, and the filters applied to them.

pub mod classify;
pub mod model;

pub use classify::{classify, MappingDifferenceFilter};
pub use model::{Difference, DifferenceType, Fingerprint};

pub trait DifferenceFilter: Send + Sync {
    /// `true` keeps the difference
    fn include(&self, difference: &Difference<'_>) -> bool;
}

impl<F: DifferenceFilter + ?Sized> DifferenceFilter for Box<F> {
    fn include(&self, difference: &Difference<'_>) -> bool {
        (**self).include(difference)
    }
}

/// Keeps differences at or above a severity threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityFilter {
    threshold: DifferenceType,
}

impl SeverityFilter {
    pub fn new(threshold: DifferenceType) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> DifferenceType {
        self.threshold
    }
}

impl Default for SeverityFilter {
    fn default() -> Self {
        Self::new(DifferenceType::Incompatible)
    }
}

impl DifferenceFilter for SeverityFilter {
    fn include(&self, difference: &Difference<'_>) -> bool {
        difference.kind() >= self.threshold
    }
}
