//! Run configuration, fixed once a run starts.

use crate::baseline::Baseline;
use crate::comparer::{DefaultComparer, ElementComparer, RemapComparer, RemapTable};
use crate::diff::{DifferenceFilter, DifferenceType, SeverityFilter};
use crate::filter::{ApiFilter, AttributeMarkedFilter, FilterPolicy, SurfaceFilter};
use crate::rules::RuleRegistry;

/// How assembly-level resolution problems are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolutionPolicy {
    /// A contract assembly without an implementation aborts the run
    pub fail_on_missing_implementation: bool,
    /// An implementation with a lower version aborts the run
    pub fail_on_version_mismatch: bool,
    /// Contract facades are not compared
    pub ignore_design_time_facades: bool,
}

/// Everything a run needs besides its inputs
///
/// Immutable once built and safe to share between independent runs.
pub struct RunSettings {
    comparer: Box<dyn ElementComparer>,
    filter: Box<dyn SurfaceFilter>,
    registry: RuleRegistry,
    report_filter: Box<dyn DifferenceFilter>,
    baseline: Option<Baseline>,
    mdil: bool,
    group_by_assembly: bool,
    resolution: ResolutionPolicy,
}

impl RunSettings {
    pub fn builder() -> RunSettingsBuilder {
        RunSettingsBuilder::default()
    }

    pub fn comparer(&self) -> &dyn ElementComparer {
        self.comparer.as_ref()
    }

    pub fn filter(&self) -> &dyn SurfaceFilter {
        self.filter.as_ref()
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn report_filter(&self) -> &dyn DifferenceFilter {
        self.report_filter.as_ref()
    }

    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    pub fn mdil(&self) -> bool {
        self.mdil
    }

    pub fn group_by_assembly(&self) -> bool {
        self.group_by_assembly
    }

    pub fn resolution(&self) -> ResolutionPolicy {
        self.resolution
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettingsBuilder::default().build()
    }
}

impl std::fmt::Debug for RunSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunSettings")
            .field("registry", &self.registry)
            .field("baseline_entries", &self.baseline.as_ref().map(Baseline::len))
            .field("mdil", &self.mdil)
            .field("group_by_assembly", &self.group_by_assembly)
            .field("resolution", &self.resolution)
            .finish_non_exhaustive()
    }
}

pub struct RunSettingsBuilder {
    remap: Option<RemapTable>,
    registry: Option<RuleRegistry>,
    baseline: Option<Baseline>,
    mdil: bool,
    exclude_non_browsable: bool,
    exclude_attribute: Option<String>,
    include_forwarded_types: bool,
    report_threshold: DifferenceType,
    group_by_assembly: bool,
    resolution: ResolutionPolicy,
}

impl Default for RunSettingsBuilder {
    fn default() -> Self {
        Self {
            remap: None,
            registry: None,
            baseline: None,
            mdil: false,
            exclude_non_browsable: false,
            exclude_attribute: None,
            include_forwarded_types: true,
            report_threshold: DifferenceType::Incompatible,
            group_by_assembly: true,
            resolution: ResolutionPolicy::default(),
        }
    }
}

impl RunSettingsBuilder {
    /// Compare through a remap table instead of by declared names
    pub fn remap(mut self, table: RemapTable) -> Self {
        self.remap = Some(table);
        self
    }

    /// Replace the built-in rules
    pub fn registry(mut self, registry: RuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn baseline(mut self, baseline: Baseline) -> Self {
        self.baseline = Some(baseline);
        self
    }

    pub fn mdil(mut self, enabled: bool) -> Self {
        self.mdil = enabled;
        self
    }

    pub fn exclude_non_browsable(mut self, enabled: bool) -> Self {
        self.exclude_non_browsable = enabled;
        self
    }

    pub fn exclude_attribute(mut self, attribute_type: Option<String>) -> Self {
        self.exclude_attribute = attribute_type.filter(|a| !a.trim().is_empty());
        self
    }

    pub fn include_forwarded_types(mut self, enabled: bool) -> Self {
        self.include_forwarded_types = enabled;
        self
    }

    pub fn report_threshold(mut self, threshold: DifferenceType) -> Self {
        self.report_threshold = threshold;
        self
    }

    pub fn group_by_assembly(mut self, enabled: bool) -> Self {
        self.group_by_assembly = enabled;
        self
    }

    pub fn resolution(mut self, resolution: ResolutionPolicy) -> Self {
        self.resolution = resolution;
        self
    }

    /// Filter policy implied by the mode flags. MDIL mode takes precedence
    /// over non-browsable exclusion.
    pub fn filter_policy(&self) -> FilterPolicy {
        if self.mdil {
            if self.exclude_non_browsable {
                tracing::warn!(
                    "MDIL servicing mode and non-browsable exclusion both requested; \
                     non-browsable elements will not be excluded"
                );
            }
            FilterPolicy::MdilPublicOnly
        } else if self.exclude_non_browsable {
            FilterPolicy::PublicEditorBrowsableOnly
        } else {
            FilterPolicy::PublicOnly
        }
    }

    pub fn build(self) -> RunSettings {
        let base = ApiFilter::new(self.filter_policy())
            .with_forwarded_types(self.include_forwarded_types);
        let filter: Box<dyn SurfaceFilter> = match self.exclude_attribute {
            Some(attribute_type) => Box::new(AttributeMarkedFilter::new(base, attribute_type)),
            None => Box::new(base),
        };
        let comparer: Box<dyn ElementComparer> = match self.remap {
            Some(table) => Box::new(RemapComparer::new(table)),
            None => Box::new(DefaultComparer),
        };

        RunSettings {
            comparer,
            filter,
            registry: self.registry.unwrap_or_else(RuleRegistry::builtin),
            report_filter: Box::new(SeverityFilter::new(self.report_threshold)),
            baseline: self.baseline,
            mdil: self.mdil,
            group_by_assembly: self.group_by_assembly,
            resolution: self.resolution,
        }
    }
}
