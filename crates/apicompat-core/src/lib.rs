//! API compatibility engine.
//!
//! Pairs the elements of a contract surface with those of an implementation
//! surface, runs difference rules over the resulting mapping tree, filters and
//! baselines the differences, and writes a grouped report.

pub mod baseline;
pub mod compare;
pub mod comparer;
pub mod diff;
pub mod errors;
pub mod filter;
pub mod logging_facility;
pub mod mapping;
pub mod model;
pub mod report;
pub mod rules;
pub mod settings;
pub mod traversal;

pub use baseline::{Baseline, BaselineEntry};
pub use compare::{list_rules, run_comparison};
pub use comparer::{DefaultComparer, ElementComparer, RemapComparer, RemapTable};
pub use diff::{Difference, DifferenceFilter, DifferenceType, Fingerprint};
pub use errors::{ApiCompatError, ExError, ExErrorKind};
pub use filter::{ApiFilter, AttributeMarkedFilter, FilterPolicy, SurfaceFilter};
pub use mapping::{build_mapping, MappingNode, MappingState};
pub use report::{MemorySink, ReportSink, WriterSink};
pub use rules::{DifferenceRule, RuleContext, RuleMetadata, RuleRegistry};
pub use settings::{ResolutionPolicy, RunSettings, RunSettingsBuilder};
pub use traversal::{RunLabels, RunOutcome, RunStatus};
