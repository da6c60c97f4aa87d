use apicompat_core_types::schema::EVENT_FLUSH;

use crate::diff::{classify, Difference, DifferenceFilter, MappingDifferenceFilter};
use crate::errors::ExError;
use crate::mapping::{MappingNode, MappingState};
use crate::report::ReportSink;
use crate::rules::{RuleContext, RuleDispatcher};
use crate::settings::RunSettings;

/// Names of the two compared sets, used in flat section headers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunLabels {
    pub contract_set: String,
    pub implementation_set: String,
}

impl RunLabels {
    pub fn new(contract_set: impl Into<String>, implementation_set: impl Into<String>) -> Self {
        Self {
            contract_set: contract_set.into(),
            implementation_set: implementation_set.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// No reportable differences
    Success,
    /// At least one difference survived filtering and the baseline
    DifferencesFound,
}

impl RunStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Success)
    }
}

/// Result of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub total_issues: usize,
    /// Differences removed by the baseline
    pub suppressed: usize,
    pub status: RunStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Accumulating,
    Flushed,
}

/// Walks groups of mapping nodes and writes their reportable differences.
///
/// Groups are processed one after another: the buffer is empty whenever a
/// group starts, and is emptied when the group's section is flushed.
pub struct ReportDriver<'s, 'a> {
    settings: &'s RunSettings,
    dispatcher: RuleDispatcher<'s>,
    mapping_filter: MappingDifferenceFilter<'s>,
    state: DriverState,
    buffer: Vec<Difference<'a>>,
    total: usize,
    suppressed: usize,
}

impl<'s, 'a> ReportDriver<'s, 'a> {
    pub fn new(settings: &'s RunSettings) -> Self {
        Self {
            settings,
            dispatcher: settings.registry().dispatcher(settings.mdil()),
            mapping_filter: MappingDifferenceFilter::new(settings.filter()),
            state: DriverState::Flushed,
            buffer: Vec::new(),
            total: 0,
            suppressed: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Drive the whole forest, one section per assembly or a single flat one.
    ///
    /// # Errors
    ///
    /// Propagates sink failures.
    pub fn run(
        mut self,
        forest: &'a [MappingNode<'a>],
        labels: &RunLabels,
        sink: &mut dyn ReportSink,
    ) -> Result<RunOutcome, ExError> {
        if self.settings.group_by_assembly() {
            for assembly in forest {
                self.begin_group();
                self.visit(assembly, &mut Vec::new());
                let header = format!("Compat issues with assembly {}:", assembly.path());
                self.end_group(&header, sink)?;
            }
        } else {
            self.begin_group();
            for assembly in forest {
                self.visit(assembly, &mut Vec::new());
            }
            let header = format!(
                "Compat issues between contract set {} and implementation set {}:",
                labels.contract_set, labels.implementation_set
            );
            self.end_group(&header, sink)?;
        }
        self.finish(sink)
    }

    fn begin_group(&mut self) {
        debug_assert!(self.buffer.is_empty(), "group started with a non-empty buffer");
        self.state = DriverState::Accumulating;
    }

    fn visit(&mut self, node: &'a MappingNode<'a>, ancestors: &mut Vec<MappingState>) {
        let ctx = RuleContext::new(self.settings.comparer(), self.settings.filter(), ancestors);
        for difference in self.dispatcher.dispatch(node, &ctx) {
            let difference = classify(difference);
            if !self.mapping_filter.include(&difference)
                || !self.settings.report_filter().include(&difference)
            {
                continue;
            }
            if let Some(baseline) = self.settings.baseline() {
                if !baseline.passes(&difference) {
                    self.suppressed += 1;
                    continue;
                }
            }
            self.buffer.push(difference);
        }

        ancestors.push(node.state());
        for child in node.children() {
            self.visit(child, ancestors);
        }
        ancestors.pop();
    }

    fn end_group(&mut self, header: &str, sink: &mut dyn ReportSink) -> Result<(), ExError> {
        if !self.buffer.is_empty() {
            tracing::debug!(
                event = EVENT_FLUSH,
                group = header,
                group_issues = self.buffer.len(),
                "Flushing section"
            );
            sink.write_section(header, &self.buffer)?;
            self.total += self.buffer.len();
            self.buffer.clear();
        }
        self.state = DriverState::Flushed;
        Ok(())
    }

    fn finish(self, sink: &mut dyn ReportSink) -> Result<RunOutcome, ExError> {
        sink.write_total(self.total)?;
        let status = if self.total > 0 {
            RunStatus::DifferencesFound
        } else {
            RunStatus::Success
        };
        Ok(RunOutcome {
            total_issues: self.total,
            suppressed: self.suppressed,
            status,
        })
    }
}
