//! Report sinks receive labeled sections of difference lines and a trailer.

use std::io::Write;

use crate::diff::Difference;
use crate::errors::{ExError, ExErrorKind};

pub const TOTAL_PREFIX: &str = "Total Issues:";

pub trait ReportSink {
    /// Write one labeled section.
    ///
    /// # Errors
    ///
    /// `ReportSink` when the underlying output fails.
    fn write_section(&mut self, header: &str, differences: &[Difference<'_>]) -> Result<(), ExError>;

    /// Write the run trailer.
    ///
    /// # Errors
    ///
    /// `ReportSink` when the underlying output fails.
    fn write_total(&mut self, total: usize) -> Result<(), ExError>;
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write_section(&mut self, header: &str, differences: &[Difference<'_>]) -> Result<(), ExError> {
        (**self).write_section(header, differences)
    }

    fn write_total(&mut self, total: usize) -> Result<(), ExError> {
        (**self).write_total(total)
    }
}

fn sink_error(op: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::ReportSink)
        .with_op(op)
        .with_message(err.to_string())
}

/// Writes report lines to any `io::Write`
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn write_section(&mut self, header: &str, differences: &[Difference<'_>]) -> Result<(), ExError> {
        writeln!(self.writer, "{}", header).map_err(|e| sink_error("write_section", e))?;
        for difference in differences {
            writeln!(self.writer, "{}", difference).map_err(|e| sink_error("write_section", e))?;
        }
        Ok(())
    }

    fn write_total(&mut self, total: usize) -> Result<(), ExError> {
        writeln!(self.writer, "{} {}", TOTAL_PREFIX, total).map_err(|e| sink_error("write_total", e))?;
        self.writer.flush().map_err(|e| sink_error("write_total", e))
    }
}

/// One section as recorded by [`MemorySink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    pub header: String,
    pub lines: Vec<String>,
}

/// Keeps the report in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySink {
    pub sections: Vec<ReportSection>,
    pub total: Option<usize>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All difference lines in emission order
    pub fn lines(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect()
    }

    /// The report as [`WriterSink`] would have written it
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push_str(&section.header);
            out.push('\n');
            for line in &section.lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        if let Some(total) = self.total {
            out.push_str(&format!("{} {}\n", TOTAL_PREFIX, total));
        }
        out
    }
}

impl ReportSink for MemorySink {
    fn write_section(&mut self, header: &str, differences: &[Difference<'_>]) -> Result<(), ExError> {
        self.sections.push(ReportSection {
            header: header.to_string(),
            lines: differences.iter().map(ToString::to_string).collect(),
        });
        Ok(())
    }

    fn write_total(&mut self, total: usize) -> Result<(), ExError> {
        self.total = Some(total);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::DifferenceType;
    use crate::mapping::{Correspondence, MappingNode};
    use crate::model::{Element, TypeDef};

    #[test]
    fn test_writer_and_memory_sinks_agree() {
        let ty = TypeDef::class("W");
        let node = MappingNode::new(Correspondence::Removed(Element::Type(&ty)), vec![]);
        let diffs = vec![Difference::new("TypesMustExist", DifferenceType::Incompatible, "gone", &node)];

        let mut writer = WriterSink::new(Vec::new());
        writer.write_section("Compat issues with assembly Lib:", &diffs).unwrap();
        writer.write_total(1).unwrap();

        let mut memory = MemorySink::new();
        memory.write_section("Compat issues with assembly Lib:", &diffs).unwrap();
        memory.write_total(1).unwrap();

        let written = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(written, memory.render());
        assert_eq!(
            written,
            "Compat issues with assembly Lib:\nTypesMustExist : W : gone\nTotal Issues: 1\n"
        );
    }
}
