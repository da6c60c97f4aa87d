//! Opening the report output.
//!
//! The output file is retried a bounded number of times; when it still cannot
//! be opened the report goes to stdout instead and the comparison proceeds.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use apicompat_core::{ReportSink, WriterSink};

pub const DEFAULT_OPEN_RETRIES: u32 = 10;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    File(PathBuf),
    Stdout,
}

pub struct OpenedSink {
    pub sink: Box<dyn ReportSink>,
    pub target: SinkTarget,
}

/// Open the report sink with the default retry policy
pub fn open_report_sink(out_file: Option<&Path>) -> OpenedSink {
    open_report_sink_with(out_file, DEFAULT_OPEN_RETRIES, DEFAULT_RETRY_DELAY)
}

/// Open the report sink, retrying `retries` times with `delay` between
/// attempts before falling back to stdout
pub fn open_report_sink_with(out_file: Option<&Path>, retries: u32, delay: Duration) -> OpenedSink {
    let Some(path) = out_file.filter(|p| !p.as_os_str().is_empty()) else {
        return stdout_sink();
    };

    let attempts = retries.max(1);
    let mut last_error = None;
    for attempt in 1..=attempts {
        match File::create(path) {
            Ok(file) => {
                return OpenedSink {
                    sink: Box::new(WriterSink::new(BufWriter::new(file))),
                    target: SinkTarget::File(path.to_path_buf()),
                }
            }
            Err(err) => {
                tracing::debug!(
                    path = %path.display(),
                    attempt,
                    error = %err,
                    "Report file not writable yet"
                );
                last_error = Some(err);
                if attempt < attempts {
                    thread::sleep(delay);
                }
            }
        }
    }

    let reason = last_error.map(|e| e.to_string()).unwrap_or_default();
    tracing::error!(
        path = %path.display(),
        attempts,
        error = %reason,
        "Could not open report file; writing report to stdout"
    );
    stdout_sink()
}

fn stdout_sink() -> OpenedSink {
    OpenedSink {
        sink: Box::new(WriterSink::new(std::io::stdout())),
        target: SinkTarget::Stdout,
    }
}
