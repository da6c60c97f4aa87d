use std::fs;
use std::path::Path;

use apicompat_core::Baseline;

use crate::errors::{baseline_not_found, io_error, parse_failure, Result};

/// Load the baseline for a run.
///
/// No path (or an empty one) means no baseline.
///
/// # Errors
///
/// - `BaselineNotFound` when the path is set but the file is absent
/// - `InvalidBaseline` for a malformed record
/// - `Io` when the file cannot be read
pub fn load_baseline(path: Option<&Path>) -> Result<Option<Baseline>> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Err(baseline_not_found(path));
    }

    let text = fs::read_to_string(path).map_err(|e| io_error("load_baseline", path, e))?;
    let baseline = Baseline::parse(&text).map_err(|e| parse_failure("load_baseline", path, e))?;
    tracing::debug!(path = %path.display(), entries = baseline.len(), "Loaded baseline");
    Ok(Some(baseline))
}
