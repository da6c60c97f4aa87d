use std::fs;
use std::path::Path;

use apicompat_core::RemapTable;

use crate::errors::{io_error, parse_failure, remap_file_not_found, Result};

/// Load the remap table for a run.
///
/// No path (or an empty one) means names are compared as declared.
///
/// # Errors
///
/// - `RemapFileNotFound` when the path is set but the file is absent
/// - `InvalidRemap` for a malformed or conflicting record
/// - `Io` when the file cannot be read
pub fn load_remap_file(path: Option<&Path>) -> Result<Option<RemapTable>> {
    let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(None);
    };
    if !path.is_file() {
        return Err(remap_file_not_found(path));
    }

    let text = fs::read_to_string(path).map_err(|e| io_error("load_remap_file", path, e))?;
    let table = RemapTable::parse(&text).map_err(|e| parse_failure("load_remap_file", path, e))?;
    tracing::debug!(path = %path.display(), entries = table.len(), "Loaded remap file");
    Ok(Some(table))
}
