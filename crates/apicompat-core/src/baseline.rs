//! Suppression of previously accepted differences.
//!
//! A baseline file is an earlier report: one `{rule} : {path} : {message}`
//! line per accepted difference. Section headers, the `Total Issues:` trailer,
//! blank lines and `#` comments are ignored.

use std::collections::BTreeSet;

use crate::diff::{Difference, DifferenceType, Fingerprint};
use crate::errors::{ApiCompatError, Result};

const SECTION_PREFIX: &str = "Compat issues";
const TOTAL_PREFIX: &str = "Total Issues:";
const FIELD_SEPARATOR: &str = " : ";

/// One accepted difference
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BaselineEntry {
    pub rule: String,
    pub path: String,
    pub message: String,
}

impl BaselineEntry {
    pub fn new(
        rule: impl Into<String>,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule: rule.into(),
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.path, &self.rule, &self.message)
    }
}

/// The set of accepted fingerprints for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    fingerprints: BTreeSet<Fingerprint>,
}

impl Baseline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = BaselineEntry>,
    {
        Self {
            fingerprints: entries.into_iter().map(|e| e.fingerprint()).collect(),
        }
    }

    /// Parse baseline text.
    ///
    /// # Errors
    ///
    /// `InvalidBaselineRecord` for a line that is not a difference line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut entries = Vec::new();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with(SECTION_PREFIX)
                || line.starts_with(TOTAL_PREFIX)
            {
                continue;
            }
            let mut fields = line.splitn(3, FIELD_SEPARATOR);
            match (fields.next(), fields.next(), fields.next()) {
                (Some(rule), Some(path), Some(message))
                    if !rule.is_empty() && !path.is_empty() =>
                {
                    entries.push(BaselineEntry::new(rule, path, message));
                }
                _ => {
                    return Err(ApiCompatError::InvalidBaselineRecord {
                        line: idx + 1,
                        content: line.to_string(),
                    })
                }
            }
        }
        Ok(Self::from_entries(entries))
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// `true` when the difference is still reported.
    ///
    /// Only incompatible differences are ever suppressed.
    pub fn passes(&self, difference: &Difference<'_>) -> bool {
        difference.kind() != DifferenceType::Incompatible
            || !self.contains(&difference.fingerprint())
    }
}
