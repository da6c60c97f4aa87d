use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

use crate::mapping::MappingNode;

/// Severity of a difference, ordered from harmless to breaking
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceType {
    Unchanged,
    Changed,
    Added,
    Removed,
    #[default]
    Incompatible,
}

impl DifferenceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifferenceType::Unchanged => "unchanged",
            DifferenceType::Changed => "changed",
            DifferenceType::Added => "added",
            DifferenceType::Removed => "removed",
            DifferenceType::Incompatible => "incompatible",
        }
    }
}

impl fmt::Display for DifferenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DifferenceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unchanged" => Ok(DifferenceType::Unchanged),
            "changed" => Ok(DifferenceType::Changed),
            "added" => Ok(DifferenceType::Added),
            "removed" => Ok(DifferenceType::Removed),
            "incompatible" => Ok(DifferenceType::Incompatible),
            other => Err(format!(
                "unknown difference type '{}' (expected unchanged, changed, added, removed or incompatible)",
                other
            )),
        }
    }
}

/// Stable identity of a reported difference across runs
///
/// SHA-256 over `path`, `rule` and `message` separated by NUL, hex-encoded.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(path: &str, rule: &str, message: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(path.as_bytes());
        hasher.update([0u8]);
        hasher.update(rule.as_bytes());
        hasher.update([0u8]);
        hasher.update(message.as_bytes());
        Fingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One discrepancy found by a rule on a mapping node
#[derive(Debug, Clone)]
pub struct Difference<'a> {
    rule: &'static str,
    kind: DifferenceType,
    message: String,
    path: String,
    node: &'a MappingNode<'a>,
}

impl<'a> Difference<'a> {
    pub fn new(
        rule: &'static str,
        kind: DifferenceType,
        message: impl Into<String>,
        node: &'a MappingNode<'a>,
    ) -> Self {
        Self {
            rule,
            kind,
            message: message.into(),
            path: node.path(),
            node,
        }
    }

    pub fn rule(&self) -> &'static str {
        self.rule
    }

    pub fn kind(&self) -> DifferenceType {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Display path of the node the difference was raised on
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn node(&self) -> &'a MappingNode<'a> {
        self.node
    }

    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.path, self.rule, &self.message)
    }

    /// The same difference with another severity
    pub fn with_kind(self, kind: DifferenceType) -> Self {
        Self { kind, ..self }
    }
}

/// Report line: `{rule} : {path} : {message}`
impl fmt::Display for Difference<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.rule, self.path, self.message)
    }
}
