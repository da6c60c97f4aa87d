use apicompat_core_types::RunId;
use thiserror::Error;

/// Result type alias using ApiCompatError
pub type Result<T> = std::result::Result<T, ApiCompatError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers can match on without
/// parsing messages. Differences between API surfaces are never errors; they
/// are ordinary output of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    BaselineNotFound,
    RemapFileNotFound,
    InvalidBaseline,
    InvalidRemap,
    InvalidConfig,
    InvalidSurface,

    // Resolution
    MissingImplementation,
    VersionMismatch,

    // Output
    ReportSink,

    // Integration/IO
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::BaselineNotFound => "ERR_BASELINE_NOT_FOUND",
            ExErrorKind::RemapFileNotFound => "ERR_REMAP_FILE_NOT_FOUND",
            ExErrorKind::InvalidBaseline => "ERR_INVALID_BASELINE",
            ExErrorKind::InvalidRemap => "ERR_INVALID_REMAP",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::InvalidSurface => "ERR_INVALID_SURFACE",
            ExErrorKind::MissingImplementation => "ERR_MISSING_IMPLEMENTATION",
            ExErrorKind::VersionMismatch => "ERR_VERSION_MISMATCH",
            ExErrorKind::ReportSink => "ERR_REPORT_SINK",
            ExErrorKind::Io => "ERR_IO",
        }
    }

    /// True for kinds raised while setting up a run, before any traversal.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ExErrorKind::BaselineNotFound
                | ExErrorKind::RemapFileNotFound
                | ExErrorKind::InvalidBaseline
                | ExErrorKind::InvalidRemap
                | ExErrorKind::InvalidConfig
                | ExErrorKind::InvalidSurface
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling and optional context
/// (operation, path, run) for diagnostics.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    run_id: Option<RunId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            run_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add a file or element path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add run correlation
    pub fn with_run_id(mut self, run_id: RunId) -> Self {
        self.run_id = Some(run_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the run correlation, if any
    pub fn run_id(&self) -> Option<&RunId> {
        self.run_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }

    /// Whether this error was raised while configuring a run
    pub fn is_configuration_error(&self) -> bool {
        self.kind.is_configuration()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain failures raised while preparing or running a comparison
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiCompatError {
    /// A baseline path was configured but the file does not exist
    #[error("Baseline file {path} was not found")]
    BaselineNotFound { path: String },

    /// A remap path was configured but the file does not exist
    #[error("Remap file {path} was not found")]
    RemapFileNotFound { path: String },

    /// A baseline record could not be resolved to a fingerprint
    #[error("Invalid baseline record at line {line}: {content}")]
    InvalidBaselineRecord { line: usize, content: String },

    /// A remap record is not an `old -> new` pair
    #[error("Invalid remap record at line {line}: {content}")]
    InvalidRemapRecord { line: usize, content: String },

    /// The same old name is remapped to two different targets
    #[error("Conflicting remap for '{old}': '{first}' and '{second}'")]
    ConflictingRemap {
        old: String,
        first: String,
        second: String,
    },

    /// A contract assembly has no implementation counterpart
    #[error("Implementation assembly '{assembly}' was not found")]
    MissingImplementation { assembly: String },

    /// The implementation assembly version is lower than the contract's
    #[error(
        "Implementation assembly '{assembly}' has version {implementation}, lower than contract version {contract}"
    )]
    VersionMismatch {
        assembly: String,
        contract: String,
        implementation: String,
    },
}

impl From<ApiCompatError> for ExError {
    fn from(err: ApiCompatError) -> Self {
        let kind = match &err {
            ApiCompatError::BaselineNotFound { .. } => ExErrorKind::BaselineNotFound,
            ApiCompatError::RemapFileNotFound { .. } => ExErrorKind::RemapFileNotFound,
            ApiCompatError::InvalidBaselineRecord { .. } => ExErrorKind::InvalidBaseline,
            ApiCompatError::InvalidRemapRecord { .. } | ApiCompatError::ConflictingRemap { .. } => {
                ExErrorKind::InvalidRemap
            }
            ApiCompatError::MissingImplementation { .. } => ExErrorKind::MissingImplementation,
            ApiCompatError::VersionMismatch { .. } => ExErrorKind::VersionMismatch,
        };
        let path = match &err {
            ApiCompatError::BaselineNotFound { path } | ApiCompatError::RemapFileNotFound { path } => {
                Some(path.clone())
            }
            ApiCompatError::MissingImplementation { assembly }
            | ApiCompatError::VersionMismatch { assembly, .. } => Some(assembly.clone()),
            _ => None,
        };
        let ex = ExError::new(kind).with_message(err.to_string());
        match path {
            Some(path) => ex.with_path(path),
            None => ex,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(ExErrorKind::BaselineNotFound.code(), "ERR_BASELINE_NOT_FOUND");
        assert_eq!(ExErrorKind::RemapFileNotFound.code(), "ERR_REMAP_FILE_NOT_FOUND");
        assert_eq!(ExErrorKind::Io.code(), "ERR_IO");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(ExErrorKind::BaselineNotFound.is_configuration());
        assert!(ExErrorKind::InvalidRemap.is_configuration());
        assert!(!ExErrorKind::MissingImplementation.is_configuration());
        assert!(!ExErrorKind::ReportSink.is_configuration());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("open_report")
            .with_path("out.txt")
            .with_message("denied");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_IO]"));
        assert!(rendered.contains("open_report"));
        assert!(rendered.contains("out.txt"));
        assert!(rendered.contains("denied"));
    }

    #[test]
    fn test_domain_error_conversion() {
        let err: ExError = ApiCompatError::BaselineNotFound {
            path: "baseline.txt".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ExErrorKind::BaselineNotFound);
        assert_eq!(err.path(), Some("baseline.txt"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_source_chain() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk");
        let outer = ExError::new(ExErrorKind::ReportSink).with_source(inner);
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(std::error::Error::source(&outer).is_some());
    }
}
