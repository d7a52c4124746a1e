//! Conversion core
//!
//! The transformation pipeline runs strictly forward:
//! aux scan -> reference resolution -> macro normalization -> (pandoc) ->
//! HTML post-processing. Every stage is a pure function of its input plus
//! the read-only label table; numbering counters live in a per-run context
//! object and are never shared.

pub mod braces;
pub mod labels;
pub mod normalize;
pub mod postprocess;
pub mod refs;
pub mod template;

use serde::Serialize;

// =============================================================================
// Warning System
// =============================================================================

/// Kind of warning generated during conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A referenced label was not found in the aux file
    UnresolvedLabel,
    /// A brace group could not be matched; the construct was left untouched
    UnmatchedBraces,
    /// The external formatter exited non-zero or wrote to stderr
    FormatterFailed,
}

impl std::fmt::Display for WarningKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WarningKind::UnresolvedLabel => write!(f, "unresolved label"),
            WarningKind::UnmatchedBraces => write!(f, "unmatched braces"),
            WarningKind::FormatterFailed => write!(f, "formatter failed"),
        }
    }
}

/// A warning generated during conversion
#[derive(Debug, Clone, Serialize)]
pub struct ConversionWarning {
    /// The kind of warning
    pub kind: WarningKind,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g., "\\color" or the label name)
    pub location: Option<String>,
}

impl ConversionWarning {
    /// Create a new warning
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        ConversionWarning {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// Add location context to the warning
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Create an unresolved label warning
    pub fn unresolved_label(label: &str) -> Self {
        ConversionWarning::new(
            WarningKind::UnresolvedLabel,
            format!("Label '{}' not found in aux file; rendered as '[{}]'", label, label),
        )
        .with_location(label.to_string())
    }

    /// Create an unmatched braces warning
    pub fn unmatched_braces(construct: &str) -> Self {
        ConversionWarning::new(
            WarningKind::UnmatchedBraces,
            format!("No matching close brace for '{}'; left unchanged", construct),
        )
        .with_location(construct.to_string())
    }

    /// Create a formatter failure warning
    pub fn formatter_failed(stderr: &str) -> Self {
        ConversionWarning::new(
            WarningKind::FormatterFailed,
            format!("pandoc reported issues:\n{}", stderr.trim_end()),
        )
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}

impl From<ConversionWarning> for crate::utils::error::CliDiagnostic {
    fn from(warning: ConversionWarning) -> Self {
        use crate::utils::error::{CliDiagnostic, DiagnosticSeverity};

        let severity = match warning.kind {
            WarningKind::UnresolvedLabel | WarningKind::FormatterFailed => {
                DiagnosticSeverity::Warning
            }
            WarningKind::UnmatchedBraces => DiagnosticSeverity::Info,
        };

        let mut diag = CliDiagnostic::new(severity, warning.kind.to_string(), warning.message);
        if let Some(loc) = warning.location {
            diag = diag.with_location(loc);
        }
        diag
    }
}

/// Result of conversion with diagnostics
#[derive(Debug, Clone)]
pub struct ConversionResult {
    /// The converted output
    pub output: String,
    /// Warnings generated during conversion
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionResult {
    /// Create a result with warnings
    pub fn with_warnings(output: String, warnings: Vec<ConversionWarning>) -> Self {
        ConversionResult { output, warnings }
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
