//! Error handling for tex2html conversions
//!
//! This module provides a unified error type and result type for all
//! conversion operations, plus the diagnostic type the CLI prints.

use std::fmt;
use std::path::PathBuf;

/// Conversion error type
///
/// Only hard precondition failures surface here; everything that can be
/// skipped per-construct is reported as a warning on the result instead.
#[derive(Debug, Clone)]
pub enum ConvertError {
    /// The aux file is missing - the document has not been compiled yet
    AuxFileMissing { path: PathBuf },
    /// The pandoc executable could not be found
    FormatterMissing,
    /// IO error (for file operations)
    IoError { message: String },
    /// Internal error
    InternalError { message: String },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::AuxFileMissing { path } => {
                write!(f, "Aux file not found: {}", path.display())
            }
            ConvertError::FormatterMissing => {
                write!(f, "pandoc executable not found")
            }
            ConvertError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
            ConvertError::InternalError { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConvertError {}

impl From<std::io::Error> for ConvertError {
    fn from(err: std::io::Error) -> Self {
        ConvertError::IoError {
            message: err.to_string(),
        }
    }
}

// Convenience constructors for errors
impl ConvertError {
    pub fn aux_missing(path: impl Into<PathBuf>) -> Self {
        ConvertError::AuxFileMissing { path: path.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConvertError::InternalError {
            message: message.into(),
        }
    }

    /// Remediation guidance the CLI prints alongside the error.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            ConvertError::AuxFileMissing { .. } => Some(
                "Compile the LaTeX document first (run pdflatex twice so references resolve).",
            ),
            ConvertError::FormatterMissing => {
                Some("Install pandoc and make sure it is on your PATH.")
            }
            _ => None,
        }
    }
}

/// Result type for conversion operations
pub type ConvertResult<T> = Result<T, ConvertError>;

// =============================================================================
// Unified CLI Diagnostic System
// =============================================================================

/// Severity level for CLI diagnostics (determines coloring and behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticSeverity {
    /// Critical errors (red) - e.g., missing aux file, missing pandoc
    Error,
    /// Warnings (yellow) - e.g., unresolved labels, formatter stderr
    Warning,
    /// Informational (cyan) - e.g., constructs left untouched
    Info,
}

/// Unified diagnostic type for CLI output.
///
/// Library code accumulates warnings on the result; only the CLI layer turns
/// them into diagnostics and prints them.
#[derive(Debug, Clone)]
pub struct CliDiagnostic {
    /// Severity level (for coloring)
    pub severity: DiagnosticSeverity,
    /// Warning kind as string (e.g., "unresolved label")
    pub kind: String,
    /// Human-readable message
    pub message: String,
    /// Location context (e.g., "fig:test", "\\color")
    pub location: Option<String>,
}

impl CliDiagnostic {
    /// Create a new diagnostic.
    pub fn new(
        severity: DiagnosticSeverity,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            kind: kind.into(),
            message: message.into(),
            location: None,
        }
    }

    /// Add location context.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Get ANSI color code for this diagnostic's severity.
    pub fn color_code(&self) -> &'static str {
        match self.severity {
            DiagnosticSeverity::Error => "\x1b[31m",   // red
            DiagnosticSeverity::Warning => "\x1b[33m", // yellow
            DiagnosticSeverity::Info => "\x1b[36m",    // cyan
        }
    }
}

impl fmt::Display for CliDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref loc) = self.location {
            write!(f, "[{}] {}: {}", self.kind, loc, self.message)
        } else {
            write!(f, "[{}] {}", self.kind, self.message)
        }
    }
}
