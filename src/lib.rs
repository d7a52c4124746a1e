//! tex2html - LaTeX to HTML converter with aux-file reference resolution
//!
//! Converts a constrained LaTeX dialect into a standalone HTML page while
//! preserving cross-reference semantics. References are resolved from the
//! `.aux` file *before* pandoc runs, because pandoc has no notion of the
//! dialect's custom reference macros; pandoc's raw HTML is then
//! post-processed to rebuild anchors, heading ids and a table of contents.
//!
//! The pipeline is strictly sequential:
//!
//! 1. Scan the aux file into a label table (`core::labels`)
//! 2. Rewrite reference macros into hyperlinks (`core::refs`)
//! 3. Normalize custom macros for pandoc (`core::normalize`)
//! 4. Invoke pandoc (`pandoc`)
//! 5. Post-process the HTML (`core::postprocess`)

pub mod core;
pub mod pandoc;
pub mod utils;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

pub use crate::core::labels::{anchor_for, parse_label_table, LabelTable, ReferenceClass};
pub use crate::core::normalize::{normalize_source, NumberingCounters};
pub use crate::core::postprocess::postprocess_html;
pub use crate::core::refs::resolve_references;
pub use crate::core::template::{DEFAULT_TITLE, PAGE_TEMPLATE};
pub use crate::core::{ConversionResult, ConversionWarning, WarningKind};
pub use crate::utils::error::{CliDiagnostic, ConvertError, ConvertResult, DiagnosticSeverity};

/// Options for a single conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Title metadata passed to pandoc.
    pub title: String,
    /// Keep the generated pandoc template file next to the input (debug aid).
    pub keep_template: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            keep_template: false,
        }
    }
}

/// Report of a completed file conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertReport {
    /// Path of the written HTML file.
    pub output_path: PathBuf,
    /// Number of labels found in the aux file.
    pub label_count: usize,
    /// Warnings accumulated across all stages.
    pub warnings: Vec<ConversionWarning>,
}

/// Resolve references and normalize macros, without any I/O.
///
/// This is the pure core of the pipeline (everything before pandoc): `tex`
/// is the document source, `aux` the raw aux-file text. Useful for tests and
/// for embedding the converter without touching the filesystem.
pub fn convert_source(tex: &str, aux: &str) -> ConversionResult {
    let labels = parse_label_table(aux);
    let mut warnings = Vec::new();

    let resolved = resolve_references(tex, &labels, &mut warnings);
    let mut counters = NumberingCounters::new();
    let normalized = normalize_source(&resolved, &mut counters, &mut warnings);

    ConversionResult::with_warnings(normalized, warnings)
}

/// Convert `input` (a `.tex` file with a sibling `.aux` file) into a
/// standalone HTML page at `output`.
///
/// The normalized markup is persisted to `<stem>_preprocessed.tex` next to
/// the input so pandoc can be re-run independently when debugging. Missing
/// aux file and missing pandoc executable are the only fatal errors; all
/// per-construct problems surface as warnings on the report.
pub fn convert_file(
    input: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConvertReport> {
    let aux_path = input.with_extension("aux");
    if !aux_path.exists() {
        return Err(ConvertError::aux_missing(aux_path));
    }

    let aux = fs::read_to_string(&aux_path)?;
    let labels = parse_label_table(&aux);
    let label_count = labels.len();

    let tex = fs::read_to_string(input)?;

    let mut warnings = Vec::new();
    let resolved = resolve_references(&tex, &labels, &mut warnings);
    let mut counters = NumberingCounters::new();
    let normalized = normalize_source(&resolved, &mut counters, &mut warnings);

    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("document");
    let preprocessed_path = input.with_file_name(format!("{}_preprocessed.tex", stem));
    fs::write(&preprocessed_path, &normalized)?;

    let template_path = input.with_file_name("pandoc_template.html");
    fs::write(&template_path, PAGE_TEMPLATE)?;

    let run = pandoc::run_pandoc(
        &preprocessed_path,
        output,
        &template_path,
        &options.title,
        &mut warnings,
    );
    if !options.keep_template {
        let _ = fs::remove_file(&template_path);
    }
    run?;

    // Pandoc may have produced partial output even on failure; post-process
    // whatever exists.
    let html = if output.exists() {
        fs::read_to_string(output)?
    } else {
        String::new()
    };
    fs::write(output, postprocess_html(&html))?;

    Ok(ConvertReport {
        output_path: output.to_path_buf(),
        label_count,
        warnings,
    })
}
