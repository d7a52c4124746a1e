//! External formatter boundary
//!
//! Pandoc is a black-box collaborator: it turns the normalized LaTeX subset
//! into raw HTML. A missing executable is fatal (nothing can be produced);
//! a non-zero exit is only a warning and post-processing continues with
//! whatever output file exists.

use std::io;
use std::path::Path;
use std::process::{Command, Output};

use crate::core::ConversionWarning;
use crate::utils::error::{ConvertError, ConvertResult};

/// Run pandoc on the normalized source, synchronously.
pub fn run_pandoc(
    source: &Path,
    output: &Path,
    template: &Path,
    title: &str,
    warnings: &mut Vec<ConversionWarning>,
) -> ConvertResult<()> {
    let result = Command::new("pandoc")
        .arg(source)
        .args(["-f", "latex", "-t", "html5"])
        .arg("-o")
        .arg(output)
        .arg("--standalone")
        .arg("--template")
        .arg(template)
        .arg("--metadata")
        .arg(format!("title={}", title))
        .arg("--mathjax")
        .arg("--wrap=none")
        .output();

    match result {
        Ok(out) => {
            record_formatter_output(&out, warnings);
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(ConvertError::FormatterMissing),
        Err(err) => Err(err.into()),
    }
}

/// Record pandoc's outcome as warnings.
///
/// Both a non-zero exit and stderr chatter on a successful exit are
/// recoverable: pandoc routinely prints `[WARNING]` lines with status 0, and
/// post-processing continues with whatever output file was produced.
fn record_formatter_output(out: &Output, warnings: &mut Vec<ConversionWarning>) {
    if !out.status.success() || !out.stderr.is_empty() {
        warnings.push(ConversionWarning::formatter_failed(
            &String::from_utf8_lossy(&out.stderr),
        ));
    }
}
