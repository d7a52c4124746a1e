//! tex2html CLI - convert a compiled LaTeX document into a standalone HTML page

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::collections::BTreeMap;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use std::process::ExitCode;
#[cfg(feature = "cli")]
use tex2html::{
    convert_file, parse_label_table, CliDiagnostic, ConvertError, ConvertOptions, ConvertReport,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "t2h")]
#[command(version)]
#[command(about = "tex2html - LaTeX to HTML converter with aux-file reference resolution", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input .tex file (must have a sibling .aux file)
    input_file: Option<PathBuf>,

    /// Output .html file (defaults to the input with .html)
    output_file: Option<PathBuf>,

    /// Title metadata passed to pandoc
    #[arg(long)]
    title: Option<String>,

    /// Keep the generated pandoc template file (debug aid)
    #[arg(long)]
    keep_template: bool,

    /// Write a JSON conversion report to this path
    #[arg(long)]
    report: Option<PathBuf>,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Convert a compiled .tex file to HTML (default action)
    Convert {
        /// Input .tex file
        input: PathBuf,

        /// Output .html file (defaults to the input with .html)
        output: Option<PathBuf>,

        /// Title metadata passed to pandoc
        #[arg(long)]
        title: Option<String>,

        /// Keep the generated pandoc template file (debug aid)
        #[arg(long)]
        keep_template: bool,

        /// Write a JSON conversion report to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Dump the label table parsed from the aux file
    Labels {
        /// Input .tex or .aux file
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            title,
            keep_template,
            report,
        }) => run_convert(input, output, title, keep_template, report),
        Some(Commands::Labels { input, json }) => run_labels(input, json),
        Some(Commands::Info) => {
            println!("tex2html {}", env!("CARGO_PKG_VERSION"));
            println!("pipeline: aux scan -> ref resolution -> macro normalization -> pandoc -> HTML post-processing");
            ExitCode::SUCCESS
        }
        None => match cli.input_file {
            Some(input) => run_convert(
                input,
                cli.output_file,
                cli.title,
                cli.keep_template,
                cli.report,
            ),
            None => {
                eprintln!("Usage: t2h convert <input.tex> [output.html]");
                eprintln!("       t2h labels <input.tex> [--json]");
                ExitCode::FAILURE
            }
        },
    }
}

#[cfg(feature = "cli")]
fn run_convert(
    input: PathBuf,
    output: Option<PathBuf>,
    title: Option<String>,
    keep_template: bool,
    report_path: Option<PathBuf>,
) -> ExitCode {
    let output = output.unwrap_or_else(|| input.with_extension("html"));

    let mut options = ConvertOptions::default();
    if let Some(title) = title {
        options.title = title;
    }
    options.keep_template = keep_template;

    match convert_file(&input, &output, &options) {
        Ok(report) => {
            print_warnings(&report);
            if let Some(path) = report_path {
                if let Err(err) = write_report(&report, &path) {
                    eprintln!("Failed to write report: {}", err);
                }
            }
            println!("HTML output saved to: {}", report.output_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            if let Some(fix) = err.remediation() {
                eprintln!("{}", fix);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(feature = "cli")]
fn print_warnings(report: &ConvertReport) {
    for warning in &report.warnings {
        let diag: CliDiagnostic = warning.clone().into();
        eprintln!("{}{}\x1b[0m", diag.color_code(), diag);
    }
}

#[cfg(feature = "cli")]
fn write_report(report: &ConvertReport, path: &PathBuf) -> Result<(), ConvertError> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| ConvertError::internal(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(feature = "cli")]
fn run_labels(input: PathBuf, json: bool) -> ExitCode {
    let aux_path = if input.extension().is_some_and(|e| e == "aux") {
        input
    } else {
        input.with_extension("aux")
    };

    if !aux_path.exists() {
        let err = ConvertError::aux_missing(aux_path);
        eprintln!("Error: {}", err);
        if let Some(fix) = err.remediation() {
            eprintln!("{}", fix);
        }
        return ExitCode::FAILURE;
    }

    let aux = match fs::read_to_string(&aux_path) {
        Ok(aux) => aux,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    // Sort for stable output; the table itself is unordered.
    let labels: BTreeMap<String, String> = parse_label_table(&aux).into_iter().collect();

    if json {
        match serde_json::to_string_pretty(&labels) {
            Ok(out) => println!("{}", out),
            Err(err) => {
                eprintln!("Error: {}", err);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for (name, display) in &labels {
            println!("{} = {}", name, display);
        }
        eprintln!("{} labels", labels.len());
    }

    ExitCode::SUCCESS
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install tex2html --features cli");
    eprintln!("  t2h convert <input.tex> [output.html]");
}
