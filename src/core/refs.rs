//! Cross-reference resolution
//!
//! Rewrites `\ref`/`\cref`/`\Cref` macros into `\hyperlink` markup before
//! pandoc ever sees the document, since pandoc has no notion of the resolved
//! values stored in the aux file. Output contains no `\ref`-family macros, so
//! running the resolver twice is a no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::labels::{anchor_for, LabelTable, ReferenceClass};
use super::ConversionWarning;

lazy_static! {
    static ref CREF_RE: Regex = Regex::new(r"\\[cC]ref\{([^}]+)\}").unwrap();
    static ref REF_RE: Regex = Regex::new(r"\\ref\{([^}]+)\}").unwrap();
    static ref PAGEREF_RE: Regex = Regex::new(r"\\pageref\{([^}]+)\}").unwrap();
}

fn make_link(label: &str, text: &str) -> String {
    format!("\\hyperlink{{{}}}{{{}}}", anchor_for(label), text)
}

/// Replace all reference macros with `\hyperlink` markup.
///
/// Labels missing from the table render a bracketed fallback containing the
/// raw label name; resolution never fails. `\pageref` is dropped entirely
/// because page numbers have no meaning in reflowed HTML.
pub fn resolve_references(
    tex: &str,
    labels: &LabelTable,
    warnings: &mut Vec<ConversionWarning>,
) -> String {
    let mut display_for = |label: &str| -> String {
        match labels.get(label) {
            Some(value) => value.clone(),
            None => {
                warnings.push(ConversionWarning::unresolved_label(label));
                format!("[{}]", label)
            }
        }
    };

    let out = CREF_RE.replace_all(tex, |caps: &Captures| {
        let label = &caps[1];
        let value = display_for(label);
        make_link(label, &ReferenceClass::of(label).display(&value))
    });

    let out = REF_RE.replace_all(&out, |caps: &Captures| {
        let label = &caps[1];
        let value = display_for(label);
        make_link(label, &value)
    });

    PAGEREF_RE.replace_all(&out, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::labels::parse_label_table;
    use pretty_assertions::assert_eq;

    fn table() -> LabelTable {
        parse_label_table(concat!(
            r"\newlabel{fig:test}{{1}{3}}",
            "\n",
            r"\newlabel{section:safety}{{4}{10}}",
            "\n",
            r"\newlabel{chapter:intro}{{2}{1}}",
            "\n",
            r"\newlabel{item:rule}{{3.2}{5}}",
        ))
    }

    #[test]
    fn test_figure_cref() {
        let mut warnings = Vec::new();
        let out = resolve_references(r"see \cref{fig:test}", &table(), &mut warnings);
        assert_eq!(out, r"see \hyperlink{fig-test}{그림 1}");
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_section_and_chapter_cref() {
        let mut warnings = Vec::new();
        let out = resolve_references(
            r"\Cref{section:safety}, \cref{chapter:intro}",
            &table(),
            &mut warnings,
        );
        assert_eq!(out, r"\hyperlink{section-safety}{제4조}, \hyperlink{chapter-intro}{제2장}");
    }

    #[test]
    fn test_item_cref_passes_value_through() {
        let mut warnings = Vec::new();
        let out = resolve_references(r"\cref{item:rule}", &table(), &mut warnings);
        assert_eq!(out, r"\hyperlink{item-rule}{3.2}");
    }

    #[test]
    fn test_plain_ref() {
        let mut warnings = Vec::new();
        let out = resolve_references(r"\ref{fig:test}", &table(), &mut warnings);
        assert_eq!(out, r"\hyperlink{fig-test}{1}");
    }

    #[test]
    fn test_missing_label_fallback() {
        let mut warnings = Vec::new();
        let out = resolve_references(r"\ref{fig:nope}", &table(), &mut warnings);
        assert_eq!(out, r"\hyperlink{fig-nope}{[fig:nope]}");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_pageref_dropped() {
        let mut warnings = Vec::new();
        let out = resolve_references(r"p. \pageref{fig:test} end", &table(), &mut warnings);
        assert_eq!(out, "p.  end");
    }

    #[test]
    fn test_idempotent() {
        let mut warnings = Vec::new();
        let once = resolve_references(
            r"\cref{fig:test} and \ref{section:safety}",
            &table(),
            &mut warnings,
        );
        let twice = resolve_references(&once, &table(), &mut warnings);
        assert_eq!(once, twice);
    }
}
