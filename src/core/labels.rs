//! Label table construction from the LaTeX aux file
//!
//! A prior `pdflatex` pass writes resolved numbering into the `.aux` file as
//! `\newlabel{name}{{display}{page}...}` records. This module scans those
//! records into a read-only map from label name to display text, which the
//! reference resolver consumes. Malformed records are skipped, never fatal.

use fxhash::FxHashMap;
use lazy_static::lazy_static;
use regex::Regex;

/// Mapping from label name to its resolved, human-readable display text.
pub type LabelTable = FxHashMap<String, String>;

const NEWLABEL_MARKER: &str = "\\newlabel{";

/// Categorical tag derived from a label's name prefix.
///
/// Drives the textual template used when rendering a resolved reference:
/// figure labels render as "그림 N", section labels as "제N조", chapter
/// labels as "제N장"; item and generic labels pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceClass {
    Figure,
    Section,
    Item,
    Chapter,
    Generic,
}

impl ReferenceClass {
    /// Classify a label by its name prefix.
    pub fn of(label: &str) -> Self {
        if label.starts_with("fig:") {
            ReferenceClass::Figure
        } else if label.starts_with("section:") {
            ReferenceClass::Section
        } else if label.starts_with("item:") {
            ReferenceClass::Item
        } else if label.starts_with("chapter:") {
            ReferenceClass::Chapter
        } else {
            ReferenceClass::Generic
        }
    }

    /// Render the display phrase for a resolved reference value.
    pub fn display(&self, value: &str) -> String {
        match self {
            ReferenceClass::Figure => format!("그림 {}", value),
            ReferenceClass::Section => format!("제{}조", value),
            ReferenceClass::Chapter => format!("제{}장", value),
            ReferenceClass::Item | ReferenceClass::Generic => value.to_string(),
        }
    }
}

/// Derive the URL-fragment-safe anchor for a label name.
///
/// The same derivation is used at reference sites (`\hyperlink`) and at
/// target-definition sites (`\hypertarget`), so the two always pair up
/// without a separate lookup table.
pub fn anchor_for(label: &str) -> String {
    label.replace(':', "-").replace(' ', "-")
}

/// Build the label table from raw aux-file text.
///
/// Scans for `\newlabel{` records. Cross-reference-only records (names
/// containing `@cref`) duplicate the plain record and are skipped so they
/// never overwrite it. Records without a following brace group, or with an
/// unbalanced one, are skipped and the scan resumes after the name's close
/// brace.
pub fn parse_label_table(aux: &str) -> LabelTable {
    lazy_static! {
        static ref RELAX_RE: Regex = Regex::new(r"\\relax\s*").unwrap();
    }

    let mut labels = LabelTable::default();
    let mut pos = 0;

    while let Some(rel) = aux[pos..].find(NEWLABEL_MARKER) {
        let idx = pos + rel;
        let name_start = idx + NEWLABEL_MARKER.len();

        let name_end = match aux[name_start..].find('}') {
            Some(rel_end) => name_start + rel_end,
            None => break,
        };
        let label_name = &aux[name_start..name_end];

        if label_name.contains("@cref") {
            pos = name_end + 1;
            continue;
        }

        let first_brace = name_end + 1;
        if let Some((outer, _)) = super::braces::parse_nested_braces(aux, first_brace) {
            if let Some((inner, _)) = super::braces::parse_nested_braces(outer, 0) {
                if !inner.is_empty() {
                    let display = inner.replace("{}", "");
                    let display = RELAX_RE.replace_all(&display, "");
                    let display = display.replace('~', " ").replace(['{', '}'], "");
                    labels.insert(label_name.to_string(), display.trim().to_string());
                }
            }
        }

        pos = name_end + 1;
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_label() {
        let aux = r"\newlabel{fig:test}{{1}{3}{caption text}{figure.1}{}}";
        let table = parse_label_table(aux);
        assert_eq!(table.get("fig:test").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_cref_entry_skipped() {
        let aux = concat!(
            r"\newlabel{section:intro}{{2}{4}}",
            "\n",
            r"\newlabel{section:intro@cref}{{[section][2][]2}{[1][4][]4}}",
        );
        let table = parse_label_table(aux);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("section:intro").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_display_normalization() {
        let aux = r"\newlabel{item:a}{{3.1\relax {}~x}{7}}";
        let table = parse_label_table(aux);
        assert_eq!(table.get("item:a").map(String::as_str), Some("3.1 x"));
    }

    #[test]
    fn test_malformed_entry_skipped() {
        // First record has no value group; scan must still pick up the next one.
        let aux = concat!(
            r"\newlabel{broken}",
            "\n",
            r"\newlabel{fig:ok}{{5}{9}}",
        );
        let table = parse_label_table(aux);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("fig:ok").map(String::as_str), Some("5"));
    }

    #[test]
    fn test_unbalanced_tail_is_not_fatal() {
        let aux = "\\newlabel{good}{{6}{1}}\n\\newlabel{bad}{{1}{2}";
        let table = parse_label_table(aux);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("good").map(String::as_str), Some("6"));
    }

    #[test]
    fn test_reference_class_prefixes() {
        assert_eq!(ReferenceClass::of("fig:engine"), ReferenceClass::Figure);
        assert_eq!(ReferenceClass::of("section:rules"), ReferenceClass::Section);
        assert_eq!(ReferenceClass::of("chapter:one"), ReferenceClass::Chapter);
        assert_eq!(ReferenceClass::of("item:3"), ReferenceClass::Item);
        assert_eq!(ReferenceClass::of("eq:main"), ReferenceClass::Generic);
    }

    #[test]
    fn test_class_display_templates() {
        assert_eq!(ReferenceClass::Figure.display("4"), "그림 4");
        assert_eq!(ReferenceClass::Section.display("12"), "제12조");
        assert_eq!(ReferenceClass::Chapter.display("2"), "제2장");
        assert_eq!(ReferenceClass::Item.display("3.1"), "3.1");
        assert_eq!(ReferenceClass::Generic.display("x"), "x");
    }

    #[test]
    fn test_anchor_derivation() {
        assert_eq!(anchor_for("fig:test"), "fig-test");
        assert_eq!(anchor_for("fig:two words"), "fig-two-words");
        assert_eq!(anchor_for("plain"), "plain");
    }
}
