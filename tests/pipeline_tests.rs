//! Integration tests for the full tex2html conversion pipeline

use tex2html::{
    convert_source, normalize_source, parse_label_table, postprocess_html, resolve_references,
    NumberingCounters,
};

// ============================================================================
// Label Table - aux file scanning
// ============================================================================

mod label_table {
    use super::*;

    #[test]
    fn test_nested_display_value() {
        // Scenario: a label definition for fig:test whose nested value is 1.
        let aux = r"\newlabel{fig:test}{{1}{3}{front wing}{figure.1}{}}";
        let table = parse_label_table(aux);
        assert_eq!(table.get("fig:test").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_cref_entries_never_overwrite() {
        let aux = concat!(
            r"\newlabel{fig:test}{{1}{3}}",
            "\n",
            r"\newlabel{fig:test@cref}{{[figure][9][]9}{[1][3][]3}}",
        );
        let table = parse_label_table(aux);
        assert_eq!(table.get("fig:test").map(String::as_str), Some("1"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_realistic_aux_mix() {
        let aux = concat!(
            r"\relax",
            "\n",
            r"\newlabel{chapter:general}{{1}{2}{}{chapter.1}{}}",
            "\n",
            r"\newlabel{section:purpose}{{1}{2}{}{section.1.1}{}}",
            "\n",
            r"\newlabel{item:t1.1}{{1.1\relax }{3}{}{Item.5}{}}",
            "\n",
            r"\newlabel{fig:front wing}{{2}{7}}",
        );
        let table = parse_label_table(aux);
        assert_eq!(table.len(), 4);
        assert_eq!(table.get("item:t1.1").map(String::as_str), Some("1.1"));
        assert_eq!(table.get("fig:front wing").map(String::as_str), Some("2"));
    }
}

// ============================================================================
// Reference Resolution
// ============================================================================

mod reference_resolution {
    use super::*;

    #[test]
    fn test_figure_cref_renders_link_to_anchor() {
        // Scenario: figure-class cross-reference to fig:test resolves to the
        // anchor fig-test with the figure template applied.
        let aux = r"\newlabel{fig:test}{{1}{3}}";
        let result = convert_source(r"see \cref{fig:test}", aux);
        assert!(result.output.contains(r"\hyperlink{fig-test}{그림 1}"));
    }

    #[test]
    fn test_unknown_label_bracketed_fallback() {
        let result = convert_source(r"\ref{no:such}", "");
        assert!(result.output.contains("[no:such]"));
        assert!(result.has_warnings());
    }

    #[test]
    fn test_resolution_idempotent() {
        let aux = r"\newlabel{section:a}{{3}{1}}";
        let labels = parse_label_table(aux);
        let mut warnings = Vec::new();
        let once = resolve_references(
            r"\cref{section:a} \ref{section:a} \pageref{section:a}",
            &labels,
            &mut warnings,
        );
        let twice = resolve_references(&once, &labels, &mut warnings);
        assert_eq!(once, twice);
    }
}

// ============================================================================
// Macro Normalization
// ============================================================================

mod macro_normalization {
    use super::*;

    #[test]
    fn test_section_numbers_follow_document_order() {
        // Scenario: first section gets number 1, second gets number 2.
        let result = convert_source("\\section{first}\ntext\n\\section{second}", "");
        assert!(result.output.contains("\\section{제1조 (first)}"));
        assert!(result.output.contains("\\section{제2조 (second)}"));
    }

    #[test]
    fn test_counters_strictly_increase_across_interleaving() {
        let tex = "\\chapter{a}\\fig{f1}{d}{0.5}\\section{s1}\\chapter{b}\\fig{f2}{d}{0.5}";
        let mut counters = NumberingCounters::new();
        let mut warnings = Vec::new();
        let out = normalize_source(tex, &mut counters, &mut warnings);
        assert!(out.contains("제1장 a"));
        assert!(out.contains("제2장 b"));
        assert!(out.contains("그림 1. f1"));
        assert!(out.contains("그림 2. f2"));
        assert!(out.contains("제1조 (s1)"));
        assert_eq!((counters.chapter, counters.section, counters.figure), (2, 1, 2));
    }

    #[test]
    fn test_figure_macro_expansion() {
        // Scenario: caption with a space yields a hyphenated anchor and an
        // asset path built from folder and caption.
        let result = convert_source(r"\fig{roll cage}{frame}{0.7}", "");
        assert!(result.output.contains(r"\hypertarget{fig-roll-cage}{}"));
        assert!(result
            .output
            .contains(r"\includegraphics[width=0.7\linewidth]{assets/frame/roll cage.jpg}"));
        assert!(result.output.contains(r"\caption{그림 1. roll cage}"));
    }

    #[test]
    fn test_tblr_single_delimiter_gives_two_columns() {
        // Scenario: one & in the first row -> two bordered columns.
        let tex = "\\begin{tblr}{colspec={XX}}\nitem & value \\\\\n\\end{tblr}";
        let result = convert_source(tex, "");
        assert!(result.output.contains("\\begin{tabular}{|c|c|}"));
        assert!(result.output.contains("\\hline"));
    }

    #[test]
    fn test_label_and_reference_share_anchor() {
        let aux = r"\newlabel{section:safety}{{5}{9}}";
        let tex = "\\label{section:safety} ... \\cref{section:safety}";
        let result = convert_source(tex, aux);
        assert!(result.output.contains(r"\hypertarget{section-safety}{}"));
        assert!(result.output.contains(r"\hyperlink{section-safety}{제5조}"));
    }

    #[test]
    fn test_color_diff_markup_flattened_across_lines() {
        let tex = "before\n{\\color{blue}\nnew rule text with {braces}\n}\nafter";
        let result = convert_source(tex, "");
        assert!(result.output.contains("new rule text with {braces}"));
        assert!(!result.output.contains("color"));
    }
}

// ============================================================================
// HTML Post-processing
// ============================================================================

mod html_postprocess {
    use super::*;

    #[test]
    fn test_identical_headings_distinct_ids() {
        // Scenario: two h1 headings with identical text get distinct ids.
        let html = "<h1>부칙</h1><p>x</p><h1>부칙</h1>";
        let out = postprocess_html(html);
        assert!(out.contains(r#"id="h1-1-부칙""#));
        assert!(out.contains(r#"id="h1-2-부칙""#));
    }

    #[test]
    fn test_survived_markers_become_anchors() {
        let html = r"\hypertarget{fig-test}{}<p>\hyperlink{fig-test}{그림 1}</p>";
        let out = postprocess_html(html);
        assert!(out.contains(r#"<span id="fig-test"></span>"#));
        assert!(out.contains(r##"<a href="#fig-test" class="ref-link">그림 1</a>"##));
    }

    #[test]
    fn test_toc_injected_at_placeholder() {
        let html = "<div class=\"toc-content\">\n      <!-- TOC_PLACEHOLDER -->\n    </div>\n<h1>제1장 총칙</h1><h2>제1조 (목적)</h2>";
        let out = postprocess_html(html);
        assert!(!out.contains("TOC_PLACEHOLDER"));
        assert!(out.contains(r#"class="toc-chapter""#));
        assert!(out.contains(r#"class="toc-section""#));
    }
}

// ============================================================================
// Full pipeline (pre-pandoc)
// ============================================================================

mod full_pipeline {
    use super::*;

    const AUX: &str = concat!(
        r"\newlabel{chapter:general}{{1}{1}}",
        "\n",
        r"\newlabel{section:purpose}{{1}{1}}",
        "\n",
        r"\newlabel{fig:test}{{1}{2}}",
    );

    const TEX: &str = "\\input{template_fixed}\n\
\\begin{CJK}{UTF8}{mj}\n\
\\chapter{총칙}\\label{chapter:general}\n\
\\section{목적}\\label{section:purpose}\n\
이 규정은 \\cref{chapter:general}에 따라 적용된다.\n\
\\fig{test}{assets}{0.5}\n\
자세한 내용은 \\cref{fig:test} 참조.\n\
\\end{CJK}\n";

    #[test]
    fn test_document_converts_cleanly() {
        let result = convert_source(TEX, AUX);
        let out = &result.output;

        assert!(!out.contains("\\input"));
        assert!(!out.contains("CJK"));
        assert!(out.contains("\\chapter{제1장 총칙}"));
        assert!(out.contains("\\section{제1조 (목적)}"));
        assert!(out.contains("\\hyperlink{chapter-general}{제1장}"));
        assert!(out.contains("\\hypertarget{chapter-general}{}"));
        assert!(out.contains("\\hyperlink{fig-test}{그림 1}"));
        assert!(out.contains("\\caption{그림 1. test}"));
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_no_reference_macros_survive() {
        let result = convert_source(TEX, AUX);
        assert!(!result.output.contains("\\cref"));
        assert!(!result.output.contains("\\ref{"));
        assert!(!result.output.contains("\\label{"));
    }

    #[test]
    fn test_normalized_output_postprocesses_as_html() {
        // Simulate pandoc passing markers through and post-process them.
        let result = convert_source(TEX, AUX);
        let fake_html = format!(
            "<h1>제1장 총칙</h1>{}",
            result
                .output
                .lines()
                .find(|l| l.contains("\\hyperlink"))
                .unwrap_or_default()
        );
        let out = postprocess_html(&fake_html);
        assert!(out.contains(r##"<a href="#chapter-general" class="ref-link">제1장</a>"##));
        assert!(out.contains(r#"<h1 id="h1-1-제1장-총칙">"#));
    }
}
