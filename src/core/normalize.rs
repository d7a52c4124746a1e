//! Macro normalization for pandoc
//!
//! Rewrites the dialect's structural and custom macros (chapters, sections,
//! `\fig`, `tblr` tables, color/style wrappers) into the generic LaTeX subset
//! pandoc understands. Rewrite order is fixed: anchors must be defined after
//! reference resolution, and counter stamping must precede any rewrite that
//! reads counter output.
//!
//! All rewrites are total: when a brace group cannot be matched, the
//! construct is left untouched, a warning is recorded, and scanning resumes
//! past the opening brace.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use super::braces::parse_nested_braces;
use super::labels::anchor_for;
use super::ConversionWarning;

/// Per-run numbering counters for chapters, sections and figures.
///
/// Created fresh for every conversion run and passed into the normalizer
/// explicitly; there is no process-wide counter state. Counters only ever
/// increase, once per macro occurrence in document order.
#[derive(Debug, Clone, Default)]
pub struct NumberingCounters {
    pub chapter: usize,
    pub section: usize,
    pub figure: usize,
}

impl NumberingCounters {
    pub fn new() -> Self {
        Self::default()
    }
}

lazy_static! {
    static ref INPUT_RE: Regex = Regex::new(r"\\input\{template_fixed(\.tex)?\}").unwrap();
    static ref THISPAGESTYLE_RE: Regex = Regex::new(r"\\thispagestyle\{[^}]*\}").unwrap();
    static ref PAGESTYLE_RE: Regex = Regex::new(r"\\pagestyle\{[^}]*\}").unwrap();
    static ref CJK_BEGIN_RE: Regex = Regex::new(r"\\begin\{CJK\}\{[^}]*\}\{[^}]*\}").unwrap();
    static ref CJK_END_RE: Regex = Regex::new(r"\\end\{CJK\}").unwrap();
    static ref BARE_COLOR_RE: Regex = Regex::new(r"\\color\{[^}]*\}").unwrap();
    static ref TITLE_HEADER_RE: Regex = Regex::new(
        r"대학생 자작자동차대회\}\\\\.*?\n.*?Formula Student Korea 차량기술규정\}\\\\",
    )
    .unwrap();
    static ref CHAPTER_RE: Regex = Regex::new(r"\\chapter\{([^}]+)\}").unwrap();
    static ref SECTION_RE: Regex = Regex::new(r"\\section\{([^}]+)\}").unwrap();
    static ref FIG_RE: Regex = Regex::new(r"\\fig\{([^}]+)\}\{([^}]+)\}\{([^}]+)\}").unwrap();
    static ref FONTSIZE_SELECT_RE: Regex =
        Regex::new(r"\\fontsize\{[^}]*\}\{[^}]*\}\\selectfont\s*").unwrap();
    static ref FONTSIZE_RE: Regex = Regex::new(r"\\fontsize\{[^}]*\}\{[^}]*\}\s*").unwrap();
    static ref STRING_OPEN_RE: Regex = Regex::new(r"\\string\[").unwrap();
    static ref STRING_CLOSE_RE: Regex = Regex::new(r"\\string\]").unwrap();
    static ref LABEL_RE: Regex = Regex::new(r"\\label\{([^}]+)\}").unwrap();
    static ref SETCELL_RE: Regex = Regex::new(r"\\SetCell\[[^\]]*\]\{[^}]*\}\s*").unwrap();
    static ref FOOTNOTESIZE_RE: Regex = Regex::new(r"\\footnotesize\s*").unwrap();
    static ref ORPHAN_BRACE_RE: Regex = Regex::new(r"\n\s*\}\s*\n").unwrap();
}

/// Apply all macro rewrites in their fixed order.
pub fn normalize_source(
    input: &str,
    counters: &mut NumberingCounters,
    warnings: &mut Vec<ConversionWarning>,
) -> String {
    // 1. Container-only macros carry no renderable content of their own.
    let tex = INPUT_RE.replace_all(input, "");
    let tex = THISPAGESTYLE_RE.replace_all(&tex, "");
    let tex = PAGESTYLE_RE.replace_all(&tex, "");
    let tex = CJK_BEGIN_RE.replace_all(&tex, "");
    let tex = CJK_END_RE.replace_all(&tex, "").into_owned();

    // 2. Color groups come from diff markup and may span multiple lines.
    let tex = flatten_color_groups(&tex, warnings);
    let tex = BARE_COLOR_RE.replace_all(&tex, "");

    // 3. The source duplicates the title across two header lines.
    let tex = TITLE_HEADER_RE.replace(
        &tex,
        "대학생 자작자동차대회 Formula Student Korea 차량기술규정}\\\\",
    );

    // 4-5. Stamp chapter and section numbers in document order.
    let tex = CHAPTER_RE.replace_all(&tex, |caps: &Captures| {
        counters.chapter += 1;
        format!("\\chapter{{제{}장 {}}}", counters.chapter, &caps[1])
    });
    let tex = SECTION_RE.replace_all(&tex, |caps: &Captures| {
        counters.section += 1;
        format!("\\section{{제{}조 ({})}}", counters.section, &caps[1])
    });

    // 6. Expand the custom figure macro into a figure environment with a
    // hypertarget so captions are referenceable without an explicit label.
    let tex = FIG_RE.replace_all(&tex, |caps: &Captures| {
        counters.figure += 1;
        let caption = &caps[1];
        let folder = &caps[2];
        let width = &caps[3];
        let anchor = anchor_for(&format!("fig:{}", caption));
        format!(
            "\\begin{{figure}}[H]\n\
             \\hypertarget{{{anchor}}}{{}}\n\
             \\centering\n\
             \\includegraphics[width={width}\\linewidth]{{assets/{folder}/{caption}.jpg}}\n\
             \\caption{{그림 {}. {caption}}}\n\
             \\end{{figure}}",
            counters.figure
        )
    });

    // 7. No HTML equivalent; the stylesheet governs sizing.
    let tex = FONTSIZE_SELECT_RE.replace_all(&tex, "");
    let tex = FONTSIZE_RE.replace_all(&tex, "");

    // 8. \string is only used to escape bracket characters.
    let tex = STRING_OPEN_RE.replace_all(&tex, "[");
    let tex = STRING_CLOSE_RE.replace_all(&tex, "]");

    // 9. Labels become anchor targets, paired with the resolver's hyperlinks
    // through the shared anchor derivation.
    let tex = LABEL_RE.replace_all(&tex, |caps: &Captures| {
        format!("\\hypertarget{{{}}}{{}}", anchor_for(&caps[1]))
    });

    // 10. Flatten tblr grids into plain bordered tabulars.
    let tex = flatten_tblr(&tex, warnings);

    // 11. Unwrap small-font groups, then drop orphaned close-brace lines.
    let tex = unwrap_footnotesize_groups(&tex, warnings);
    let tex = FOOTNOTESIZE_RE.replace_all(&tex, "");
    ORPHAN_BRACE_RE.replace_all(&tex, "\n").into_owned()
}

/// Replace `{\color{..} ...}` groups with their inner content.
///
/// These groups can contain further nested braces and span multiple lines, so
/// a single-level pattern match is not safe here; the group end is found by
/// depth tracking.
fn flatten_color_groups(tex: &str, warnings: &mut Vec<ConversionWarning>) -> String {
    const MARKER: &str = "{\\color{";

    let mut out = String::with_capacity(tex.len());
    let mut i = 0;

    while let Some(rel) = tex[i..].find(MARKER) {
        let start = i + rel;
        out.push_str(&tex[i..start]);

        let flattened = parse_nested_braces(tex, start).and_then(|(group, end)| {
            // Within the group, skip `\color{..}`; the rest is the content.
            // The color-name brace sits right after `\color`.
            parse_nested_braces(group, "\\color".len())
                .map(|(_, name_end)| (&group[name_end..], end))
        });

        match flattened {
            Some((content, end)) => {
                out.push_str(content);
                i = end;
            }
            None => {
                warnings.push(ConversionWarning::unmatched_braces("{\\color{"));
                out.push('{');
                i = start + 1;
            }
        }
    }

    out.push_str(&tex[i..]);
    out
}

/// Convert `\begin{tblr}{opts} .. \end{tblr}` into a bordered `tabular`.
///
/// The option group is located by depth tracking and skipped; per-cell
/// `\SetCell` formatting is stripped; the column count comes from the
/// delimiter count in the first row.
fn flatten_tblr(tex: &str, warnings: &mut Vec<ConversionWarning>) -> String {
    const BEGIN: &str = "\\begin{tblr}";
    const END: &str = "\\end{tblr}";

    let mut out = String::with_capacity(tex.len());
    let mut i = 0;

    while let Some(rel) = tex[i..].find(BEGIN) {
        let start = i + rel;
        out.push_str(&tex[i..start]);

        let Some(end_rel) = tex[start..].find(END) else {
            warnings.push(ConversionWarning::unmatched_braces(BEGIN));
            out.push_str(&tex[start..]);
            return out;
        };
        let block_end = start + end_rel + END.len();
        let block = &tex[start..block_end];

        let body_end = block.len() - END.len();
        let body = block[BEGIN.len()..]
            .find('{')
            .and_then(|brel| {
                let bpos = BEGIN.len() + brel;
                parse_nested_braces(block, bpos)
            })
            // The first brace group can be the end tag's own `{tblr}` when
            // the option argument is missing; there is no body then.
            .and_then(|(_, opts_end)| (opts_end <= body_end).then(|| &block[opts_end..body_end]))
            .unwrap_or_else(|| {
                warnings.push(ConversionWarning::unmatched_braces(BEGIN));
                ""
            });

        let body = SETCELL_RE.replace_all(body, "");
        let body = body.trim();

        if !body.is_empty() {
            let first_row = body.split("\\\\").next().unwrap_or("");
            let num_cols = first_row.matches('&').count() + 1;
            let colspec = format!("|{}", "c|".repeat(num_cols));
            out.push_str(&format!(
                "\\begin{{tabular}}{{{colspec}}}\n\\hline\n{body}\n\\hline\n\\end{{tabular}}"
            ));
        }

        i = block_end;
    }

    out.push_str(&tex[i..]);
    out
}

/// Unwrap `{\footnotesize ...}` groups, keeping the content.
fn unwrap_footnotesize_groups(tex: &str, warnings: &mut Vec<ConversionWarning>) -> String {
    const MARKER: &str = "{\\footnotesize";

    let mut out = String::with_capacity(tex.len());
    let mut i = 0;

    while let Some(rel) = tex[i..].find(MARKER) {
        let start = i + rel;
        out.push_str(&tex[i..start]);

        match parse_nested_braces(tex, start) {
            Some((group, end)) => {
                let content = group["\\footnotesize".len()..].trim_start();
                out.push_str(content);
                i = end;
            }
            None => {
                warnings.push(ConversionWarning::unmatched_braces(MARKER));
                out.push('{');
                i = start + 1;
            }
        }
    }

    out.push_str(&tex[i..]);
    out
}
