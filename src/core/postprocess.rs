//! HTML post-processing
//!
//! Pandoc passes the `\hyperlink`/`\hypertarget` markers through as literal
//! text; this stage turns them into real anchor elements, assigns ids to the
//! h1/h2 headings, and builds the table of contents that the page template's
//! placeholder is substituted with.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Marker in the page template replaced by the generated TOC.
pub const TOC_PLACEHOLDER: &str = "<!-- TOC_PLACEHOLDER -->";

/// Maximum slug length in chars; ids stay readable for long Korean titles.
const SLUG_MAX_CHARS: usize = 30;

lazy_static! {
    static ref HYPERLINK_RE: Regex = Regex::new(r"\\hyperlink\{([^}]+)\}\{([^}]+)\}").unwrap();
    static ref HYPERTARGET_RE: Regex = Regex::new(r"\\hypertarget\{([^}]+)\}\{\}").unwrap();
    static ref H1_RE: Regex = Regex::new(r"<h1([^>]*)>([^<]+)</h1>").unwrap();
    static ref H2_RE: Regex = Regex::new(r"<h2([^>]*)>([^<]+)</h2>").unwrap();
    // `\w` is Unicode-aware; the explicit syllable range documents the intent.
    static ref SLUG_STRIP_RE: Regex = Regex::new(r"[^\w\s가-힣-]").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref HEADING_WITH_ID_RE: Regex =
        Regex::new(r#"<(h1|h2)[^>]*id="([^"]*)"[^>]*>([^<]*)</(h1|h2)>"#).unwrap();
}

/// Post-process raw pandoc HTML into the final page.
pub fn postprocess_html(html: &str) -> String {
    let html = HYPERLINK_RE.replace_all(html, r##"<a href="#${1}" class="ref-link">${2}</a>"##);
    let html = HYPERTARGET_RE.replace_all(&html, r#"<span id="${1}"></span>"#);

    // Pandoc leaves these escapes verbatim when the markers survive as text.
    let html = html
        .replace("\\%", "%")
        .replace("\\&", "&amp;")
        .replace("\\$", "$");

    let html = add_heading_ids(&html);

    let toc = generate_toc(&html);
    html.replace(TOC_PLACEHOLDER, &toc)
}

/// Assign ids to h1/h2 headings that lack one.
///
/// Ids are `{tag}-{n}-{slug}`: the per-level counter makes them unique even
/// when two headings slug identically, and the slug keeps fragment URLs
/// human-readable.
fn add_heading_ids(html: &str) -> String {
    let html = assign_ids_for_level(html, "h1", &H1_RE);
    assign_ids_for_level(&html, "h2", &H2_RE)
}

fn assign_ids_for_level(html: &str, tag: &str, re: &Regex) -> String {
    let mut counter = 0usize;
    re.replace_all(html, |caps: &Captures| {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let content = &caps[2];

        if attrs.contains("id=\"") {
            return caps[0].to_string();
        }

        counter += 1;
        let id = format!("{}-{}-{}", tag, counter, slugify(content));
        format!("<{tag}{attrs} id=\"{id}\">{content}</{tag}>")
    })
    .into_owned()
}

fn slugify(text: &str) -> String {
    let slug = SLUG_STRIP_RE.replace_all(text, "");
    let slug = WHITESPACE_RE.replace_all(slug.trim(), "-");
    slug.chars().take(SLUG_MAX_CHARS).collect()
}

/// Build the TOC link list from id-bearing headings, in document order.
fn generate_toc(html: &str) -> String {
    let mut items = Vec::new();

    for caps in HEADING_WITH_ID_RE.captures_iter(html) {
        let level = &caps[1];
        let id = &caps[2];
        let text = caps[3].trim();

        // The regex crate has no backreferences; reject mismatched pairs here
        // so a malformed heading never lands in the TOC.
        if level != &caps[4] {
            continue;
        }

        let class = if level == "h1" { "toc-chapter" } else { "toc-section" };
        items.push(format!(r##"<a href="#{id}" class="{class}">{text}</a>"##));
    }

    items.join("\n      ")
}
