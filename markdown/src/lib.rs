//! Restricted markdown-to-HTML conversion for streamed chat replies.
//!
//! SYSTEM CONTEXT
//! ==============
//! The chat widget re-runs [`markdown_to_html`] over the whole accumulated
//! reply after every received chunk, so conversion is a pure function of its
//! input and never patches earlier output.
//!
//! DIALECT
//! =======
//! Stages run in a fixed order, each over the previous stage's output:
//! tables, fenced code, inline code, headings, bold, italic, list lines,
//! line breaks. Code output is parked behind placeholders until the last
//! stage so later rules never rewrite code text.
//!
//! TRADE-OFFS
//! ==========
//! Consecutive list lines are not merged into one list and table separator
//! rows (`|---|---|`) render as ordinary data rows. Input is inserted as raw
//! HTML unless [`Converter::escape_html`] is set.


use std::sync::LazyLock;

use regex::{Captures, Regex};

const STASH_OPEN: char = '\u{E000}';
const STASH_CLOSE: char = '\u{E001}';

const TABLE_OPEN: &str = r#"<div class="overflow-x-auto"><table class="table table-zebra">"#;
const TABLE_CLOSE: &str = "</tbody></table></div>";

const H1_OPEN: &str = r#"<h1 class="text-3xl font-bold mt-8 mb-4">"#;
const H2_OPEN: &str = r#"<h2 class="text-2xl font-bold mt-6 mb-4">"#;
const H3_OPEN: &str = r#"<h3 class="text-xl font-bold mt-4 mb-2">"#;
const UL_OPEN: &str = r#"<ul class="list-disc list-inside"><li>"#;
const OL_OPEN: &str = r#"<ol class="list-decimal list-inside"><li>"#;

struct Rules {
    table: Regex,
    fence: Regex,
    inline_code: Regex,
    h3: Regex,
    h2: Regex,
    h1: Regex,
    bold: Regex,
    italic: Regex,
    bullet: Regex,
    ordered: Regex,
    stashed: Regex,
}

impl Rules {
    fn compile() -> Self {
        Self {
            table: pattern(r"(?m)^[ \t]*\|.+\|[ \t\r]*$(?:\n[ \t]*\|.+\|[ \t\r]*$)*"),
            fence: pattern(r"```([A-Za-z0-9_]+)?\n([\s\S]*?)```"),
            inline_code: pattern(r"`([^`]+)`"),
            h3: pattern(r"(?m)^### (.*)$"),
            h2: pattern(r"(?m)^## (.*)$"),
            h1: pattern(r"(?m)^# (.*)$"),
            bold: pattern(r"\*\*(.*?)\*\*"),
            italic: pattern(r"\*(.*?)\*"),
            bullet: pattern(r"(?m)^\* (.*)$"),
            ordered: pattern(r"(?m)^[0-9]+\. (.*)$"),
            stashed: pattern(r"\x{E000}([0-9]+)\x{E001}"),
        }
    }
}

static RULES: LazyLock<Rules> = LazyLock::new(Rules::compile);

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("markdown rule must be a valid pattern")
}

/// Markdown converter settings.
///
/// The default converter passes literal text through unescaped, so any HTML
/// in the input reaches the output as markup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Converter {
    /// Entity-escape `&`, `<`, `>` and `"` before any markdown stage runs.
    pub escape_html: bool,
}

impl Converter {
    /// Converter with literal passthrough.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter that escapes HTML-significant characters when `enabled`.
    #[must_use]
    pub fn with_escaping(enabled: bool) -> Self {
        Self { escape_html: enabled }
    }

    /// Convert a markdown fragment to an HTML fragment.
    ///
    /// Never fails; text that matches no rule is passed through.
    #[must_use]
    pub fn convert(self, markdown: &str) -> String {
        let rules = &*RULES;
        let mut stash = CodeStash::default();

        let text: String = markdown
            .chars()
            .filter(|c| *c != STASH_OPEN && *c != STASH_CLOSE)
            .collect();
        let text = if self.escape_html { escape_html(&text) } else { text };

        let text = rules
            .table
            .replace_all(&text, |caps: &Captures| render_table(&caps[0]))
            .into_owned();

        let text = rules
            .fence
            .replace_all(&text, |caps: &Captures| {
                let language = caps.get(1).map_or("", |m| m.as_str());
                let code = caps[2].trim();
                stash.park(format!(r#"<pre><code class="language-{language}">{code}</code></pre>"#))
            })
            .into_owned();

        let text = rules
            .inline_code
            .replace_all(&text, |caps: &Captures| stash.park(format!("<code>{}</code>", &caps[1])))
            .into_owned();

        let text = wrap_lines(&rules.h3, &text, H3_OPEN, "</h3>");
        let text = wrap_lines(&rules.h2, &text, H2_OPEN, "</h2>");
        let text = wrap_lines(&rules.h1, &text, H1_OPEN, "</h1>");
        let text = rules.bold.replace_all(&text, "<strong>${1}</strong>").into_owned();
        let text = rules.italic.replace_all(&text, "<em>${1}</em>").into_owned();
        let text = wrap_lines(&rules.bullet, &text, UL_OPEN, "</li></ul>");
        let text = wrap_lines(&rules.ordered, &text, OL_OPEN, "</li></ol>");
        let text = text.replace('\n', "<br>");

        rules
            .stashed
            .replace_all(&text, |caps: &Captures| stash.take(&caps[1]))
            .into_owned()
    }
}

/// Convert `markdown` with the default (unescaped) converter.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    Converter::default().convert(markdown)
}

/// Entity-escape the characters that would otherwise open markup.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

/// Rendered code fragments held out of the text while later rules run.
#[derive(Default)]
struct CodeStash {
    parked: Vec<String>,
}

impl CodeStash {
    fn park(&mut self, html: String) -> String {
        let slot = self.parked.len();
        self.parked.push(html);
        format!("{STASH_OPEN}{slot}{STASH_CLOSE}")
    }

    fn take(&self, slot: &str) -> String {
        slot.parse::<usize>()
            .map_or_else(|_| String::new(), |index| self.parked.get(index).cloned().unwrap_or_default())
    }
}

/// Wrap the captured remainder of every line matched by `rule`.
fn wrap_lines(rule: &Regex, text: &str, open: &str, close: &str) -> String {
    rule.replace_all(text, |caps: &Captures| format!("{open}{}{close}", &caps[1]))
        .into_owned()
}

fn render_table(block: &str) -> String {
    let mut html = String::from(TABLE_OPEN);
    let rows = block.lines().map(str::trim).filter(|row| !row.is_empty());

    for (index, row) in rows.enumerate() {
        let cells = row.split('|').map(str::trim).filter(|cell| !cell.is_empty());
        if index == 0 {
            html.push_str("<thead><tr>");
            for cell in cells {
                push_cell(&mut html, "th", cell);
            }
            html.push_str("</tr></thead><tbody>");
        } else {
            html.push_str("<tr>");
            for (column, cell) in cells.enumerate() {
                push_cell(&mut html, if column == 0 { "th" } else { "td" }, cell);
            }
            html.push_str("</tr>");
        }
    }

    html.push_str(TABLE_CLOSE);
    html
}

fn push_cell(html: &mut String, tag: &str, cell: &str) {
    html.push('<');
    html.push_str(tag);
    html.push('>');
    html.push_str(cell);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
}
