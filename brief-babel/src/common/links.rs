//! Inline link conversion.
//!
//! Generated digests carry links as Markdown `[label](url)` spans. Renderers
//! want them as structured hyperlinks, so every text-bearing block (paragraph,
//! quote, bullet item, learning-path item) runs its text through
//! [`parse_inline`] before it is appended. Headings are left as plain text.
//!
//! The pattern is deliberately non-nested: the label may not contain `]` and
//! the url may not contain `)`. Anything that does not match (a lone `[`, a
//! label without a url, ...) stays in the text verbatim.

use crate::ir::nodes::Inline;
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]*)\)").expect("link pattern is valid"));

/// Convert a raw text fragment into inline spans.
///
/// # Example
///
/// ```ignore
/// use brief_babel::common::links::parse_inline;
/// use brief_babel::ir::nodes::Inline;
///
/// let spans = parse_inline("read [here](https://x.test) now");
/// assert_eq!(spans[1], Inline::link("here", "https://x.test"));
/// ```
pub fn parse_inline(text: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    split_links(text, &mut spans);
    spans
}

/// Re-run link conversion over spans that may still hold raw link syntax.
///
/// Links pass through untouched and text spans are split again, which makes
/// the conversion idempotent: `convert_links(&convert_links(x)) == convert_links(x)`.
pub fn convert_links(spans: &[Inline]) -> Vec<Inline> {
    let mut converted = Vec::with_capacity(spans.len());
    for span in spans {
        match span {
            Inline::Text { text } => split_links(text, &mut converted),
            link @ Inline::Link { .. } => converted.push(link.clone()),
        }
    }
    converted
}

/// Render spans back into Markdown source text.
pub fn render_plain(spans: &[Inline]) -> String {
    let mut out = String::new();
    for span in spans {
        match span {
            Inline::Text { text } => out.push_str(text),
            Inline::Link { label, url } => {
                out.push('[');
                out.push_str(label);
                out.push_str("](");
                out.push_str(url);
                out.push(')');
            }
        }
    }
    out
}

/// Concatenate only the visible text of spans (link labels included).
pub fn visible_text(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text { text } => text.as_str(),
            Inline::Link { label, .. } => label.as_str(),
        })
        .collect()
}

fn split_links(text: &str, out: &mut Vec<Inline>) {
    let mut cursor = 0;
    for captures in LINK_PATTERN.captures_iter(text) {
        let whole = match captures.get(0) {
            Some(m) => m,
            None => continue,
        };
        if whole.start() > cursor {
            out.push(Inline::text(&text[cursor..whole.start()]));
        }
        let label = captures.get(1).map_or("", |m| m.as_str());
        let url = captures.get(2).map_or("", |m| m.as_str());
        out.push(Inline::link(label, url));
        cursor = whole.end();
    }
    if cursor < text.len() {
        out.push(Inline::text(&text[cursor..]));
    }
}
