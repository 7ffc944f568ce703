//! Heading normalization.
//!
//! Generated articles are inconsistent about heading markers: the title may
//! come as `## Title` or `#Title`, and section names such as `摘要` show up as
//! `### 摘要`, `摘要` or `## 摘要`. Before segmentation every line is rewritten
//! to a canonical form so that exactly one heading cue applies per line:
//!
//! 1. the first non-blank line becomes `# <text>` if it carries `#` markers or
//!    starts with a recognized section name;
//! 2. any other line whose text starts with a recognized section name becomes
//!    `## <text>`;
//! 3. everything else passes through untouched.
//!
//! "Text" is the trimmed line with its leading `#`/space run removed.

use crate::common::section_rules::SectionRules;

/// Rewrite ambiguous heading lines. The output has the same length as the input.
pub fn normalize_headings<S: AsRef<str>>(lines: &[S], rules: &SectionRules) -> Vec<String> {
    let mut seen_content = false;
    lines
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let stripped = line.trim();
            if stripped.is_empty() {
                return line.to_string();
            }
            let first = !seen_content;
            seen_content = true;
            normalize_line(line, stripped, first, rules)
        })
        .collect()
}

fn normalize_line(line: &str, stripped: &str, first: bool, rules: &SectionRules) -> String {
    let text = heading_text(stripped);
    if text.is_empty() {
        return line.to_string();
    }
    let names_section = rules.matching_section(text).is_some();
    if first && (stripped.starts_with('#') || names_section) {
        return format!("# {text}");
    }
    if names_section {
        return format!("## {text}");
    }
    line.to_string()
}

fn heading_text(stripped: &str) -> &str {
    stripped.trim_start_matches(['#', ' ']).trim()
}
