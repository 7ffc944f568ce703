//! Visual parameters for HTML and PDF output.
//!
//! A [`Theme`] is a plain value handed to the serializer. Its fields become CSS custom
//! properties (`--brief-*`) that `css/baseline.css` reads, so the baseline stylesheet never
//! hardcodes a color or font.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Cover bar, cover title and level-1 headings outside the box.
    pub primary_color: String,
    /// Subtitle, level-2 headings, quotes and the running header.
    pub secondary_color: String,
    /// Level-3 headings and the learning-path caption.
    pub highlight_color: String,
    /// Link underline and list markers.
    pub accent_color: String,
    pub heading_box_background: String,
    pub heading_box_text: String,
    pub body_font: String,
    pub heading_font: String,
    pub body_size_pt: f32,
    pub title_size_pt: f32,
    /// Caption rendered above every learning-path list.
    pub learning_caption: String,
    /// Label in front of the cover's generation date.
    pub date_label: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: "#0A3D62".to_string(),
            secondary_color: "#3C6382".to_string(),
            highlight_color: "#60A3BC".to_string(),
            accent_color: "#F8C291".to_string(),
            heading_box_background: "#2C2C2C".to_string(),
            heading_box_text: "#D4AF37".to_string(),
            body_font: "\"Times New Roman\", \"BiauKai\", \"DFKai-SB\", serif".to_string(),
            heading_font: "\"BiauKai\", \"DFKai-SB\", \"Noto Serif TC\", serif".to_string(),
            body_size_pt: 12.0,
            title_size_pt: 28.0,
            learning_caption: "學習路徑：".to_string(),
            date_label: "產出日期：".to_string(),
        }
    }
}

impl Theme {
    /// `:root` block defining the custom properties used by the baseline stylesheet.
    pub fn to_css(&self) -> String {
        let vars = [
            ("primary", self.primary_color.clone()),
            ("secondary", self.secondary_color.clone()),
            ("highlight", self.highlight_color.clone()),
            ("accent", self.accent_color.clone()),
            ("box-bg", self.heading_box_background.clone()),
            ("box-fg", self.heading_box_text.clone()),
            ("body-font", self.body_font.clone()),
            ("heading-font", self.heading_font.clone()),
            ("body-size", format!("{}pt", self.body_size_pt)),
            ("title-size", format!("{}pt", self.title_size_pt)),
        ];
        let mut css = String::from(":root {\n");
        for (name, value) in vars {
            css.push_str(&format!("  --brief-{name}: {};\n", sanitize_css_value(&value)));
        }
        css.push_str("}\n");
        css
    }
}

/// Keep a configured value from closing the declaration or the style element.
fn sanitize_css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

/// Quote `text` as a CSS string literal.
pub(crate) fn css_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\A "),
            '<' => out.push_str("\\3C "),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
