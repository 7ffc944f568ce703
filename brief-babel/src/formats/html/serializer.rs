//! HTML serialization (Document → HTML export)
//!
//! Pipeline: Document → RcDom → HTML string → complete page with embedded CSS

use crate::error::FormatError;
use crate::formats::html::theme::{css_string, Theme};
use crate::ir::nodes::{Block, Cover, Document, Inline, PageFurniture};
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::default::Default;
use std::rc::Rc;

const BASELINE_CSS: &str = include_str!("../../../css/baseline.css");

/// Options for HTML serialization
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HtmlOptions {
    pub theme: Theme,
    /// Extra CSS appended after the baseline and theme CSS
    pub custom_css: Option<String>,
    /// Extra CSS appended last, used by the PDF format for page geometry
    pub page_css: Option<String>,
}

impl HtmlOptions {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            custom_css: None,
            page_css: None,
        }
    }

    pub fn with_custom_css(mut self, css: String) -> Self {
        self.custom_css = Some(css);
        self
    }

    pub fn with_page_css(mut self, css: String) -> Self {
        self.page_css = Some(css);
        self
    }
}

/// Baseline stylesheet plus the default theme variables.
pub fn get_default_css() -> String {
    format!("{}\n{}", Theme::default().to_css(), BASELINE_CSS)
}

pub fn serialize_to_html(doc: &Document, theme: &Theme) -> Result<String, FormatError> {
    serialize_to_html_with_options(doc, &HtmlOptions::new(theme.clone()))
}

pub fn serialize_to_html_with_options(
    doc: &Document,
    options: &HtmlOptions,
) -> Result<String, FormatError> {
    let title = doc
        .cover
        .as_ref()
        .map(|cover| cover.title.as_str())
        .or_else(|| doc.first_title())
        .unwrap_or("Digest")
        .to_string();

    let container = build_dom(doc, &options.theme);
    let body_html = serialize_node(&container)?;
    Ok(wrap_in_document(&body_html, &title, doc.furniture.as_ref(), options))
}

/// Build the element tree for the whole document.
fn build_dom(doc: &Document, theme: &Theme) -> Handle {
    let container = create_element("div", vec![("class", "brief-document")]);
    if let Some(cover) = &doc.cover {
        append(&container, build_cover(cover, theme));
    }
    for block in &doc.blocks {
        append(&container, build_block(block, theme));
    }
    container
}

fn build_cover(cover: &Cover, theme: &Theme) -> Handle {
    let section = create_element("section", vec![("class", "brief-cover")]);
    append(&section, create_element("div", vec![("class", "brief-cover-bar")]));
    if let Some(logo) = &cover.logo {
        append(
            &section,
            create_element("img", vec![("class", "brief-cover-logo"), ("src", logo), ("alt", "")]),
        );
    }
    append(
        &section,
        element_with_text("h1", "brief-cover-title", &cover.title),
    );
    append(
        &section,
        element_with_text("p", "brief-cover-subtitle", &cover.subtitle),
    );
    let date = format!("{}{}", theme.date_label, cover.generated.format("%Y/%m/%d"));
    append(&section, element_with_text("p", "brief-cover-date", &date));
    section
}

fn build_block(block: &Block, theme: &Theme) -> Handle {
    match block {
        Block::Heading { level: 1, text } => {
            let boxed = create_element("div", vec![("class", "brief-title-box")]);
            append(&boxed, element_with_text("h1", "brief-heading-1", text));
            boxed
        }
        Block::Heading { level, text } => {
            let level = (*level).clamp(2, 3);
            let tag = format!("h{level}");
            let class = format!("brief-heading-{level}");
            element_with_text(&tag, &class, text)
        }
        Block::Paragraph { content } => {
            let p = create_element("p", vec![("class", "brief-paragraph")]);
            append_inlines(&p, content);
            p
        }
        Block::BulletList { items } => build_list("brief-list", items),
        Block::LearningPath { items } => {
            let wrapper = create_element("div", vec![("class", "brief-learning-path")]);
            append(
                &wrapper,
                element_with_text("p", "brief-learning-caption", &theme.learning_caption),
            );
            append(&wrapper, build_list("brief-learning-items", items));
            wrapper
        }
        Block::Quote { content } => {
            let quote = create_element("blockquote", vec![("class", "brief-quote")]);
            let p = create_element("p", vec![]);
            append_inlines(&p, content);
            append(&quote, p);
            quote
        }
        Block::Separator => create_element("hr", vec![("class", "brief-separator")]),
    }
}

fn build_list(class: &str, items: &[Vec<Inline>]) -> Handle {
    let list = create_element("ul", vec![("class", class)]);
    for item in items {
        let li = create_element("li", vec![]);
        append_inlines(&li, item);
        append(&list, li);
    }
    list
}

fn append_inlines(parent: &Handle, spans: &[Inline]) {
    for span in spans {
        match span {
            Inline::Text { text } => append(parent, create_text(text)),
            Inline::Link { label, url } => {
                let anchor = create_element("a", vec![("href", url)]);
                append(&anchor, create_text(label));
                append(parent, anchor);
            }
        }
    }
}

fn element_with_text(tag: &str, class: &str, text: &str) -> Handle {
    let node = create_element(tag, vec![("class", class)]);
    append(&node, create_text(text));
    node
}

fn append(parent: &Handle, child: Handle) {
    parent.children.borrow_mut().push(child);
}

/// Create an HTML element with attributes
fn create_element(tag: &str, attrs: Vec<(&str, &str)>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

fn create_text(text: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(text.to_string().into()),
        },
    })
}

/// Serialize a node and its children to an HTML string.
fn serialize_node(node: &Handle) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    let serializable = SerializableHandle::from(node.clone());
    serialize(&mut output, &serializable, opts)
        .map_err(|e| FormatError::SerializationError(format!("HTML serialization failed: {e}")))?;

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}

/// `@page` margin boxes for the running header and page counter.
pub fn furniture_css(furniture: &PageFurniture) -> String {
    let mut counter = Vec::new();
    let mut parts = furniture.page_label.split("{page}").peekable();
    while let Some(part) = parts.next() {
        if !part.is_empty() {
            counter.push(css_string(part));
        }
        if parts.peek().is_some() {
            counter.push("counter(page)".to_string());
        }
    }
    format!(
        "@page {{\n  @top-left {{ content: {}; }}\n  @bottom-right {{ content: {}; }}\n}}\n",
        css_string(&furniture.header),
        if counter.is_empty() {
            "none".to_string()
        } else {
            counter.join(" ")
        }
    )
}

fn wrap_in_document(
    body_html: &str,
    title: &str,
    furniture: Option<&PageFurniture>,
    options: &HtmlOptions,
) -> String {
    let theme_css = options.theme.to_css();
    let furniture_css = furniture.map(furniture_css).unwrap_or_default();
    let custom_css = options.custom_css.as_deref().unwrap_or("");
    let page_css = options.page_css.as_deref().unwrap_or("");
    let escaped_title = html_escape(title);

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-Hant">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <meta name="generator" content="brief-babel">
  <title>{escaped_title}</title>
  <style>
{theme_css}
{BASELINE_CSS}
{furniture_css}
{custom_css}
{page_css}
  </style>
</head>
<body>
{body_html}
</body>
</html>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
