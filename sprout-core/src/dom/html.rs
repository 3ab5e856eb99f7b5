//! HTML serialization of the element tree.
//!
//! Produces outer HTML for inspection and tests. Text is escaped with
//! `html_escape::encode_text`, attribute values with
//! `encode_double_quoted_attribute`. Inline style properties are written as
//! the `style` attribute and take its place when both are present. The form
//! `value` property is not serialized.

use std::fmt;

use super::node::{Element, Node};

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Element {
    /// Serialize this element and its descendants.
    pub fn to_html(&self) -> String {
        let mut buf = String::new();
        write_element(self, &mut buf);
        buf
    }
}

impl Node {
    /// Serialize this node and its descendants.
    pub fn to_html(&self) -> String {
        match self {
            Node::Element(element) => element.to_html(),
            Node::Text(text) => html_escape::encode_text(text).into_owned(),
        }
    }
}

fn write_element(element: &Element, buf: &mut String) {
    let styles = element.styles();

    buf.push('<');
    buf.push_str(element.tag());
    for (name, value) in element.attributes() {
        if name == "style" && !styles.is_empty() {
            continue;
        }
        write_attribute(buf, &name, &value);
    }
    if !styles.is_empty() {
        let style = styles
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ");
        write_attribute(buf, "style", &style);
    }
    buf.push('>');

    if VOID_ELEMENTS.contains(&element.tag()) {
        return;
    }

    for child in element.children() {
        match child {
            Node::Element(child) => write_element(&child, buf),
            Node::Text(text) => buf.push_str(&html_escape::encode_text(&text)),
        }
    }

    buf.push_str("</");
    buf.push_str(element.tag());
    buf.push('>');
}

fn write_attribute(buf: &mut String, name: &str, value: &str) {
    buf.push(' ');
    buf.push_str(name);
    buf.push_str("=\"");
    buf.push_str(&html_escape::encode_double_quoted_attribute(value));
    buf.push('"');
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}
