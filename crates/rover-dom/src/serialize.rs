//! Markup emission for realized trees
//!
//! Escaping and self-closing tags are decided here and nowhere else; the
//! serialization platform only stores records.

use crate::node::{NodeId, NodeKind};
use crate::platform::Platform;

/// Tags emitted as a single self-closing open tag
pub const VOID_TAGS: [&str; 6] = ["img", "input", "br", "hr", "meta", "link"];

/// Render `node` and its subtree as markup text
pub fn emit(platform: &dyn Platform, node: NodeId) -> String {
    let mut out = String::new();
    write_node(platform, node, &mut out);
    out
}

fn write_node(platform: &dyn Platform, node: NodeId, out: &mut String) {
    match platform.node_kind(node) {
        Some(NodeKind::Text) => {
            out.push_str(&escape_text(platform.text(node).unwrap_or_default()));
        }
        Some(NodeKind::Element) => {
            let tag = platform.tag(node).unwrap_or_default();
            out.push('<');
            out.push_str(tag);

            if let Some(attributes) = platform.attributes(node) {
                for (name, value) in attributes {
                    out.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
                }
            }

            if let Some(styles) = platform.styles(node).filter(|s| !s.is_empty()) {
                let declarations: Vec<String> = styles
                    .iter()
                    .map(|(key, value)| format!("{}:{}", kebab_case(key), value.to_css()))
                    .collect();
                out.push_str(&format!(
                    " style=\"{}\"",
                    escape_attribute(&declarations.join(";"))
                ));
            }

            if VOID_TAGS.contains(&tag) {
                out.push_str(" />");
                return;
            }

            out.push('>');
            for child in platform.children(node) {
                write_node(platform, *child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        None => {}
    }
}

/// `fontSize` -> `font-size`, `WebkitTransform` -> `-webkit-transform`
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

pub fn escape_attribute(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{StyleMap, StyleValue};
    use crate::platform::SerialDocument;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("fontSize"), "font-size");
        assert_eq!(kebab_case("color"), "color");
        assert_eq!(kebab_case("WebkitTransform"), "-webkit-transform");
    }

    #[test]
    fn test_attribute_quotes_are_escaped() {
        let mut doc = SerialDocument::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "title", r#"say "hi" & go"#).unwrap();
        assert_eq!(
            emit(&doc, div),
            r#"<div title="say &quot;hi&quot; &amp; go"></div>"#
        );
    }

    #[test]
    fn test_style_flattened_in_order() {
        let mut doc = SerialDocument::new();
        let div = doc.create_element("div");
        let mut styles = StyleMap::new();
        styles.insert("fontSize".into(), StyleValue::from("12px"));
        styles.insert("zIndex".into(), StyleValue::from(3));
        doc.set_styles(div, &styles).unwrap();

        assert_eq!(
            emit(&doc, div),
            r#"<div style="font-size:12px;z-index:3"></div>"#
        );
    }

    #[test]
    fn test_empty_style_omitted() {
        let mut doc = SerialDocument::new();
        let div = doc.create_element("div");
        doc.set_styles(div, &StyleMap::new()).unwrap();
        assert_eq!(emit(&doc, div), "<div></div>");
    }

    #[test]
    fn test_void_tags_self_close() {
        let mut doc = SerialDocument::new();
        let img = doc.create_element("img");
        doc.set_attribute(img, "src", "a.png").unwrap();
        let stray = doc.create_text_node("ignored");
        doc.append_child(img, stray).unwrap();

        assert_eq!(emit(&doc, img), r#"<img src="a.png" />"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let mut doc = SerialDocument::new();
        let p = doc.create_element("p");
        let text = doc.create_text_node("1 < 2 & 3 > 2");
        doc.append_child(p, text).unwrap();
        assert_eq!(emit(&doc, p), "<p>1 &lt; 2 &amp; 3 &gt; 2</p>");
    }

    #[test]
    fn test_nested_children() {
        let mut doc = SerialDocument::new();
        let ul = doc.create_element("ul");
        for label in ["a", "b"] {
            let li = doc.create_element("li");
            let text = doc.create_text_node(label);
            doc.append_child(li, text).unwrap();
            doc.append_child(ul, li).unwrap();
        }
        assert_eq!(emit(&doc, ul), "<ul><li>a</li><li>b</li></ul>");
    }
}
