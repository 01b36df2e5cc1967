use super::{Platform, PlatformError, Result};
use crate::node::{NodeId, NodeKind};

/// Pre-order walk of `root` and everything beneath it
pub fn descendants(platform: &dyn Platform, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    if platform.node_kind(root).is_none() {
        return out;
    }
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        stack.extend(platform.children(node).iter().rev().copied());
    }
    out
}

/// First element under `root` (inclusive) whose `id` attribute equals `id`
pub fn find_by_id(platform: &dyn Platform, root: NodeId, id: &str) -> Option<NodeId> {
    descendants(platform, root)
        .into_iter()
        .find(|node| platform.attribute(*node, "id") == Some(id))
}

pub fn has_class(platform: &dyn Platform, node: NodeId, class: &str) -> bool {
    platform
        .attribute(node, "class")
        .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
}

pub fn add_class(platform: &mut dyn Platform, node: NodeId, class: &str) -> Result<()> {
    if has_class(platform, node, class) {
        return Ok(());
    }
    let value = match platform.attribute(node, "class") {
        Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing.trim(), class),
        _ => class.to_string(),
    };
    platform.set_attribute(node, "class", &value)
}

/// Concatenated text beneath `node`
pub fn text_content(platform: &dyn Platform, node: NodeId) -> String {
    descendants(platform, node)
        .into_iter()
        .filter_map(|n| platform.text(n))
        .collect()
}

/// Copy a realized subtree from `source` into `target`, returning the new root.
///
/// This is how markup produced on the serialization platform reaches an
/// interactive tree before hydration.
pub fn import_node(target: &mut dyn Platform, source: &dyn Platform, node: NodeId) -> Result<NodeId> {
    match source.node_kind(node) {
        Some(NodeKind::Text) => Ok(target.create_text_node(source.text(node).unwrap_or_default())),
        None => Err(PlatformError::UnknownNode(node)),
        Some(NodeKind::Element) => {
            let el = target.create_element(source.tag(node).unwrap_or_default());
            if let Some(attributes) = source.attributes(node) {
                for (name, value) in attributes {
                    target.set_attribute(el, name, value)?;
                }
            }
            if let Some(styles) = source.styles(node).filter(|s| !s.is_empty()) {
                target.set_styles(el, styles)?;
            }
            for child in source.children(node) {
                let imported = import_node(target, source, *child)?;
                target.append_child(el, imported)?;
            }
            Ok(el)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{LiveDocument, SerialDocument};

    #[test]
    fn test_add_class_appends_once() {
        let mut doc = SerialDocument::new();
        let div = doc.create_element("div");
        doc.set_attribute(div, "class", "card").unwrap();

        add_class(&mut doc, div, "focused").unwrap();
        add_class(&mut doc, div, "focused").unwrap();

        assert_eq!(doc.attribute(div, "class"), Some("card focused"));
        assert!(has_class(&doc, div, "card"));
    }

    #[test]
    fn test_find_by_id_misses_quietly() {
        let doc = LiveDocument::new();
        assert_eq!(find_by_id(&doc, doc.body(), "nope"), None);
    }

    #[test]
    fn test_import_copies_structure() {
        let mut server = SerialDocument::new();
        let p = server.create_element("p");
        server.set_attribute(p, "id", "greeting").unwrap();
        let text = server.create_text_node("hi");
        server.append_child(p, text).unwrap();

        let mut client = LiveDocument::new();
        let imported = import_node(&mut client, &server, p).unwrap();

        assert_eq!(client.tag(imported), Some("p"));
        assert_eq!(client.attribute(imported, "id"), Some("greeting"));
        assert_eq!(text_content(&client, imported), "hi");
    }
}
