use super::tree::Tree;
use super::{Platform, PlatformKind, Result};
use crate::node::{Attributes, NodeId, NodeKind, PropValue, StyleMap};
use crate::serialize::emit;

/// Serialization platform: an in-memory record tree with no behaviour
///
/// Used whenever no interactive session exists. Properties and focus requests
/// are accepted and ignored; markup is produced by [`emit`].
pub struct SerialDocument {
    tree: Tree,
}

impl SerialDocument {
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Markup for `node` and its subtree
    pub fn to_html(&self, node: NodeId) -> String {
        emit(self, node)
    }
}

impl Default for SerialDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for SerialDocument {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Serialization
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.tree.create_text(text)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree.append_child(parent, child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.tree.remove_child(parent, child)
    }

    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()> {
        self.tree.replace_child(parent, new, old)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.tree
            .element_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.tree.element_mut(node)?.attributes.shift_remove(name);
        Ok(())
    }

    fn set_styles(&mut self, node: NodeId, styles: &StyleMap) -> Result<()> {
        let el = self.tree.element_mut(node)?;
        for (key, value) in styles {
            el.style.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn remove_style(&mut self, node: NodeId, key: &str) -> Result<()> {
        self.tree.element_mut(node)?.style.shift_remove(key);
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.tree.set_text(node, text)
    }

    fn set_property(&mut self, node: NodeId, _name: &str, _value: PropValue) -> Result<()> {
        self.tree.element_mut(node)?;
        Ok(())
    }

    fn focus(&mut self, _node: NodeId) -> Result<()> {
        Ok(())
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.tree.kind(node)
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.tree.element(node).map(|el| el.tag.as_str())
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.tree.text(node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.tree
            .element(node)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    fn attributes(&self, node: NodeId) -> Option<&Attributes> {
        self.tree.element(node).map(|el| &el.attributes)
    }

    fn styles(&self, node: NodeId) -> Option<&StyleMap> {
        self.tree.element(node).map(|el| &el.style)
    }

    fn property(&self, _node: NodeId, _name: &str) -> Option<&PropValue> {
        None
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.tree.children(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serial_is_not_browser_like() {
        let doc = SerialDocument::new();
        assert!(!doc.is_browser_like());
        assert_eq!(doc.native_field("input", "value"), None);
    }

    #[test]
    fn test_properties_are_ignored() {
        let mut doc = SerialDocument::new();
        let input = doc.create_element("input");
        doc.set_property(input, "value", PropValue::Str("x".into()))
            .unwrap();
        assert_eq!(doc.property(input, "value"), None);
        assert_eq!(doc.focused(), None);
    }

    #[test]
    fn test_to_html_renders_subtree() {
        let mut doc = SerialDocument::new();
        let p = doc.create_element("p");
        let text = doc.create_text_node("hello");
        doc.append_child(p, text).unwrap();
        assert_eq!(doc.to_html(p), "<p>hello</p>");
    }
}
