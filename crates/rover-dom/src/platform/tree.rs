use super::{PlatformError, Result};
use crate::node::{normalize_tag, Attributes, NodeId, NodeKind, Properties, StyleMap, Tag};

pub(crate) struct ElementRecord {
    pub tag: Tag,
    pub attributes: Attributes,
    pub style: StyleMap,
    pub properties: Properties,
    pub children: Vec<NodeId>,
}

pub(crate) enum Record {
    Element(ElementRecord),
    Text(String),
}

/// Arena of realized nodes with parent links, shared by both backends
///
/// Detached nodes stay in the arena so they can be re-inserted later; handles
/// are never reused.
pub(crate) struct Tree {
    records: Vec<Record>,
    parents: Vec<Option<NodeId>>,
}

impl Tree {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            parents: Vec::new(),
        }
    }

    fn push(&mut self, record: Record) -> NodeId {
        let id = NodeId(self.records.len() as u32);
        self.records.push(record);
        self.parents.push(None);
        id
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(Record::Element(ElementRecord {
            tag: normalize_tag(tag),
            attributes: Attributes::new(),
            style: StyleMap::new(),
            properties: Properties::new(),
            children: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(Record::Text(text.to_string()))
    }

    pub fn get(&self, id: NodeId) -> Option<&Record> {
        self.records.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        match self.get(id)? {
            Record::Element(_) => Some(NodeKind::Element),
            Record::Text(_) => Some(NodeKind::Text),
        }
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementRecord> {
        match self.get(id)? {
            Record::Element(el) => Some(el),
            Record::Text(_) => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementRecord> {
        match self.records.get_mut(id.index()) {
            Some(Record::Element(el)) => Ok(el),
            Some(Record::Text(_)) => Err(PlatformError::NotAnElement(id)),
            None => Err(PlatformError::UnknownNode(id)),
        }
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.get(id)? {
            Record::Text(text) => Some(text),
            Record::Element(_) => None,
        }
    }

    pub fn set_text(&mut self, id: NodeId, value: &str) -> Result<()> {
        match self.records.get_mut(id.index()) {
            Some(Record::Text(text)) => {
                value.clone_into(text);
                Ok(())
            }
            Some(Record::Element(_)) => Err(PlatformError::NotAText(id)),
            None => Err(PlatformError::UnknownNode(id)),
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        *self.parents.get(id.index())?
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.element(id) {
            Some(el) => &el.children,
            None => &[],
        }
    }

    fn exists(&self, id: NodeId) -> Result<()> {
        if id.index() < self.records.len() {
            Ok(())
        } else {
            Err(PlatformError::UnknownNode(id))
        }
    }

    /// True when `ancestor` is `node` or one of its ancestors
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.parent(child) {
            if let Some(Record::Element(el)) = self.records.get_mut(parent.index()) {
                el.children.retain(|c| *c != child);
            }
            self.parents[child.index()] = None;
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.exists(child)?;
        self.element_mut(parent)?;
        if self.is_inclusive_ancestor(child, parent) {
            return Err(PlatformError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.element_mut(parent)?.children.push(child);
        self.parents[child.index()] = Some(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.exists(child)?;
        let el = self.element_mut(parent)?;
        let Some(index) = el.children.iter().position(|c| *c == child) else {
            return Err(PlatformError::NotAChild { parent, child });
        };
        el.children.remove(index);
        self.parents[child.index()] = None;
        Ok(())
    }

    pub fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()> {
        self.exists(new)?;
        self.exists(old)?;
        if self.parent(old) != Some(parent) {
            return Err(PlatformError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }
        if self.is_inclusive_ancestor(new, parent) {
            return Err(PlatformError::HierarchyRequest { parent, child: new });
        }

        // `new` may already sit under the same parent, so look up the slot afterwards
        self.detach(new);
        let el = self.element_mut(parent)?;
        let Some(index) = el.children.iter().position(|c| *c == old) else {
            return Err(PlatformError::NotAChild { parent, child: old });
        };
        el.children[index] = new;
        self.parents[old.index()] = None;
        self.parents[new.index()] = Some(parent);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_moves_between_parents() {
        let mut tree = Tree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let child = tree.create_text("hi");

        tree.append_child(a, child).unwrap();
        tree.append_child(b, child).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), &[child]);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn test_append_rejects_cycles() {
        let mut tree = Tree::new();
        let outer = tree.create_element("div");
        let inner = tree.create_element("div");
        tree.append_child(outer, inner).unwrap();

        assert_eq!(
            tree.append_child(inner, outer),
            Err(PlatformError::HierarchyRequest {
                parent: inner,
                child: outer
            })
        );
    }

    #[test]
    fn test_append_into_text_fails() {
        let mut tree = Tree::new();
        let text = tree.create_text("x");
        let el = tree.create_element("span");
        assert_eq!(
            tree.append_child(text, el),
            Err(PlatformError::NotAnElement(text))
        );
    }

    #[test]
    fn test_remove_child_requires_membership() {
        let mut tree = Tree::new();
        let parent = tree.create_element("ul");
        let stray = tree.create_element("li");
        assert_eq!(
            tree.remove_child(parent, stray),
            Err(PlatformError::NotAChild {
                parent,
                child: stray
            })
        );
    }

    #[test]
    fn test_replace_child_keeps_position() {
        let mut tree = Tree::new();
        let parent = tree.create_element("ul");
        let first = tree.create_element("li");
        let second = tree.create_element("li");
        let third = tree.create_element("li");
        tree.append_child(parent, first).unwrap();
        tree.append_child(parent, second).unwrap();
        tree.append_child(parent, third).unwrap();

        let fresh = tree.create_element("li");
        tree.replace_child(parent, fresh, second).unwrap();

        assert_eq!(tree.children(parent), &[first, fresh, third]);
        assert_eq!(tree.parent(second), None);
    }

    #[test]
    fn test_replace_with_sibling() {
        let mut tree = Tree::new();
        let parent = tree.create_element("ul");
        let first = tree.create_element("li");
        let second = tree.create_element("li");
        tree.append_child(parent, first).unwrap();
        tree.append_child(parent, second).unwrap();

        tree.replace_child(parent, first, second).unwrap();

        assert_eq!(tree.children(parent), &[first]);
        assert_eq!(tree.parent(second), None);
    }
}
