use super::{NativeField, Platform, PlatformKind, Result};
use crate::node::{Attributes, GroupedMap, NodeId, NodeKind, PropValue, StyleMap};

/// One mutating primitive call, as seen by [`RecordingPlatform`]
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformOp {
    CreateElement {
        tag: String,
    },
    CreateText {
        text: String,
    },
    AppendChild {
        parent: NodeId,
        child: NodeId,
    },
    RemoveChild {
        parent: NodeId,
        child: NodeId,
    },
    ReplaceChild {
        parent: NodeId,
        new: NodeId,
        old: NodeId,
    },
    SetAttribute {
        node: NodeId,
        name: String,
        value: String,
    },
    RemoveAttribute {
        node: NodeId,
        name: String,
    },
    SetStyles {
        node: NodeId,
        styles: StyleMap,
    },
    RemoveStyle {
        node: NodeId,
        key: String,
    },
    SetData {
        node: NodeId,
        data: GroupedMap,
    },
    SetAria {
        node: NodeId,
        aria: GroupedMap,
    },
    SetText {
        node: NodeId,
        text: String,
    },
    SetProperty {
        node: NodeId,
        name: String,
        value: PropValue,
    },
    Focus {
        node: NodeId,
    },
}

/// Wraps a platform and records every mutating call for verification
pub struct RecordingPlatform<P> {
    inner: P,
    ops: Vec<PlatformOp>,
}

impl<P: Platform> RecordingPlatform<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[PlatformOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<PlatformOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut P {
        &mut self.inner
    }

    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: Platform> Platform for RecordingPlatform<P> {
    fn kind(&self) -> PlatformKind {
        self.inner.kind()
    }

    fn is_browser_like(&self) -> bool {
        self.inner.is_browser_like()
    }

    fn native_field(&self, tag: &str, name: &str) -> Option<NativeField> {
        self.inner.native_field(tag, name)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.ops.push(PlatformOp::CreateElement {
            tag: tag.to_string(),
        });
        self.inner.create_element(tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.ops.push(PlatformOp::CreateText {
            text: text.to_string(),
        });
        self.inner.create_text_node(text)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ops.push(PlatformOp::AppendChild { parent, child });
        self.inner.append_child(parent, child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ops.push(PlatformOp::RemoveChild { parent, child });
        self.inner.remove_child(parent, child)
    }

    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()> {
        self.ops.push(PlatformOp::ReplaceChild { parent, new, old });
        self.inner.replace_child(parent, new, old)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.ops.push(PlatformOp::SetAttribute {
            node,
            name: name.to_string(),
            value: value.to_string(),
        });
        self.inner.set_attribute(node, name, value)
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.ops.push(PlatformOp::RemoveAttribute {
            node,
            name: name.to_string(),
        });
        self.inner.remove_attribute(node, name)
    }

    fn set_styles(&mut self, node: NodeId, styles: &StyleMap) -> Result<()> {
        self.ops.push(PlatformOp::SetStyles {
            node,
            styles: styles.clone(),
        });
        self.inner.set_styles(node, styles)
    }

    fn remove_style(&mut self, node: NodeId, key: &str) -> Result<()> {
        self.ops.push(PlatformOp::RemoveStyle {
            node,
            key: key.to_string(),
        });
        self.inner.remove_style(node, key)
    }

    fn set_data(&mut self, node: NodeId, data: &GroupedMap) -> Result<()> {
        self.ops.push(PlatformOp::SetData {
            node,
            data: data.clone(),
        });
        self.inner.set_data(node, data)
    }

    fn set_aria(&mut self, node: NodeId, aria: &GroupedMap) -> Result<()> {
        self.ops.push(PlatformOp::SetAria {
            node,
            aria: aria.clone(),
        });
        self.inner.set_aria(node, aria)
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.ops.push(PlatformOp::SetText {
            node,
            text: text.to_string(),
        });
        self.inner.set_text(node, text)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: PropValue) -> Result<()> {
        self.ops.push(PlatformOp::SetProperty {
            node,
            name: name.to_string(),
            value: value.clone(),
        });
        self.inner.set_property(node, name, value)
    }

    fn focus(&mut self, node: NodeId) -> Result<()> {
        self.ops.push(PlatformOp::Focus { node });
        self.inner.focus(node)
    }

    fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.inner.node_kind(node)
    }

    fn tag(&self, node: NodeId) -> Option<&str> {
        self.inner.tag(node)
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        self.inner.text(node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.inner.attribute(node, name)
    }

    fn attributes(&self, node: NodeId) -> Option<&Attributes> {
        self.inner.attributes(node)
    }

    fn styles(&self, node: NodeId) -> Option<&StyleMap> {
        self.inner.styles(node)
    }

    fn property(&self, node: NodeId, name: &str) -> Option<&PropValue> {
        self.inner.property(node, name)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.inner.children(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner.parent(node)
    }

    fn focused(&self) -> Option<NodeId> {
        self.inner.focused()
    }
}
