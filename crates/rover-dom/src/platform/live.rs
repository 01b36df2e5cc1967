use super::tree::Tree;
use super::{NativeField, Platform, PlatformError, PlatformKind, Result};
use crate::node::{Attributes, Event, NodeId, NodeKind, PropValue, StyleMap};
use tracing::debug;

/// Fields every element exposes, with the attribute they reflect into
const GLOBAL_REFLECTED: &[(&str, &str)] = &[
    ("id", "id"),
    ("className", "class"),
    ("title", "title"),
    ("lang", "lang"),
    ("dir", "dir"),
    ("hidden", "hidden"),
    ("tabIndex", "tabindex"),
    ("role", "role"),
    ("slot", "slot"),
    ("accessKey", "accesskey"),
    ("draggable", "draggable"),
];

const EVENT_FIELDS: &[&str] = &[
    "onclick",
    "ondblclick",
    "onkeydown",
    "onkeyup",
    "onkeypress",
    "onfocus",
    "onblur",
    "onchange",
    "onsubmit",
    "oninput",
    "onmousedown",
    "onmouseup",
    "onmouseover",
    "onmouseout",
    "onscroll",
    "onload",
    "onerror",
];

fn tag_field(tag: &str, name: &str) -> Option<NativeField> {
    use NativeField::{Property, Reflected};

    let field = match (tag, name) {
        ("a", "href") => Reflected("href"),
        ("a", "target") => Reflected("target"),
        ("a", "rel") => Reflected("rel"),
        ("a", "download") => Reflected("download"),
        ("img", "src") => Reflected("src"),
        ("img", "alt") => Reflected("alt"),
        ("input" | "button" | "select" | "textarea", "name") => Reflected("name"),
        ("input" | "button" | "select" | "textarea" | "option", "disabled") => {
            Reflected("disabled")
        }
        ("input" | "button", "type") => Reflected("type"),
        ("input" | "textarea", "placeholder") => Reflected("placeholder"),
        ("input" | "textarea", "readOnly") => Reflected("readonly"),
        ("input" | "textarea", "maxLength") => Reflected("maxlength"),
        ("input" | "select" | "textarea", "required") => Reflected("required"),
        ("input", "min") => Reflected("min"),
        ("input", "max") => Reflected("max"),
        ("input", "step") => Reflected("step"),
        ("input" | "button" | "select" | "textarea" | "option", "value") => Property,
        ("input", "checked") => Property,
        ("option", "selected") => Property,
        ("option", "label") => Reflected("label"),
        ("select", "multiple") => Reflected("multiple"),
        ("select", "selectedIndex") => Property,
        ("textarea", "rows") => Reflected("rows"),
        ("textarea", "cols") => Reflected("cols"),
        ("form", "action") => Reflected("action"),
        ("form", "method") => Reflected("method"),
        ("label", "htmlFor") => Reflected("for"),
        ("link", "href") => Reflected("href"),
        ("link", "rel") => Reflected("rel"),
        ("script", "src") => Reflected("src"),
        ("meta", "content") => Reflected("content"),
        ("meta", "name") => Reflected("name"),
        _ => return None,
    };
    Some(field)
}

/// Interactive platform: a live, focusable, event-dispatching tree
///
/// The document owns a `body` element that views attach under.
pub struct LiveDocument {
    tree: Tree,
    body: NodeId,
    focused: Option<NodeId>,
    mutations: usize,
}

impl LiveDocument {
    pub fn new() -> Self {
        let mut tree = Tree::new();
        let body = tree.create_element("body");
        Self {
            tree,
            body,
            focused: None,
            mutations: 0,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Number of mutating primitives invoked so far
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn reset_mutations(&mut self) {
        self.mutations = 0;
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        super::find_by_id(self, self.body, id)
    }

    /// True when `node` is reachable from `body`
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.tree.is_inclusive_ancestor(self.body, node)
    }

    /// Drop input focus, as when the user clicks outside any control
    pub fn blur(&mut self) {
        if self.focused.take().is_some() {
            debug!("focus cleared");
        }
    }

    /// Deliver `event` to `target` and bubble it to the root.
    /// Returns the number of handlers invoked.
    pub fn dispatch(&self, target: NodeId, event: &str) -> usize {
        let field = format!("on{}", event);
        let mut invoked = 0;
        let mut current = Some(target);
        while let Some(node) = current {
            if let Some(PropValue::Handler(handler)) = self.property(node, &field) {
                handler.call(&Event {
                    kind: event.to_string(),
                    target,
                    current_target: node,
                });
                invoked += 1;
            }
            current = self.tree.parent(node);
        }
        debug!(?target, event, invoked, "dispatched event");
        invoked
    }

    fn touch(&mut self) {
        self.mutations += 1;
    }

    /// Focus does not survive the focused node leaving its subtree
    fn drop_focus_within(&mut self, removed: NodeId) {
        if let Some(focused) = self.focused {
            if self.tree.is_inclusive_ancestor(removed, focused) {
                self.blur();
            }
        }
    }
}

impl Default for LiveDocument {
    fn default() -> Self {
        Self::new()
    }
}

fn check_property(name: &str, value: &PropValue) -> Result<()> {
    let ok = match name {
        _ if name.starts_with("on") => {
            matches!(value, PropValue::Handler(_) | PropValue::Null)
        }
        "checked" | "selected" => matches!(value, PropValue::Bool(_) | PropValue::Null),
        "value" => matches!(
            value,
            PropValue::Str(_) | PropValue::Num(_) | PropValue::Null
        ),
        _ => true,
    };
    if ok {
        Ok(())
    } else {
        Err(PlatformError::PropertyRejected {
            name: name.to_string(),
            reason: format!("unsupported value {:?}", value),
        })
    }
}

impl Platform for LiveDocument {
    fn kind(&self) -> PlatformKind {
        PlatformKind::Interactive
    }

    fn native_field(&self, tag: &str, name: &str) -> Option<NativeField> {
        if EVENT_FIELDS.contains(&name) {
            return Some(NativeField::Property);
        }
        if let Some((_, attr)) = GLOBAL_REFLECTED.iter().find(|(field, _)| *field == name) {
            return Some(NativeField::Reflected(*attr));
        }
        tag_field(tag, name)
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.touch();
        self.tree.create_element(tag)
    }

    fn create_text_node(&mut self, text: &str) -> NodeId {
        self.touch();
        self.tree.create_text(text)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.touch();
        self.tree.append_child(parent, child)
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.touch();
        self.tree.remove_child(parent, child)?;
        self.drop_focus_within(child);
        Ok(())
    }

    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()> {
        self.touch();
        self.tree.replace_child(parent, new, old)?;
        if new != old {
            self.drop_focus_within(old);
        }
        Ok(())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        self.touch();
        self.tree
            .element_mut(node)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()> {
        self.touch();
        self.tree.element_mut(node)?.attributes.shift_remove(name);
        Ok(())
    }

    fn set_styles(&mut self, node: NodeId, styles: &StyleMap) -> Result<()> {
        self.touch();
        let el = self.tree.element_mut(node)?;
        for (key, value) in styles {
            el.style.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn remove_style(&mut self, node: NodeId, key: &str) -> Result<()> {
        self.touch();
        self.tree.element_mut(node)?.style.shift_remove(key);
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.touch();
        self.tree.set_text(node, text)
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: PropValue) -> Result<()> {
        self.touch();
        check_property(name, &value)?;
        let el = self.tree.element_mut(node)?;
        if value.is_null() {
            el.properties.shift_remove(name);
        } else {
            el.properties.insert(name.to_string(), value);
        }
        Ok(())
    }

    fn focus(&mut self, node: NodeId) -> Result<()> {
        self.touch();
        self.tree.element_mut(node)?;
        self.focused = Some(node);
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

    fn property(&self, node: NodeId, name: &str) -> Option<&PropValue> {
        self.tree.element(node)?.properties.get(name)
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.tree.children(node)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    fn focused(&self) -> Option<NodeId> {
        self.focused
    }
}
