mod live;
mod query;
pub mod recording;
mod serial;
mod tree;

use crate::node::{
    aria_attribute_name, data_attribute_name, Attributes, GroupedMap, NodeId, NodeKind, PropValue,
    StyleMap,
};
use thiserror::Error;
use tracing::debug;

pub use live::LiveDocument;
pub use query::{add_class, descendants, find_by_id, has_class, import_node, text_content};
pub use recording::{PlatformOp, RecordingPlatform};
pub use serial::SerialDocument;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("node {0:?} does not exist")]
    UnknownNode(NodeId),

    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0:?} is not a text node")]
    NotAText(NodeId),

    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("cannot insert {child:?} under {parent:?}: it would become its own ancestor")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[error("property `{name}` rejected: {reason}")]
    PropertyRejected { name: String, reason: String },
}

pub type Result<T> = std::result::Result<T, PlatformError>;

/// Which kind of tree a platform realizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    Interactive,
    Serialization,
}

impl PlatformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlatformKind::Interactive => "interactive",
            PlatformKind::Serialization => "serialization",
        }
    }
}

/// How an interactive platform stores a native element field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeField {
    /// Reflected into the named attribute
    Reflected(&'static str),
    /// Held as a property only (handlers, form-control state)
    Property,
}

/// Capability set for creating and mutating realized trees
///
/// Mutating primitives return `Result` and any error propagates to whoever
/// drove the mutation. Lookups never fail; a missing node reads as `None` or
/// an empty collection.
pub trait Platform {
    fn kind(&self) -> PlatformKind;

    /// Chooses property-versus-attribute semantics in the element builder
    fn is_browser_like(&self) -> bool {
        self.kind() == PlatformKind::Interactive
    }

    fn native_field(&self, _tag: &str, _name: &str) -> Option<NativeField> {
        None
    }

    fn create_element(&mut self, tag: &str) -> NodeId;
    fn create_text_node(&mut self, text: &str) -> NodeId;

    /// Appends `child` under `parent`, moving it if it already has a parent
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<()>;
    fn replace_child(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<()>;

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()>;
    fn remove_attribute(&mut self, node: NodeId, name: &str) -> Result<()>;

    /// Merges camel-cased style keys into the node's style map
    fn set_styles(&mut self, node: NodeId, styles: &StyleMap) -> Result<()>;
    fn remove_style(&mut self, node: NodeId, key: &str) -> Result<()>;

    /// Writes `data-*` attributes, skipping `None` values
    fn set_data(&mut self, node: NodeId, data: &GroupedMap) -> Result<()> {
        for (key, value) in data {
            if let Some(value) = value {
                self.set_attribute(node, &data_attribute_name(key), value)?;
            }
        }
        Ok(())
    }

    /// Writes `aria-*` attributes, skipping `None` values
    fn set_aria(&mut self, node: NodeId, aria: &GroupedMap) -> Result<()> {
        for (key, value) in aria {
            if let Some(value) = value {
                self.set_attribute(node, &aria_attribute_name(key), value)?;
            }
        }
        Ok(())
    }

    fn set_text(&mut self, node: NodeId, text: &str) -> Result<()>;
    fn set_property(&mut self, node: NodeId, name: &str, value: PropValue) -> Result<()>;
    fn focus(&mut self, node: NodeId) -> Result<()>;

    fn node_kind(&self, node: NodeId) -> Option<NodeKind>;
    fn tag(&self, node: NodeId) -> Option<&str>;
    fn text(&self, node: NodeId) -> Option<&str>;
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;
    fn attributes(&self, node: NodeId) -> Option<&Attributes>;
    fn styles(&self, node: NodeId) -> Option<&StyleMap>;
    fn property(&self, node: NodeId, name: &str) -> Option<&PropValue>;
    fn children(&self, node: NodeId) -> &[NodeId];
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn focused(&self) -> Option<NodeId> {
        None
    }
}

/// Holds the platform that builders and reconcilers currently talk to
///
/// The slot is an explicit value threaded through render calls, so each
/// request or thread owns its own.
pub struct ActivePlatform {
    current: Box<dyn Platform>,
}

impl ActivePlatform {
    pub fn new(platform: impl Platform + 'static) -> Self {
        Self {
            current: Box::new(platform),
        }
    }

    pub fn kind(&self) -> PlatformKind {
        self.current.kind()
    }

    pub fn get(&self) -> &dyn Platform {
        self.current.as_ref()
    }

    pub fn get_mut(&mut self) -> &mut dyn Platform {
        self.current.as_mut()
    }

    /// Install `next` and hand back the platform it displaced
    pub fn replace(&mut self, next: Box<dyn Platform>) -> Box<dyn Platform> {
        std::mem::replace(&mut self.current, next)
    }

    /// Run `f` against a fresh serialization platform
    ///
    /// The previous platform is restored when `f` returns or unwinds.
    pub fn with_serialization<T>(&mut self, f: impl FnOnce(&mut dyn Platform) -> T) -> T {
        let mut guard = SwapGuard::install(self, Box::new(SerialDocument::new()));
        f(guard.slot.current.as_mut())
    }
}

impl Default for ActivePlatform {
    fn default() -> Self {
        Self::new(SerialDocument::new())
    }
}

struct SwapGuard<'a> {
    slot: &'a mut ActivePlatform,
    previous: Option<Box<dyn Platform>>,
}

impl<'a> SwapGuard<'a> {
    fn install(slot: &'a mut ActivePlatform, next: Box<dyn Platform>) -> Self {
        let previous = slot.replace(next);
        debug!(
            from = previous.kind().as_str(),
            to = slot.kind().as_str(),
            "swapped active platform"
        );
        Self {
            slot,
            previous: Some(previous),
        }
    }
}

impl Drop for SwapGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.slot.current = previous;
            debug!(restored = self.slot.kind().as_str(), "restored active platform");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    #[test]
    fn test_with_serialization_swaps_and_restores() {
        let mut active = ActivePlatform::new(LiveDocument::new());
        assert_eq!(active.kind(), PlatformKind::Interactive);

        let seen = active.with_serialization(|platform| platform.kind());
        assert_eq!(seen, PlatformKind::Serialization);
        assert_eq!(active.kind(), PlatformKind::Interactive);
    }

    #[test]
    fn test_with_serialization_restores_after_panic() {
        let mut active = ActivePlatform::new(LiveDocument::new());

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            active.with_serialization(|_| panic!("render blew up"));
        }));

        assert!(outcome.is_err());
        assert_eq!(active.kind(), PlatformKind::Interactive);
    }

    #[test]
    fn test_set_data_skips_missing_values() {
        let mut doc = SerialDocument::new();
        let node = doc.create_element("div");
        let mut data = GroupedMap::new();
        data.insert("userId".to_string(), Some("7".to_string()));
        data.insert("gone".to_string(), None);
        doc.set_data(node, &data).unwrap();

        assert_eq!(doc.attribute(node, "data-user-id"), Some("7"));
        assert_eq!(doc.attributes(node).map(|a| a.len()), Some(1));
    }

    #[test]
    fn test_platform_kind_as_str() {
        assert_eq!(PlatformKind::Interactive.as_str(), "interactive");
        assert_eq!(PlatformKind::Serialization.as_str(), "serialization");
    }
}
