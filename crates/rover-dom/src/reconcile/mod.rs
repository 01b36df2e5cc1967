//! Reconciliation of a freshly rendered [`AbstractNode`] tree against a
//! realized one.
//!
//! A pass runs in four steps: strip `script` elements from the proposal,
//! bookmark focus and preserved attributes (interactive platforms only),
//! diff positionally, then restore the bookmark.

mod bookmark;
mod diff;
mod materialize;

use crate::node::{AbstractNode, NodeId};
use crate::platform::{Platform, Result};
use bookmark::Bookmark;
use tracing::debug;

pub use diff::PROPERTY_FIELDS;
pub use materialize::materialize;

/// Marker class carried by the element that should keep input focus
pub const FOCUS_CLASS: &str = "focused";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Attributes whose live values survive a pass, keyed by element id
    pub preserve_attributes: Vec<String>,
    pub focus_class: String,
}

impl ReconcileOptions {
    pub fn preserve(mut self, attribute: impl Into<String>) -> Self {
        self.preserve_attributes.push(attribute.into());
        self
    }

    pub fn with_focus_class(mut self, class: impl Into<String>) -> Self {
        self.focus_class = class.into();
        self
    }
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            preserve_attributes: Vec::new(),
            focus_class: FOCUS_CLASS.to_string(),
        }
    }
}

/// Mutate `realized` in place until it matches `proposed`.
///
/// Returns the node now occupying `realized`'s position. That is `realized`
/// itself unless the root had to be replaced; a replaced root without a parent
/// comes back detached.
pub fn reconcile(
    platform: &mut dyn Platform,
    proposed: AbstractNode,
    realized: NodeId,
    options: &ReconcileOptions,
) -> Result<NodeId> {
    let Some(proposed) = strip_scripts(proposed) else {
        debug!(?realized, "proposed root is a script, nothing to reconcile");
        return Ok(realized);
    };

    let bookmark = platform
        .is_browser_like()
        .then(|| Bookmark::capture(&*platform, realized, options));

    let root = diff::diff(platform, &proposed, realized)?;

    if let Some(bookmark) = bookmark {
        bookmark.restore(platform, root, options)?;
    }

    debug!(?root, replaced = root != realized, "reconciled");
    Ok(root)
}

/// Drop every `script` element; `None` when `node` is one
pub fn strip_scripts(node: AbstractNode) -> Option<AbstractNode> {
    match node {
        AbstractNode::Element(element) if element.tag.eq_ignore_ascii_case("script") => None,
        AbstractNode::Element(mut element) => {
            element.children = std::mem::take(&mut element.children)
                .into_iter()
                .filter_map(strip_scripts)
                .collect();
            Some(AbstractNode::Element(element))
        }
        text => Some(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ElementNode;

    #[test]
    fn test_strip_scripts_nested() {
        let mut outer = ElementNode::new("div");
        let mut inner = ElementNode::new("section");
        inner.children.push(ElementNode::new("SCRIPT").into());
        inner.children.push(AbstractNode::text("kept"));
        outer.children.push(inner.into());
        outer.children.push(ElementNode::new("script").into());

        let stripped = strip_scripts(outer.into()).unwrap();

        assert_eq!(stripped.children().len(), 1);
        assert_eq!(stripped.children()[0].children().len(), 1);
        assert_eq!(stripped.text_content(), "kept");
    }

    #[test]
    fn test_script_root_is_dropped() {
        assert_eq!(strip_scripts(ElementNode::new("script").into()), None);
    }

    #[test]
    fn test_options_builder() {
        let options = ReconcileOptions::default()
            .preserve("aria-expanded")
            .with_focus_class("active");
        assert_eq!(options.preserve_attributes, vec!["aria-expanded"]);
        assert_eq!(options.focus_class, "active");
    }
}
