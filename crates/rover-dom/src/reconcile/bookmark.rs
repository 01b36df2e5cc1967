use super::ReconcileOptions;
use crate::node::NodeId;
use crate::platform::{add_class, descendants, find_by_id, has_class, Platform, Result};
use indexmap::IndexMap;

/// State held by the live tree that a structural diff would clobber
///
/// Captured before the diff and consumed by [`Bookmark::restore`] after it,
/// so it never outlives one pass.
#[derive(Debug, Default)]
pub(crate) struct Bookmark {
    focused_id: Option<String>,
    /// element id -> attribute -> value
    preserved: IndexMap<String, IndexMap<String, String>>,
}

impl Bookmark {
    pub fn capture(platform: &dyn Platform, root: NodeId, options: &ReconcileOptions) -> Self {
        let mut bookmark = Self::default();
        let nodes = descendants(platform, root);

        bookmark.focused_id = nodes.iter().find_map(|node| {
            let id = platform.attribute(*node, "id")?;
            has_class(platform, *node, &options.focus_class).then(|| id.to_string())
        });

        for attr in &options.preserve_attributes {
            for node in &nodes {
                let (Some(id), Some(value)) =
                    (platform.attribute(*node, "id"), platform.attribute(*node, attr))
                else {
                    continue;
                };
                bookmark
                    .preserved
                    .entry(id.to_string())
                    .or_default()
                    .insert(attr.clone(), value.to_string());
            }
        }

        bookmark
    }

    pub fn is_empty(&self) -> bool {
        self.focused_id.is_none() && self.preserved.is_empty()
    }

    /// Re-apply captured state under `root`, touching only what changed
    pub fn restore(
        self,
        platform: &mut dyn Platform,
        root: NodeId,
        options: &ReconcileOptions,
    ) -> Result<()> {
        if self.is_empty() {
            return Ok(());
        }

        if let Some(id) = &self.focused_id {
            if let Some(node) = find_by_id(platform, root, id) {
                add_class(platform, node, &options.focus_class)?;
                if platform.focused() != Some(node) {
                    platform.focus(node)?;
                }
            }
        }

        for (id, attributes) in &self.preserved {
            let Some(node) = find_by_id(platform, root, id) else {
                continue;
            };
            for (name, value) in attributes {
                if platform.attribute(node, name) != Some(value.as_str()) {
                    platform.set_attribute(node, name, value)?;
                }
            }
        }

        Ok(())
    }
}
