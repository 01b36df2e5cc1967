use super::materialize::materialize;
use crate::node::{
    aria_attribute_name, data_attribute_name, AbstractNode, ElementNode, GroupedMap, NodeId,
    NodeKind, PropValue, StyleMap,
};
use crate::platform::{Platform, Result};
use smallvec::SmallVec;
use tracing::trace;

/// Native fields compared on every element pass
pub const PROPERTY_FIELDS: [&str; 12] = [
    "onclick",
    "onkeydown",
    "onkeyup",
    "onkeypress",
    "onfocus",
    "onblur",
    "onchange",
    "onsubmit",
    "oninput",
    "value",
    "checked",
    "selected",
];

/// Bring `realized` in line with `proposed`, returning the node now in its place
pub(crate) fn diff(
    platform: &mut dyn Platform,
    proposed: &AbstractNode,
    realized: NodeId,
) -> Result<NodeId> {
    match (proposed, platform.node_kind(realized)) {
        (AbstractNode::Text(text), Some(NodeKind::Text)) => {
            if platform.text(realized) != Some(text.text.as_str()) {
                platform.set_text(realized, &text.text)?;
            }
            Ok(realized)
        }
        (AbstractNode::Element(element), Some(NodeKind::Element))
            if platform.tag(realized) == Some(element.tag.as_str()) =>
        {
            diff_attributes(platform, element, realized)?;
            diff_styles(platform, element, realized)?;
            diff_properties(platform, element, realized)?;
            diff_children(platform, element, realized)?;
            Ok(realized)
        }
        _ => replace(platform, proposed, realized),
    }
}

fn replace(platform: &mut dyn Platform, proposed: &AbstractNode, realized: NodeId) -> Result<NodeId> {
    let fresh = materialize(platform, proposed)?;
    if let Some(parent) = platform.parent(realized) {
        platform.replace_child(parent, fresh, realized)?;
    }
    trace!(old = ?realized, new = ?fresh, "replaced node");
    Ok(fresh)
}

fn diff_attributes(platform: &mut dyn Platform, proposed: &ElementNode, realized: NodeId) -> Result<()> {
    let stale: SmallVec<[String; 4]> = platform
        .attributes(realized)
        .into_iter()
        .flat_map(|attributes| attributes.keys())
        .filter(|name| proposed.attribute(name).is_none())
        .cloned()
        .collect();
    for name in &stale {
        platform.remove_attribute(realized, name)?;
    }

    for (name, value) in &proposed.attributes {
        if platform.attribute(realized, name) != Some(value.as_str()) {
            platform.set_attribute(realized, name, value)?;
        }
    }

    let data = changed_entries(&*platform, realized, &proposed.data, data_attribute_name);
    if !data.is_empty() {
        platform.set_data(realized, &data)?;
    }
    let aria = changed_entries(&*platform, realized, &proposed.aria, aria_attribute_name);
    if !aria.is_empty() {
        platform.set_aria(realized, &aria)?;
    }
    Ok(())
}

/// Grouped entries whose expanded attribute differs from the live one
fn changed_entries(
    platform: &dyn Platform,
    realized: NodeId,
    group: &GroupedMap,
    attribute_name: fn(&str) -> String,
) -> GroupedMap {
    group
        .iter()
        .filter(|(key, value)| {
            value.is_some() && platform.attribute(realized, &attribute_name(key)) != value.as_deref()
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

fn diff_styles(platform: &mut dyn Platform, proposed: &ElementNode, realized: NodeId) -> Result<()> {
    let (stale, changed): (SmallVec<[String; 4]>, StyleMap) = match platform.styles(realized) {
        Some(current) => (
            current
                .keys()
                .filter(|key| !proposed.style.contains_key(*key))
                .cloned()
                .collect(),
            proposed
                .style
                .iter()
                .filter(|(key, value)| current.get(*key) != Some(*value))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        ),
        None => (SmallVec::new(), proposed.style.clone()),
    };

    for key in &stale {
        platform.remove_style(realized, key)?;
    }
    if !changed.is_empty() {
        platform.set_styles(realized, &changed)?;
    }
    Ok(())
}

fn diff_properties(platform: &mut dyn Platform, proposed: &ElementNode, realized: NodeId) -> Result<()> {
    for name in PROPERTY_FIELDS {
        let wanted = proposed.properties.get(name).filter(|v| !v.is_null());
        let current = platform.property(realized, name).filter(|v| !v.is_null());
        if wanted != current {
            let value = wanted.cloned().unwrap_or(PropValue::Null);
            platform.set_property(realized, name, value)?;
        }
    }
    Ok(())
}

fn diff_children(platform: &mut dyn Platform, proposed: &ElementNode, realized: NodeId) -> Result<()> {
    let current: SmallVec<[NodeId; 8]> = platform.children(realized).iter().copied().collect();
    let count = current.len().max(proposed.children.len());

    for index in 0..count {
        match (proposed.children.get(index), current.get(index)) {
            (Some(child), Some(existing)) => {
                diff(platform, child, *existing)?;
            }
            (Some(child), None) => {
                let fresh = materialize(platform, child)?;
                platform.append_child(realized, fresh)?;
            }
            (None, Some(existing)) => platform.remove_child(realized, *existing)?,
            (None, None) => {}
        }
    }
    Ok(())
}
