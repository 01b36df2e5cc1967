use crate::node::{AbstractNode, NodeId};
use crate::platform::{Platform, Result};

/// Realize `node` and its subtree on `platform`; the returned node is detached
pub fn materialize(platform: &mut dyn Platform, node: &AbstractNode) -> Result<NodeId> {
    match node {
        AbstractNode::Text(text) => Ok(platform.create_text_node(&text.text)),
        AbstractNode::Element(element) => {
            let id = platform.create_element(&element.tag);
            for (name, value) in &element.attributes {
                platform.set_attribute(id, name, value)?;
            }
            if !element.data.is_empty() {
                platform.set_data(id, &element.data)?;
            }
            if !element.aria.is_empty() {
                platform.set_aria(id, &element.aria)?;
            }
            if !element.style.is_empty() {
                platform.set_styles(id, &element.style)?;
            }
            for (name, value) in &element.properties {
                platform.set_property(id, name, value.clone())?;
            }
            for child in &element.children {
                let child_id = materialize(platform, child)?;
                platform.append_child(id, child_id)?;
            }
            Ok(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;
    use crate::el;
    use crate::node::{Handler, PropValue, Props};
    use crate::node::GroupedMap;
    use crate::platform::{LiveDocument, PlatformOp, RecordingPlatform, SerialDocument};

    #[test]
    fn test_materialize_serial_tree() {
        let mut doc = SerialDocument::new();
        let node = {
            let h = Builder::new(&doc);
            el!(
                h,
                "div",
                Props::new().class("card").style("color", "red"),
                el!(h, "h1", "Title"),
                el!(h, "br")
            )
        };

        let root = materialize(&mut doc, &node).unwrap();
        assert_eq!(
            doc.to_html(root),
            r#"<div class="card" style="color:red"><h1>Title</h1><br /></div>"#
        );
        assert_eq!(doc.parent(root), None);
    }

    #[test]
    fn test_grouped_props_go_through_platform() {
        let mut platform = RecordingPlatform::new(LiveDocument::new());
        let node = {
            let h = Builder::new(&platform);
            el!(
                h,
                "div",
                Props::new()
                    .data("userId", Some("7"))
                    .aria("label", Some("x"))
            )
        };

        let div = materialize(&mut platform, &node).unwrap();

        let mut data = GroupedMap::new();
        data.insert("userId".to_string(), Some("7".to_string()));
        let mut aria = GroupedMap::new();
        aria.insert("label".to_string(), Some("x".to_string()));
        assert_eq!(
            platform.ops(),
            &[
                PlatformOp::CreateElement {
                    tag: "div".to_string()
                },
                PlatformOp::SetData { node: div, data },
                PlatformOp::SetAria { node: div, aria },
            ]
        );
        assert_eq!(platform.attribute(div, "data-user-id"), Some("7"));
        assert_eq!(platform.attribute(div, "aria-label"), Some("x"));
    }

    #[test]
    fn test_materialize_live_sets_properties() {
        let mut doc = LiveDocument::new();
        let handler = Handler::new(|_| {});
        let node = {
            let h = Builder::new(&doc);
            el!(h, "button", Props::new().on("click", handler.clone()), "Go")
        };

        let button = materialize(&mut doc, &node).unwrap();
        assert_eq!(
            doc.property(button, "onclick"),
            Some(&PropValue::Handler(handler))
        );
        assert_eq!(doc.attributes(button).map(|a| a.len()), Some(0));
    }
}
