mod props;
mod types;

pub use props::{Event, Handler, PropValue, Props};
pub use types::{
    aria_attribute_name, data_attribute_name, AbstractNode, Attributes, ElementNode, GroupedMap,
    NodeId, NodeKind, Properties, StyleMap, StyleValue, Tag, TextNode,
};
pub(crate) use types::normalize_tag;
