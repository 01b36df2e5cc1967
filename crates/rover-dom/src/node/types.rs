use super::props::PropValue;
use crate::serialize::kebab_case;
use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};
use std::fmt;

/// Handle to a realized node inside a platform's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub type Tag = SmartString<LazyCompact>;
pub type Attributes = IndexMap<String, String>;
pub type StyleMap = IndexMap<String, StyleValue>;
pub type Properties = IndexMap<String, PropValue>;
/// `dataset`/`aria` entries; `None` means the attribute is absent
pub type GroupedMap = IndexMap<String, Option<String>>;

/// Kind of a realized node as reported by a platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Str(String),
    Num(f64),
}

impl StyleValue {
    pub fn to_css(&self) -> String {
        match self {
            StyleValue::Str(s) => s.clone(),
            StyleValue::Num(n) => format_number(*n),
        }
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Str(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Str(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Num(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Num(value as f64)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        StyleValue::Num(value as f64)
    }
}

impl From<u32> for StyleValue {
    fn from(value: u32) -> Self {
        StyleValue::Num(value as f64)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: Tag,
    pub attributes: Attributes,
    pub style: StyleMap,
    pub data: GroupedMap,
    pub aria: GroupedMap,
    /// Native fields that do not reflect as attributes (handlers, form state)
    pub properties: Properties,
    pub children: Vec<AbstractNode>,
}

impl ElementNode {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: normalize_tag(tag),
            attributes: Attributes::new(),
            style: StyleMap::new(),
            data: GroupedMap::new(),
            aria: GroupedMap::new(),
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// The `data-*` and `aria-*` attributes the grouped maps expand to
    pub fn grouped_attributes(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        let data = self
            .data
            .iter()
            .filter_map(|(key, value)| Some((data_attribute_name(key), value.as_deref()?)));
        let aria = self
            .aria
            .iter()
            .filter_map(|(key, value)| Some((aria_attribute_name(key), value.as_deref()?)));
        data.chain(aria)
    }

    /// Value of `name` whether it is a plain or a grouped attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str).or_else(|| {
            self.grouped_attributes()
                .find(|(attr, _)| attr == name)
                .map(|(_, value)| value)
        })
    }
}

/// `userId` -> `data-user-id`
pub fn data_attribute_name(key: &str) -> String {
    format!("data-{}", kebab_case(key))
}

/// `Expanded` -> `aria-expanded`
pub fn aria_attribute_name(key: &str) -> String {
    format!("aria-{}", key.to_ascii_lowercase())
}

/// HTML tag names are case-insensitive and kept lower-case. Names that start
/// lower-case keep their spelling so SVG's `linearGradient` survives.
pub(crate) fn normalize_tag(tag: &str) -> Tag {
    if tag.starts_with(|c: char| c.is_ascii_lowercase()) {
        Tag::from(tag)
    } else {
        Tag::from(tag.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub text: String,
}

/// Platform-neutral description of an element or text node
///
/// Every render produces a brand-new tree of these; nothing holds on to one
/// after it has been materialized or reconciled.
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractNode {
    Element(ElementNode),
    Text(TextNode),
}

impl AbstractNode {
    pub fn text(text: impl Into<String>) -> Self {
        AbstractNode::Text(TextNode { text: text.into() })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            AbstractNode::Element(_) => NodeKind::Element,
            AbstractNode::Text(_) => NodeKind::Text,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            AbstractNode::Element(el) => Some(el.tag.as_str()),
            AbstractNode::Text(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            AbstractNode::Element(el) => Some(el),
            AbstractNode::Text(_) => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.as_element()?.attribute(name)
    }

    pub fn children(&self) -> &[AbstractNode] {
        match self {
            AbstractNode::Element(el) => &el.children,
            AbstractNode::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and all its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            AbstractNode::Text(t) => out.push_str(&t.text),
            AbstractNode::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<ElementNode> for AbstractNode {
    fn from(value: ElementNode) -> Self {
        AbstractNode::Element(value)
    }
}

/// Integral values print without a fractional part
pub(crate) fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}
