//! Element builder
//!
//! Turns `tag + args` into an [`AbstractNode`]. Which property lands where is
//! decided by asking the platform the builder was created for, so the same
//! render function yields property-backed handlers on the interactive
//! backend and plain attributes on the serialization backend. `dataset` and
//! `aria` stay grouped so materialization can hand them to the platform's
//! `set_data`/`set_aria`.

use crate::node::{AbstractNode, ElementNode, PropValue, Props};
use crate::platform::{NativeField, Platform};
use tracing::warn;

/// Names the interactive backend sets as attributes without a native field
const ATTRIBUTE_ONLY: &[&str] = &[
    "for",
    "width",
    "height",
    "x",
    "y",
    "cx",
    "cy",
    "r",
    "rx",
    "ry",
    "x1",
    "y1",
    "x2",
    "y2",
    "d",
    "points",
    "viewBox",
    "fill",
    "stroke",
    "stroke-width",
    "transform",
    "xmlns",
    "preserveAspectRatio",
];

/// One argument to [`Builder::el`]
#[derive(Debug, Clone)]
pub enum Arg {
    /// Child list, possibly nested
    Children(Vec<Arg>),
    Node(AbstractNode),
    Text(String),
    Props(Props),
    /// Contributes nothing
    Skip,
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Arg::Text(value.to_string())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Arg::Text(value)
    }
}

impl From<&String> for Arg {
    fn from(value: &String) -> Self {
        Arg::Text(value.clone())
    }
}

impl From<AbstractNode> for Arg {
    fn from(value: AbstractNode) -> Self {
        Arg::Node(value)
    }
}

impl From<ElementNode> for Arg {
    fn from(value: ElementNode) -> Self {
        Arg::Node(value.into())
    }
}

impl From<Props> for Arg {
    fn from(value: Props) -> Self {
        Arg::Props(value)
    }
}

impl<T: Into<Arg>> From<Vec<T>> for Arg {
    fn from(value: Vec<T>) -> Self {
        Arg::Children(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>, const N: usize> From<[T; N]> for Arg {
    fn from(value: [T; N]) -> Self {
        Arg::Children(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Arg>> From<Option<T>> for Arg {
    fn from(value: Option<T>) -> Self {
        value.map_or(Arg::Skip, Into::into)
    }
}

/// Build an element: `el!(h, "div", props, "text", vec![...])`
#[macro_export]
macro_rules! el {
    ($builder:expr, $tag:expr $(, $arg:expr)* $(,)?) => {
        $builder.el($tag, ::std::vec![$($crate::builder::Arg::from($arg)),*])
    };
}

/// Element factory bound to one platform
#[derive(Clone, Copy)]
pub struct Builder<'p> {
    platform: &'p dyn Platform,
}

impl<'p> Builder<'p> {
    pub fn new(platform: &'p dyn Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &'p dyn Platform {
        self.platform
    }

    pub fn text(&self, text: impl Into<String>) -> AbstractNode {
        AbstractNode::text(text)
    }

    pub fn el(&self, tag: &str, args: impl IntoIterator<Item = Arg>) -> AbstractNode {
        let mut element = ElementNode::new(tag);
        for arg in args {
            self.apply_arg(&mut element, arg);
        }
        element.into()
    }

    fn apply_arg(&self, element: &mut ElementNode, arg: Arg) {
        match arg {
            Arg::Children(list) => {
                for item in list {
                    self.apply_arg(element, item);
                }
            }
            Arg::Node(node) => element.children.push(node),
            Arg::Text(text) => element.children.push(AbstractNode::text(text)),
            Arg::Props(props) => {
                for (name, value) in props {
                    self.apply_prop(element, &name, value);
                }
            }
            Arg::Skip => {}
        }
    }

    fn apply_prop(&self, element: &mut ElementNode, name: &str, value: PropValue) {
        if value.is_null() {
            return;
        }

        match (name, value) {
            ("style", PropValue::Style(styles)) => {
                for (key, value) in styles {
                    element.style.insert(key, value);
                }
            }
            ("dataset", PropValue::Map(map)) => element.data.extend(map),
            ("aria", PropValue::Map(map)) => element.aria.extend(map),
            (name, value) if self.platform.is_browser_like() => {
                self.apply_interactive(element, name, value)
            }
            (name, value) => apply_serialized(element, name, value),
        }
    }

    fn apply_interactive(&self, element: &mut ElementNode, name: &str, value: PropValue) {
        match self.platform.native_field(&element.tag, name) {
            Some(NativeField::Reflected(attr)) => set_reflected(element, attr, &value),
            Some(NativeField::Property) => {
                element.properties.insert(name.to_string(), value);
            }
            None if ATTRIBUTE_ONLY.contains(&name) => set_reflected(element, name, &value),
            None => {
                warn!(
                    tag = element.tag.as_str(),
                    property = name,
                    "unknown property dropped"
                );
            }
        }
    }
}

fn set_reflected(element: &mut ElementNode, attr: &str, value: &PropValue) {
    match value.to_attribute_value() {
        Some(rendered) => {
            element.attributes.insert(attr.to_string(), rendered);
        }
        None => {
            element.attributes.shift_remove(attr);
        }
    }
}

fn apply_serialized(element: &mut ElementNode, name: &str, value: PropValue) {
    // Handlers mean nothing without an interactive session
    if name.starts_with("on") {
        return;
    }
    let attr = if name == "className" { "class" } else { name };
    set_reflected(element, attr, &value);
}
