use super::types::{format_number, NodeId, StyleMap, StyleValue};
use indexmap::IndexMap;
use std::fmt;
use std::rc::Rc;

/// Event delivered to a handler by an interactive platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event name without the `on` prefix, e.g. `click`
    pub kind: String,
    pub target: NodeId,
    pub current_target: NodeId,
}

/// Event callback; two handlers are equal only when they share an allocation
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event)>);

impl Handler {
    pub fn new(f: impl Fn(&Event) + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handler({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// Value carried by a property bag entry
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Null,
    Str(String),
    Bool(bool),
    Num(f64),
    Handler(Handler),
    Style(StyleMap),
    Map(IndexMap<String, Option<String>>),
}

impl PropValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PropValue::Null)
    }

    /// String form used when the value lands in an attribute.
    /// `None` means the attribute should be absent.
    pub fn to_attribute_value(&self) -> Option<String> {
        match self {
            PropValue::Str(s) => Some(s.clone()),
            PropValue::Num(n) => Some(format_number(*n)),
            PropValue::Bool(true) => Some(String::new()),
            PropValue::Bool(false)
            | PropValue::Null
            | PropValue::Handler(_)
            | PropValue::Style(_)
            | PropValue::Map(_) => None,
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        PropValue::Str(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        PropValue::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        PropValue::Bool(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        PropValue::Num(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        PropValue::Num(value as f64)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        PropValue::Num(value as f64)
    }
}

impl From<Handler> for PropValue {
    fn from(value: Handler) -> Self {
        PropValue::Handler(value)
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PropValue::Null, Into::into)
    }
}

/// Property bag handed to the element builder
///
/// Keys follow the native field names (`className`, `onclick`, `value`);
/// `style`, `dataset` and `aria` are grouped maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props {
    entries: IndexMap<String, PropValue>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: &str, value: impl Into<PropValue>) -> Self {
        self.entries.insert(name.to_string(), value.into());
        self
    }

    pub fn id(self, id: impl Into<PropValue>) -> Self {
        self.set("id", id)
    }

    pub fn class(self, class: impl Into<PropValue>) -> Self {
        self.set("className", class)
    }

    pub fn style(mut self, key: &str, value: impl Into<StyleValue>) -> Self {
        let value = value.into();
        match self.entries.get_mut("style") {
            Some(PropValue::Style(map)) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                let mut map = StyleMap::new();
                map.insert(key.to_string(), value);
                self.entries.insert("style".to_string(), PropValue::Style(map));
            }
        }
        self
    }

    pub fn data(mut self, key: &str, value: Option<impl Into<String>>) -> Self {
        self.insert_grouped("dataset", key, value.map(Into::into));
        self
    }

    pub fn aria(mut self, key: &str, value: Option<impl Into<String>>) -> Self {
        self.insert_grouped("aria", key, value.map(Into::into));
        self
    }

    /// Bind a handler; `event` is given without the `on` prefix
    pub fn on(self, event: &str, handler: Handler) -> Self {
        let name = format!("on{}", event);
        self.set(&name, handler)
    }

    pub fn value(self, value: impl Into<PropValue>) -> Self {
        self.set("value", value)
    }

    pub fn checked(self, checked: bool) -> Self {
        self.set("checked", checked)
    }

    pub fn selected(self, selected: bool) -> Self {
        self.set("selected", selected)
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &PropValue)> {
        self.entries.iter()
    }

    fn insert_grouped(&mut self, group: &str, key: &str, value: Option<String>) {
        match self.entries.get_mut(group) {
            Some(PropValue::Map(map)) => {
                map.insert(key.to_string(), value);
            }
            _ => {
                let mut map = IndexMap::new();
                map.insert(key.to_string(), value);
                self.entries.insert(group.to_string(), PropValue::Map(map));
            }
        }
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = indexmap::map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
