//! Element Builder
//!
//! [`build`] and the [`h!`](crate::h) macro create an element, set its
//! attributes and append its children in one expression.
//!
//! Attribute values are stringified when the element is built. Booleans
//! become `true`/`false`, integers print in decimal, and floats follow the
//! usual script-engine spelling for the common cases (`1.0` is `"1"`, `NaN`
//! is `"NaN"`, infinities are `"Infinity"`/`"-Infinity"`).

use std::fmt;

use indexmap::IndexMap;

use super::node::{Element, Node};

/// A value that can be stored in an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
}

impl AttrValue {
    /// Stringify any displayable value.
    pub fn display(value: impl fmt::Display) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Text(text) => f.write_str(text),
            AttrValue::Bool(value) => write!(f, "{value}"),
            AttrValue::Int(value) => write!(f, "{value}"),
            AttrValue::UInt(value) => write!(f, "{value}"),
            AttrValue::Float(value) => write_float(f, *value),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_nan() {
        f.write_str("NaN")
    } else if value.is_infinite() {
        f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" })
    } else if value == 0.0 {
        // Negative zero prints as "0"
        f.write_str("0")
    } else {
        write!(f, "{value}")
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Text(value.clone())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        AttrValue::Text(value.to_string())
    }
}

macro_rules! attr_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for AttrValue {
            fn from(value: $ty) -> Self {
                AttrValue::Int(value as i64)
            }
        })*
    };
}

macro_rules! attr_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for AttrValue {
            fn from(value: $ty) -> Self {
                AttrValue::UInt(value as u64)
            }
        })*
    };
}

attr_from_signed!(i8, i16, i32, i64, isize);
attr_from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for AttrValue {
    fn from(value: f32) -> Self {
        AttrValue::Float(f64::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

/// An ordered set of attributes to apply to a new element.
///
/// Setting a name twice keeps the first position and the last value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attrs(IndexMap<String, AttrValue>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an attribute, builder style.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Add an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<AttrValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (name, value) in iter {
            attrs.set(name, value);
        }
        attrs
    }
}

impl IntoIterator for Attrs {
    type Item = (String, AttrValue);
    type IntoIter = indexmap::map::IntoIter<String, AttrValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Create an element with the given attributes and children.
///
/// Strings become text nodes; elements are appended as they are, in order.
///
/// ```rust
/// use sprout_core::dom::{build, Attrs, Element, Node};
///
/// let input = build(
///     "input",
///     Attrs::new().with("type", "checkbox").with("checked", true),
///     Vec::<Node>::new(),
/// );
/// assert_eq!(input.attribute("checked").as_deref(), Some("true"));
///
/// let label = build("label", Attrs::new(), [Node::from(input), Node::from(" buy milk")]);
/// assert_eq!(label.child_count(), 2);
/// ```
pub fn build<I, C>(tag: &str, attrs: Attrs, children: I) -> Element
where
    I: IntoIterator<Item = C>,
    C: Into<Node>,
{
    let element = Element::new(tag);
    for (name, value) in attrs {
        element.set_attribute(name, value.to_string());
    }
    for child in children {
        element.push_child(child.into());
    }
    element
}

/// Build an element inline.
///
/// ```rust
/// use sprout_core::h;
///
/// let heading = h!("h1", {}, "to do app");
/// let input = h!("input", { "type" => "text", "size" => 20 });
/// let form = h!("form", { "class" => "new-todo" }, input.clone(), heading);
///
/// assert_eq!(input.attribute("size").as_deref(), Some("20"));
/// assert_eq!(form.child_count(), 2);
/// assert_eq!(h!("br").child_count(), 0);
/// ```
#[macro_export]
macro_rules! h {
    ($tag:expr) => {
        $crate::dom::build(
            $tag,
            $crate::dom::Attrs::new(),
            ::std::vec::Vec::<$crate::dom::Node>::new(),
        )
    };
    ($tag:expr, { $($name:expr => $value:expr),* $(,)? } $(, $child:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut attrs = $crate::dom::Attrs::new();
        $( attrs.set($name, $value); )*
        #[allow(unused_mut)]
        let mut children: ::std::vec::Vec<$crate::dom::Node> = ::std::vec::Vec::new();
        $( children.push($crate::dom::Node::from($child)); )*
        $crate::dom::build($tag, attrs, children)
    }};
}
