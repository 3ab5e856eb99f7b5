//! Detached structural copies of the tree.
//!
//! A [`NodeSnapshot`] is plain data: it does not share identity with the
//! elements it was taken from, so it can be compared, stored or serialized
//! after the live tree has been rebuilt.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::node::{Element, Node};

/// A structural copy of a node and its descendants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        attributes: IndexMap<String, String>,
        #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
        style: IndexMap<String, String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
    Text {
        text: String,
    },
}

impl NodeSnapshot {
    /// A text snapshot.
    pub fn text(text: impl Into<String>) -> Self {
        NodeSnapshot::Text { text: text.into() }
    }

    /// An element snapshot with no style properties.
    pub fn element<A, K, V>(tag: &str, attributes: A, children: Vec<NodeSnapshot>) -> Self
    where
        A: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        NodeSnapshot::Element {
            tag: tag.to_string(),
            attributes: attributes
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
            style: IndexMap::new(),
            children,
        }
    }
}

impl Element {
    /// Take a detached copy of this element and its descendants.
    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::Element {
            tag: self.tag().to_string(),
            attributes: self.attributes(),
            style: self.styles(),
            children: self.children().iter().map(Node::snapshot).collect(),
        }
    }
}

impl Node {
    /// Take a detached copy of this node and its descendants.
    pub fn snapshot(&self) -> NodeSnapshot {
        match self {
            Node::Element(element) => element.snapshot(),
            Node::Text(text) => NodeSnapshot::text(text.clone()),
        }
    }
}
