//! Element Nodes
//!
//! This module defines the node types that make up the element tree.
//!
//! An [`Element`] is a shared handle: cloning it does not copy the element,
//! it yields another reference to the same node. That stable identity is what
//! lets a combinator hand out a container once and keep replacing its
//! children afterwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use super::error::DomError;

/// Unique identifier for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Generate a new unique node ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// An event dispatched to an element's listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    name: String,
}

impl Event {
    /// Create an event with the given name, e.g. `"click"` or `"submit"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Get the event name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An event listener callback.
pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

struct ElementInner {
    id: NodeId,
    tag: String,
    attributes: RwLock<IndexMap<String, String>>,
    /// Inline style properties, serialized into the `style` attribute.
    style: RwLock<IndexMap<String, String>>,
    /// The form `value` property. Not reflected into attributes.
    value: RwLock<String>,
    children: RwLock<Vec<Node>>,
    listeners: Mutex<IndexMap<String, SmallVec<[Listener; 1]>>>,
}

/// A handle to an element in the tree.
///
/// # Example
///
/// ```rust
/// use sprout_core::dom::{Element, Node};
///
/// let list = Element::new("ul");
/// let alias = list.clone();
///
/// list.append_child(Node::from(Element::new("li"))).unwrap();
/// assert!(alias.ptr_eq(&list));
/// assert_eq!(alias.child_count(), 1);
/// ```
#[derive(Clone)]
pub struct Element {
    inner: Arc<ElementInner>,
}

impl Element {
    /// Create an empty element with the given tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ElementInner {
                id: NodeId::new(),
                tag: tag.into(),
                attributes: RwLock::new(IndexMap::new()),
                style: RwLock::new(IndexMap::new()),
                value: RwLock::new(String::new()),
                children: RwLock::new(Vec::new()),
                listeners: Mutex::new(IndexMap::new()),
            }),
        }
    }

    /// Get the element's unique ID.
    pub fn id(&self) -> NodeId {
        self.inner.id
    }

    /// Get the element's tag name.
    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    /// Check whether two handles refer to the same element.
    pub fn ptr_eq(&self, other: &Element) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    // ------------------------------------------------------------------
    // Attributes and properties
    // ------------------------------------------------------------------

    /// Set an attribute, replacing any previous value in place.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.attributes.write().insert(name.into(), value.into());
    }

    /// Get an attribute value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.read().get(name).cloned()
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&self, name: &str) -> Option<String> {
        self.inner.attributes.write().shift_remove(name)
    }

    /// Get all attributes in insertion order.
    pub fn attributes(&self) -> IndexMap<String, String> {
        self.inner.attributes.read().clone()
    }

    /// Get the form `value` property.
    pub fn value(&self) -> String {
        self.inner.value.read().clone()
    }

    /// Set the form `value` property.
    pub fn set_value(&self, value: impl Into<String>) {
        *self.inner.value.write() = value.into();
    }

    /// Set an inline style property.
    pub fn set_style(&self, property: impl Into<String>, value: impl Into<String>) {
        self.inner.style.write().insert(property.into(), value.into());
    }

    /// Get an inline style property.
    pub fn style(&self, property: &str) -> Option<String> {
        self.inner.style.read().get(property).cloned()
    }

    /// Get all inline style properties in insertion order.
    pub fn styles(&self) -> IndexMap<String, String> {
        self.inner.style.read().clone()
    }

    // ------------------------------------------------------------------
    // Children
    // ------------------------------------------------------------------

    /// Append a child node.
    ///
    /// Fails with [`DomError::HierarchyRequest`] if the child is this element
    /// or one of its ancestors.
    pub fn append_child(&self, child: impl Into<Node>) -> Result<(), DomError> {
        let child = child.into();
        if let Node::Element(element) = &child {
            if element.ptr_eq(self) || element.contains(self) {
                return Err(DomError::HierarchyRequest {
                    parent: self.tag().to_string(),
                    child: element.tag().to_string(),
                });
            }
        }
        self.push_child(child);
        Ok(())
    }

    /// Append without the ancestry check. Only for freshly created parents.
    pub(crate) fn push_child(&self, child: Node) {
        self.inner.children.write().push(child);
    }

    /// Remove every child.
    pub fn clear_children(&self) {
        self.inner.children.write().clear();
    }

    /// Get a snapshot of the direct children.
    pub fn children(&self) -> Vec<Node> {
        self.inner.children.read().clone()
    }

    /// Get the direct child elements, skipping text.
    pub fn child_elements(&self) -> Vec<Element> {
        self.inner
            .children
            .read()
            .iter()
            .filter_map(|child| child.as_element().cloned())
            .collect()
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.inner.children.read().len()
    }

    /// Check whether `other` is a strict descendant of this element.
    pub fn contains(&self, other: &Element) -> bool {
        self.child_elements()
            .iter()
            .any(|child| child.ptr_eq(other) || child.contains(other))
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Concatenated text of every descendant text node, in document order.
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        for child in self.children() {
            match child {
                Node::Text(content) => text.push_str(&content),
                Node::Element(element) => text.push_str(&element.text_content()),
            }
        }
        text
    }

    /// Find the first element, this one included, whose `id` attribute matches.
    pub fn find_by_id(&self, id: &str) -> Option<Element> {
        if self.attribute("id").as_deref() == Some(id) {
            return Some(self.clone());
        }
        self.child_elements()
            .iter()
            .find_map(|child| child.find_by_id(id))
    }

    /// Find every descendant element with the given tag, in document order.
    /// The element itself is not included.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<Element> {
        let mut found = Vec::new();
        for child in self.child_elements() {
            if child.tag() == tag {
                found.push(child.clone());
            }
            found.extend(child.find_all_by_tag(tag));
        }
        found
    }

    // ------------------------------------------------------------------
    // Events
    // ------------------------------------------------------------------

    /// Register a listener for events with the given name.
    pub fn add_event_listener<F>(&self, name: impl Into<String>, listener: F)
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.inner
            .listeners
            .lock()
            .entry(name.into())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Run this element's listeners for `event`, in registration order.
    ///
    /// Returns the number of listeners invoked. Events do not bubble.
    pub fn dispatch(&self, event: &Event) -> usize {
        let listeners: SmallVec<[Listener; 1]> = self
            .inner
            .listeners
            .lock()
            .get(event.name())
            .cloned()
            .unwrap_or_default();

        tracing::trace!(
            element = self.id().raw(),
            tag = self.tag(),
            event = event.name(),
            listeners = listeners.len(),
            "dispatch"
        );

        for listener in &listeners {
            listener(event);
        }
        listeners.len()
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Element {}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id())
            .field("tag", &self.tag())
            .field("attributes", &*self.inner.attributes.read())
            .field("children", &*self.inner.children.read())
            .finish()
    }
}

/// A node in the tree: an element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Get the element, if this is an element node.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Get the text, if this is a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Text content of the node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element(element) => element.text_content(),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&Element> for Node {
    fn from(element: &Element) -> Self {
        Node::Element(element.clone())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&String> for Node {
    fn from(text: &String) -> Self {
        Node::Text(text.clone())
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn node_ids_are_unique() {
        let id1 = NodeId::new();
        let id2 = NodeId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn clone_is_the_same_element() {
        let element = Element::new("div");
        let alias = element.clone();

        alias.set_attribute("class", "box");
        assert_eq!(element.attribute("class").as_deref(), Some("box"));
        assert_eq!(element, alias);
        assert_ne!(element, Element::new("div"));
    }

    #[test]
    fn attributes_keep_insertion_order() {
        let element = Element::new("input");
        element.set_attribute("type", "text");
        element.set_attribute("placeholder", "x");
        element.set_attribute("type", "checkbox");

        let names: Vec<String> = element.attributes().keys().cloned().collect();
        assert_eq!(names, vec!["type", "placeholder"]);
        assert_eq!(element.attribute("type").as_deref(), Some("checkbox"));

        assert_eq!(element.remove_attribute("type").as_deref(), Some("checkbox"));
        assert!(element.attribute("type").is_none());
    }

    #[test]
    fn append_and_clear_children() {
        let parent = Element::new("p");
        parent.append_child("hello ").unwrap();
        parent.append_child(Element::new("b")).unwrap();
        assert_eq!(parent.child_count(), 2);
        assert_eq!(parent.child_elements().len(), 1);

        parent.clear_children();
        assert_eq!(parent.child_count(), 0);
    }

    #[test]
    fn append_rejects_cycles() {
        let outer = Element::new("div");
        let inner = Element::new("span");
        outer.append_child(&inner).unwrap();

        assert!(matches!(
            outer.append_child(&outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert!(matches!(
            inner.append_child(&outer),
            Err(DomError::HierarchyRequest { .. })
        ));
        assert_eq!(inner.child_count(), 0);
    }

    #[test]
    fn text_content_walks_descendants() {
        let em = Element::new("em");
        em.append_child("world").unwrap();
        let p = Element::new("p");
        p.append_child("hello ").unwrap();
        p.append_child(&em).unwrap();
        p.append_child("!").unwrap();

        assert_eq!(p.text_content(), "hello world!");
    }

    #[test]
    fn queries_find_descendants() {
        let root = Element::new("body");
        let app = Element::new("div");
        app.set_attribute("id", "app");
        let item = Element::new("li");
        app.append_child(&item).unwrap();
        root.append_child(&app).unwrap();

        assert_eq!(root.find_by_id("app"), Some(app.clone()));
        assert_eq!(app.find_by_id("app"), Some(app.clone()));
        assert!(root.find_by_id("missing").is_none());
        assert_eq!(root.find_all_by_tag("li"), vec![item]);
        assert!(root.find_all_by_tag("body").is_empty());
    }

    #[test]
    fn value_and_style_are_properties() {
        let input = Element::new("input");
        input.set_value("typed");
        input.set_style("opacity", "0.5");

        assert_eq!(input.value(), "typed");
        assert_eq!(input.style("opacity").as_deref(), Some("0.5"));
        assert!(input.attribute("value").is_none());
    }

    #[test]
    fn dispatch_runs_matching_listeners_in_order() {
        let button = Element::new("button");
        let order = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let order = order.clone();
            button.add_event_listener("click", move |event: &Event| {
                order.lock().push(format!("{name}:{}", event.name()));
            });
        }
        let other = Arc::new(AtomicUsize::new(0));
        let other_clone = other.clone();
        button.add_event_listener("change", move |_: &Event| {
            other_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(button.dispatch(&Event::new("click")), 2);
        assert_eq!(*order.lock(), vec!["first:click", "second:click"]);
        assert_eq!(other.load(Ordering::SeqCst), 0);
        assert_eq!(button.dispatch(&Event::new("submit")), 0);
    }

    #[test]
    fn listener_may_register_another_listener() {
        let element = Element::new("div");
        let target = element.clone();
        element.add_event_listener("click", move |_: &Event| {
            target.add_event_listener("click", |_: &Event| {});
        });

        assert_eq!(element.dispatch(&Event::new("click")), 1);
        assert_eq!(element.dispatch(&Event::new("click")), 2);
    }
}
