//! In-Memory Element Tree
//!
//! The tree the combinators render into. It plays the role a browser document
//! plays for a web page, without requiring one.
//!
//! # Overview
//!
//! - [`Element`] is a shared handle with a stable identity. Attributes,
//!   inline style, the form `value` property, children and event listeners
//!   all live behind it.
//! - [`Node`] is either an element or a run of text.
//! - [`build`] and [`h!`](crate::h) construct elements in one expression.
//! - [`mount`] and [`mount_by_id`] attach a tree under an explicit root.
//! - [`Element::to_html`] and [`Element::snapshot`] read a tree back out.
//!
//! Nothing here diffs or patches. When a combinator re-renders, its old
//! children are simply dropped.

mod builder;
mod error;
mod html;
mod mount;
mod node;
mod snapshot;

pub use builder::{build, AttrValue, Attrs};
pub use error::DomError;
pub use mount::{mount, mount_by_id};
pub use node::{Element, Event, Listener, Node, NodeId};
pub use snapshot::NodeSnapshot;
