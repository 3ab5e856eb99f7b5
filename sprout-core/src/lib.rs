//! Sprout Core
//!
//! This crate provides a minimal reactive rendering core. It implements:
//!
//! - Reactive primitives (signals and explicitly registered effects)
//! - An in-memory element tree with a one-expression builder
//! - Conditional and list combinators that rebuild their subtree on change
//! - A small todo application exercising all of the above
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - `reactive`: signals, effects and effect registration
//! - `dom`: elements, text nodes, building, mounting and serialization
//! - `control_flow`: `show` and `each`
//! - `todo`: the reference application
//!
//! Updates are pushed synchronously. A `set` runs every effect registered on
//! the signal, in registration order, before it returns. Nothing is tracked
//! automatically, batched or diffed.
//!
//! # Example
//!
//! ```rust
//! use sprout_core::control_flow::each;
//! use sprout_core::dom::{mount, Element};
//! use sprout_core::h;
//! use sprout_core::reactive::Signal;
//!
//! let items = Signal::new(vec!["milk".to_string()]);
//! let list = each(&items, |item| h!("li", {}, item));
//!
//! let root = Element::new("body");
//! mount(&root, h!("ul", {}, list)).unwrap();
//!
//! items.update(|v| v.push("eggs".to_string()));
//! assert_eq!(
//!     root.to_html(),
//!     "<body><ul><span><li>milk</li><li>eggs</li></span></ul></body>"
//! );
//! ```

pub mod control_flow;
pub mod dom;
pub mod reactive;
pub mod todo;
