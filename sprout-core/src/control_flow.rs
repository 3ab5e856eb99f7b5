//! Control Flow Primitives - Conditional and list rendering.
//!
//! - [`show`] renders a subtree while a `Signal<bool>` is true.
//! - [`each`] renders one subtree per item of a `Signal<Vec<T>>`.
//!
//! # Pattern: Stable Container, Full Rebuild
//!
//! Both return a `span` container straight away and register an effect on the
//! governing signal. Every time the effect runs it empties the container and
//! renders its contents again from scratch. Nothing is keyed, reused or
//! diffed, so the container always reflects the latest `set` and a list of N
//! items costs N renders per change, even when one item changed.
//!
//! The container's identity never changes, which is what allows it to be
//! embedded in a parent tree once and still show later updates.
//!
//! # Sharp Edge
//!
//! Only `set` and `update` re-render. Mutating the items through
//! [`Signal::update_untracked`] leaves the container showing the old state
//! until the next `set`.

use crate::dom::{Element, Node};
use crate::reactive::{add_effect, Effect, Signal};

/// Tag of the container element returned by [`show`] and [`each`].
pub const CONTAINER_TAG: &str = "span";

/// Conditionally render a subtree.
///
/// `render` is called once per run of the effect, and only when the signal is
/// true; each call starts from an empty container. Setting the signal always
/// re-runs, even to the value it already has.
///
/// # Example
///
/// ```rust
/// use sprout_core::control_flow::show;
/// use sprout_core::h;
/// use sprout_core::reactive::Signal;
///
/// let visible = Signal::new(false);
/// let container = show(&visible, || h!("p", {}, "Visible!"));
/// assert_eq!(container.child_count(), 0);
///
/// visible.set(true);
/// assert_eq!(container.text_content(), "Visible!");
///
/// visible.set(false);
/// assert_eq!(container.child_count(), 0);
/// ```
pub fn show<F>(condition: &Signal<bool>, render: F) -> Element
where
    F: Fn() -> Element + Send + Sync + 'static,
{
    let container = Element::new(CONTAINER_TAG);

    let target = container.clone();
    let source = condition.downgrade();
    let rerender = Effect::new(move || {
        target.clear_children();

        let visible = source.upgrade().map(|s| s.cur()).unwrap_or(false);
        if visible {
            attach(&target, render());
        }
        tracing::trace!(container = target.id().raw(), visible, "show rendered");
    });

    add_effect(&rerender, &[condition]);
    container
}

/// Render one subtree per item, in order.
///
/// Every run of the effect discards all previous children and calls `render`
/// for every item again.
///
/// # Example
///
/// ```rust
/// use sprout_core::control_flow::each;
/// use sprout_core::h;
/// use sprout_core::reactive::Signal;
///
/// let fruits = Signal::new(vec!["apple".to_string(), "pear".to_string()]);
/// let list = each(&fruits, |fruit| h!("li", {}, fruit));
/// assert_eq!(list.child_count(), 2);
///
/// fruits.update(|v| v.push("plum".to_string()));
/// assert_eq!(list.text_content(), "applepearplum");
/// ```
pub fn each<T, F>(items: &Signal<Vec<T>>, render: F) -> Element
where
    T: Clone + Send + Sync + 'static,
    F: Fn(&T) -> Element + Send + Sync + 'static,
{
    let container = Element::new(CONTAINER_TAG);

    let target = container.clone();
    let source = items.downgrade();
    let rerender = Effect::new(move || {
        target.clear_children();

        // Cloned so `render` may read or set the list itself
        let current = source.upgrade().map(|s| s.cur()).unwrap_or_default();
        for item in &current {
            attach(&target, render(item));
        }
        tracing::trace!(
            container = target.id().raw(),
            items = current.len(),
            "each rebuilt"
        );
    });

    add_effect(&rerender, &[items]);
    container
}

fn attach(container: &Element, rendered: Element) {
    if let Err(err) = container.append_child(Node::Element(rendered)) {
        tracing::warn!(%err, container = container.id().raw(), "dropping rendered node");
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
