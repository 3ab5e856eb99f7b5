//! Mounting a tree under an explicit root.
//!
//! There is no global document. The caller owns the root element and passes
//! it in, which keeps everything testable without a live page.

use super::error::DomError;
use super::node::{Element, Node};

/// Append `node` to `root`.
pub fn mount(root: &Element, node: impl Into<Node>) -> Result<(), DomError> {
    let node = node.into();
    root.append_child(node)?;
    tracing::debug!(
        root = root.id().raw(),
        tag = root.tag(),
        children = root.child_count(),
        "mounted"
    );
    Ok(())
}

/// Find the element with the given `id` under `tree` and mount `node` there.
///
/// Returns the element mounted into.
pub fn mount_by_id(tree: &Element, id: &str, node: impl Into<Node>) -> Result<Element, DomError> {
    let root = tree
        .find_by_id(id)
        .ok_or_else(|| DomError::RootNotFound(id.to_string()))?;
    mount(&root, node)?;
    Ok(root)
}
