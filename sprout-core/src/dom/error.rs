//! Errors raised by structural tree operations.

use thiserror::Error;

/// Errors from operations that change the shape of the element tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The child is the parent itself or one of its ancestors.
    #[error("cannot append <{child}> into <{parent}>: the child is the parent or one of its ancestors")]
    HierarchyRequest { parent: String, child: String },

    /// No element with the requested `id` attribute exists in the tree.
    #[error("no element with id `{0}` to mount into")]
    RootNotFound(String),
}
