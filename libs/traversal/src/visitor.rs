//! Visitor contract invoked by the hierarchy iterator

use crate::error::HookError;
use crate::node::PathNode;

/// Pre-order and post-order hooks
///
/// `on_enter` runs before any child of the node is visited and `on_exit`
/// after all of them completed. Either hook may call [`PathNode::stop`] to
/// prune. An `Err` is treated as a defect: the engine wraps it with the node
/// path, stops the traversal for good and returns it to the caller.
pub trait NodeVisitor<T> {
    fn on_enter(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError>;

    fn on_exit(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError>;
}

impl<T, V: NodeVisitor<T> + ?Sized> NodeVisitor<T> for &mut V {
    fn on_enter(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError> {
        (**self).on_enter(node)
    }

    fn on_exit(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError> {
        (**self).on_exit(node)
    }
}
