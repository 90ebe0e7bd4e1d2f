//! Validation capabilities implemented by node types
//!
//! A hook returns [`HookFlow::Continue`] to keep going, or
//! [`HookFlow::Abort`] to stop below the node after recording why. An
//! `Err` means the validation code itself is broken: the traversal stops and
//! the caller gets an `InvalidOperation` instead of an outcome.

use crate::outcome::ValidationOutcome;
use traversal::HookError;

/// What a hook wants to happen next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookFlow {
    Continue,
    /// Stop this node; a non-blank reason is recorded as an error
    Abort(String),
}

impl HookFlow {
    pub fn abort(reason: impl Into<String>) -> Self {
        HookFlow::Abort(reason.into())
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, HookFlow::Abort(_))
    }
}

pub type HookResult = Result<HookFlow, HookError>;

/// Node types that validate themselves
pub trait Validatable {
    /// Runs before the node's children are validated
    fn pre_structure_validation(&self, outcome: &mut ValidationOutcome) -> HookResult;

    /// Runs after every child of the node completed. `None` when the type
    /// has no post-structure rules.
    fn post_structure_validation(&self, _outcome: &mut ValidationOutcome) -> Option<HookResult> {
        None
    }
}

/// Node types whose validation may also update the node.
///
/// Nodes are shared handles, so updates go through the handle's interior
/// mutability.
pub trait ValidatableAndUpdatable {
    fn pre_structure_validation_and_update(&self, outcome: &mut ValidationOutcome) -> HookResult;

    fn post_structure_validation_and_update(
        &self,
        _outcome: &mut ValidationOutcome,
    ) -> Option<HookResult> {
        None
    }
}
