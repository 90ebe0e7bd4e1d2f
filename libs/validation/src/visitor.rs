//! # Validation Visitor
//!
//! Adapts a pair of validation callbacks to the engine's [`NodeVisitor`]
//! contract. Before each callback the outcome's current path is set to the
//! node's path, so every reason a callback records is located.
//!
//! The visitor never hands an error back to the engine. A failing callback
//! is remembered as a [`HookFailure`], recorded as a fatal reason, and its
//! node is stopped; the stop climbs to the root and ends the traversal. The
//! orchestration layer turns the remembered failure into
//! [`ValidationError::InvalidOperation`].
//!
//! A callback that panics fails the same way, with the panic message as its
//! error. This needs unwinding panics: under `panic = "abort"` the process
//! ends before the visitor sees anything.

use crate::error::ValidationError;
use crate::hooks::{HookFlow, HookResult};
use crate::outcome::{Severity, ValidationOutcome};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use tracing::{trace, warn};
use traversal::{HookError, HookPhase, NodeVisitor, PathNode};

/// First callback failure of a validation run
#[derive(Debug)]
pub struct HookFailure {
    pub phase: HookPhase,
    pub path: String,
    pub source: HookError,
}

impl From<HookFailure> for ValidationError {
    fn from(failure: HookFailure) -> Self {
        ValidationError::InvalidOperation {
            phase: failure.phase,
            path: failure.path,
            source: failure.source,
        }
    }
}

pub struct ValidationVisitor<'o, Pre, Post> {
    outcome: &'o mut ValidationOutcome,
    pre: Pre,
    post: Post,
    stop_on_first_error: bool,
    failure: Option<HookFailure>,
}

impl<'o, Pre, Post> ValidationVisitor<'o, Pre, Post> {
    /// `pre` runs on enter, `post` on exit; a callback returning `None`
    /// has nothing to check for that node
    pub fn new(outcome: &'o mut ValidationOutcome, pre: Pre, post: Post) -> Self {
        Self {
            outcome,
            pre,
            post,
            stop_on_first_error: false,
            failure: None,
        }
    }

    pub fn stop_on_first_error(mut self, enabled: bool) -> Self {
        self.stop_on_first_error = enabled;
        self
    }

    pub fn outcome(&self) -> &ValidationOutcome {
        &*self.outcome
    }

    pub fn failure(&self) -> Option<&HookFailure> {
        self.failure.as_ref()
    }

    pub fn into_failure(self) -> Option<HookFailure> {
        self.failure
    }

    fn settle<T>(&mut self, phase: HookPhase, node: &mut PathNode<'_, T>, result: Option<HookResult>) {
        match result {
            None | Some(Ok(HookFlow::Continue)) => {}
            Some(Ok(HookFlow::Abort(reason))) => {
                if !reason.trim().is_empty() {
                    self.outcome.push_reason(Severity::Error, None, &reason);
                }
                trace!("Validation aborted at '{}'", node.path());
                node.stop();
            }
            Some(Err(source)) => {
                warn!(
                    "Validation {} hook failed at '{}': {}",
                    phase,
                    node.path(),
                    source
                );
                let message = format!("{} validation failed: {}", phase, source);
                self.outcome.push_reason(Severity::Fatal, None, &message);
                if self.failure.is_none() {
                    self.failure = Some(HookFailure {
                        phase,
                        path: node.path().to_string(),
                        source,
                    });
                }
                node.stop();
            }
        }

        if self.stop_on_first_error && !self.outcome.is_valid() && !node.is_stopped() {
            trace!("Stopping at '{}' on first error", node.path());
            node.stop();
        }
    }
}

impl<T, Pre, Post> NodeVisitor<T> for ValidationVisitor<'_, Pre, Post>
where
    Pre: FnMut(&T, &mut ValidationOutcome) -> Option<HookResult>,
    Post: FnMut(&T, &mut ValidationOutcome) -> Option<HookResult>,
{
    fn on_enter(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError> {
        self.outcome.set_current_path(node.path());
        let (pre, outcome) = (&mut self.pre, &mut *self.outcome);
        let value = node.value();
        let result = guarded(|| pre(value, outcome));
        self.settle(HookPhase::Enter, node, result);
        Ok(())
    }

    fn on_exit(&mut self, node: &mut PathNode<'_, T>) -> Result<(), HookError> {
        self.outcome.set_current_path(node.path());
        let (post, outcome) = (&mut self.post, &mut *self.outcome);
        let value = node.value();
        let result = guarded(|| post(value, outcome));
        self.settle(HookPhase::Exit, node, result);
        Ok(())
    }
}

/// Runs a callback, turning a panic into a hook error
fn guarded<F>(callback: F) -> Option<HookResult>
where
    F: FnOnce() -> Option<HookResult>,
{
    panic::catch_unwind(AssertUnwindSafe(callback)).unwrap_or_else(|payload| {
        let message = format!("hook panicked: {}", panic_message(&*payload));
        Some(Err(message.into()))
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "unknown panic payload".to_string()
}
