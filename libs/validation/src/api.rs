//! # Validation Entry Points
//!
//! A [`Validator`] binds a member cache and [`ValidationSettings`]; the free
//! functions use the process-wide cache. Every run builds a fresh outcome
//! named after the root's type, walks the graph with a
//! [`ValidationVisitor`], and reports one of four results:
//!
//! | Result | `try_*` | `validate*` |
//! |--------|---------|-------------|
//! | missing root, leaf node type | `ArgumentFailure` | `Err(InvalidArgument)` |
//! | a hook failed or panicked | `HookFailure` (with the partial outcome) | `Err(InvalidOperation)` |
//! | engine bookkeeping broke | `EngineFailure` (with the partial outcome) | `Err(Traversal)` |
//! | reasons recorded | `Invalid` | `Ok(outcome)` |
//! | nothing recorded | `Valid` | `Ok(outcome)` |

use crate::error::{ValidationError, ValidationResult};
use crate::hooks::{HookResult, Validatable, ValidatableAndUpdatable};
use crate::outcome::ValidationOutcome;
use crate::visitor::{HookFailure, ValidationVisitor};
use tracing::debug;
use traversal::{GraphNode, HierarchyIterator, MemberCache, TraversalResult, TraversalSummary};
use traversal_config::ValidationSettings;

/// Result of a `try_*` validation
#[derive(Debug)]
pub enum ValidationReport {
    /// The call was malformed; nothing was validated
    ArgumentFailure(ValidationError),
    /// A hook failed; `outcome` holds what was recorded up to that point
    HookFailure {
        error: ValidationError,
        outcome: ValidationOutcome,
    },
    /// The engine lost track of its own state; no hook is to blame
    EngineFailure {
        error: ValidationError,
        outcome: ValidationOutcome,
    },
    Invalid(ValidationOutcome),
    Valid(ValidationOutcome),
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationReport::Valid(_))
    }

    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        match self {
            ValidationReport::ArgumentFailure(_) => None,
            ValidationReport::HookFailure { outcome, .. }
            | ValidationReport::EngineFailure { outcome, .. }
            | ValidationReport::Invalid(outcome)
            | ValidationReport::Valid(outcome) => Some(outcome),
        }
    }

    pub fn error(&self) -> Option<&ValidationError> {
        match self {
            ValidationReport::ArgumentFailure(error)
            | ValidationReport::HookFailure { error, .. }
            | ValidationReport::EngineFailure { error, .. } => Some(error),
            ValidationReport::Invalid(_) | ValidationReport::Valid(_) => None,
        }
    }

    /// The outcome of a completed run, or the error that prevented one
    pub fn into_result(self) -> ValidationResult<ValidationOutcome> {
        match self {
            ValidationReport::ArgumentFailure(error)
            | ValidationReport::HookFailure { error, .. }
            | ValidationReport::EngineFailure { error, .. } => Err(error),
            ValidationReport::Invalid(outcome) | ValidationReport::Valid(outcome) => Ok(outcome),
        }
    }
}

/// Validation runner bound to a member cache
#[derive(Debug, Clone)]
pub struct Validator<'c> {
    iterator: HierarchyIterator<'c>,
    settings: ValidationSettings,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new(MemberCache::global())
    }
}

impl<'c> Validator<'c> {
    pub fn new(cache: &'c MemberCache) -> Self {
        Self {
            iterator: HierarchyIterator::new(cache),
            settings: ValidationSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ValidationSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &ValidationSettings {
        &self.settings
    }

    pub fn validate<T>(&self, root: Option<&T>) -> ValidationResult<ValidationOutcome>
    where
        T: GraphNode + Validatable,
    {
        self.try_validate(root).into_result()
    }

    pub fn try_validate<T>(&self, root: Option<&T>) -> ValidationReport
    where
        T: GraphNode + Validatable,
    {
        self.validate_with(
            root,
            |node: &T, outcome: &mut ValidationOutcome| Some(node.pre_structure_validation(outcome)),
            |node: &T, outcome: &mut ValidationOutcome| node.post_structure_validation(outcome),
        )
    }

    /// Validate, treating an invalid outcome as an error too
    pub fn ensure_valid<T>(&self, root: Option<&T>) -> ValidationResult<()>
    where
        T: GraphNode + Validatable,
    {
        let outcome = self.validate(root)?;
        if outcome.is_valid() {
            return Ok(());
        }
        Err(ValidationError::Invalid {
            message: outcome.to_string(),
        })
    }

    pub fn validate_and_update<T>(&self, root: Option<&T>) -> ValidationResult<ValidationOutcome>
    where
        T: GraphNode + ValidatableAndUpdatable,
    {
        self.try_validate_and_update(root).into_result()
    }

    pub fn try_validate_and_update<T>(&self, root: Option<&T>) -> ValidationReport
    where
        T: GraphNode + ValidatableAndUpdatable,
    {
        self.validate_with(
            root,
            |node: &T, outcome: &mut ValidationOutcome| {
                Some(node.pre_structure_validation_and_update(outcome))
            },
            |node: &T, outcome: &mut ValidationOutcome| {
                node.post_structure_validation_and_update(outcome)
            },
        )
    }

    /// Validate with ad-hoc callbacks instead of a capability trait
    pub fn validate_with<T, Pre, Post>(
        &self,
        root: Option<&T>,
        pre: Pre,
        post: Post,
    ) -> ValidationReport
    where
        T: GraphNode,
        Pre: FnMut(&T, &mut ValidationOutcome) -> Option<HookResult>,
        Post: FnMut(&T, &mut ValidationOutcome) -> Option<HookResult>,
    {
        let Some(root) = root else {
            return ValidationReport::ArgumentFailure(ValidationError::InvalidArgument(
                "validation root must not be null".to_string(),
            ));
        };

        let mut outcome = ValidationOutcome::for_caller(root);
        debug!("Validation of {} started", outcome.root_name());

        let (traversal, failure) = {
            let mut visitor = ValidationVisitor::new(&mut outcome, pre, post)
                .stop_on_first_error(self.settings.stop_on_first_error);
            let traversal =
                self.iterator
                    .traverse(Some(root), Some(&self.settings.traversal), &mut visitor);
            (traversal, visitor.into_failure())
        };
        outcome.clear_current_path();

        let report = settle_report(traversal, failure, outcome);

        if let Some(outcome) = report.outcome() {
            debug!(
                "Validation of {} finished: {} reasons",
                outcome.root_name(),
                outcome.reasons().len()
            );
        }
        report
    }
}

/// Classifies a finished run; errors are sorted by the tier they convert to
fn settle_report(
    traversal: TraversalResult<TraversalSummary>,
    failure: Option<HookFailure>,
    outcome: ValidationOutcome,
) -> ValidationReport {
    match (traversal, failure) {
        (Err(error), _) => match ValidationError::from(error) {
            error @ ValidationError::InvalidArgument(_) => ValidationReport::ArgumentFailure(error),
            error @ ValidationError::InvalidOperation { .. } => {
                ValidationReport::HookFailure { error, outcome }
            }
            error => ValidationReport::EngineFailure { error, outcome },
        },
        (Ok(_), Some(failure)) => ValidationReport::HookFailure {
            error: failure.into(),
            outcome,
        },
        (Ok(_), None) if outcome.is_valid() => ValidationReport::Valid(outcome),
        (Ok(_), None) => ValidationReport::Invalid(outcome),
    }
}

fn validator(settings: Option<&ValidationSettings>) -> Validator<'static> {
    Validator::default().with_settings(settings.cloned().unwrap_or_default())
}

/// Validate `root` with the process-wide member cache
pub fn validate<T>(
    root: Option<&T>,
    settings: Option<&ValidationSettings>,
) -> ValidationResult<ValidationOutcome>
where
    T: GraphNode + Validatable,
{
    validator(settings).validate(root)
}

pub fn try_validate<T>(root: Option<&T>, settings: Option<&ValidationSettings>) -> ValidationReport
where
    T: GraphNode + Validatable,
{
    validator(settings).try_validate(root)
}

pub fn ensure_valid<T>(root: Option<&T>, settings: Option<&ValidationSettings>) -> ValidationResult<()>
where
    T: GraphNode + Validatable,
{
    validator(settings).ensure_valid(root)
}

pub fn validate_and_update<T>(
    root: Option<&T>,
    settings: Option<&ValidationSettings>,
) -> ValidationResult<ValidationOutcome>
where
    T: GraphNode + ValidatableAndUpdatable,
{
    validator(settings).validate_and_update(root)
}

pub fn try_validate_and_update<T>(
    root: Option<&T>,
    settings: Option<&ValidationSettings>,
) -> ValidationReport
where
    T: GraphNode + ValidatableAndUpdatable,
{
    validator(settings).try_validate_and_update(root)
}
