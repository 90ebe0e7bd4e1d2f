//! # Validation Outcome
//!
//! Accumulates the problems reported while validating one object graph.
//! Every reason is located by the path of the node being validated (set by
//! the visitor before each hook) and an optional property name:
//!
//! ```text
//! Servers[1].Port: must be between 1 and 65535, got 0
//! Host == null
//! ```
//!
//! A message starting with `=`, `>` or `<` reads as a comparison, so the
//! colon is dropped and a single space separates location and message.
//!
//! The outcome is valid exactly while it holds no reasons. Adding a reason
//! is irreversible.

use crate::error::{ValidationError, ValidationResult};
use std::fmt;
use traversal::{GraphNode, TypeInfo};
use traversal_config::naming::PROPERTY_SEPARATOR;
use traversal_config::reasons::{COMPARISON_PREFIXES, DEFAULT_REASON_SEPARATOR};

/// How bad a reason is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Reported by a validation rule
    Error,
    /// Recorded when a validation hook itself failed
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Fatal => f.write_str("fatal"),
        }
    }
}

/// One located problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reason {
    severity: Severity,
    message: String,
}

impl Reason {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    is_valid: bool,
    reasons: Vec<Reason>,
    current_path: Option<String>,
    root_name: String,
    reason_prefix: String,
}

impl ValidationOutcome {
    /// Empty, valid outcome for a root called `root_name`
    pub fn new(root_name: impl Into<String>) -> Self {
        let root_name = root_name.into();
        Self {
            is_valid: true,
            reasons: Vec::new(),
            current_path: None,
            reason_prefix: format!("Invalid {}: ", root_name),
            root_name,
        }
    }

    /// Outcome named after the simple name of `X`
    pub fn for_type<X: ?Sized + 'static>() -> Self {
        Self::new(TypeInfo::of::<X>().name())
    }

    /// Outcome named after the runtime type of `caller`
    pub fn for_caller<T: GraphNode>(caller: &T) -> Self {
        Self::new(caller.type_info().name())
    }

    pub fn with_reason_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reason_prefix = prefix.into();
        self
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn reasons(&self) -> &[Reason] {
        &self.reasons
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn reason_prefix(&self) -> &str {
        &self.reason_prefix
    }

    /// Path of the node currently being validated
    pub fn current_path(&self) -> Option<&str> {
        self.current_path.as_deref()
    }

    pub fn set_current_path(&mut self, path: impl Into<String>) {
        self.current_path = Some(path.into());
    }

    pub fn clear_current_path(&mut self) {
        self.current_path = None;
    }

    /// Record a problem with `property` of the current node.
    ///
    /// Fails when `message` is blank.
    pub fn add_error_message(
        &mut self,
        property: Option<&str>,
        message: impl AsRef<str>,
    ) -> ValidationResult<()> {
        let message = message.as_ref();
        if message.trim().is_empty() {
            return Err(ValidationError::InvalidArgument(
                "error message must not be blank".to_string(),
            ));
        }

        self.push_reason(Severity::Error, property, message);
        Ok(())
    }

    /// Appends a located reason; the caller guarantees a non-blank message
    pub(crate) fn push_reason(&mut self, severity: Severity, property: Option<&str>, message: &str) {
        let located = self.locate(property, message);
        self.reasons.push(Reason::new(severity, located));
        self.is_valid = false;
    }

    fn locate(&self, property: Option<&str>, message: &str) -> String {
        let path = self.current_path.as_deref().filter(|p| !p.is_empty());
        let property = property.filter(|p| !p.is_empty());

        let location = match (path, property) {
            (Some(path), Some(property)) => format!("{}{}{}", path, PROPERTY_SEPARATOR, property),
            (Some(path), None) => path.to_string(),
            (None, Some(property)) => property.to_string(),
            (None, None) => return message.to_string(),
        };

        if message.starts_with(COMPARISON_PREFIXES) {
            format!("{} {}", location, message)
        } else {
            format!("{}: {}", location, message)
        }
    }

    /// Copy the reasons of an invalid `sub` outcome under `property`.
    ///
    /// Returns true, changing nothing, when `sub` is absent or valid.
    pub fn integrate_sub_result(
        &mut self,
        sub: Option<&ValidationOutcome>,
        property: Option<&str>,
    ) -> bool {
        let Some(sub) = sub.filter(|sub| !sub.is_valid()) else {
            return true;
        };

        for reason in &sub.reasons {
            self.push_reason(reason.severity, property, &reason.message);
        }
        false
    }

    /// `reason_prefix` followed by the reasons of at least `min_severity`,
    /// joined by `separator` (`"; "` by default).
    ///
    /// `None` when valid or when no reason passes the filter.
    pub fn summary(&self, min_severity: Option<Severity>, separator: Option<&str>) -> Option<String> {
        if self.is_valid {
            return None;
        }

        let selected: Vec<&str> = self
            .reasons
            .iter()
            .filter(|reason| min_severity.map_or(true, |min| reason.severity >= min))
            .map(Reason::message)
            .collect();

        if selected.is_empty() {
            return None;
        }

        let separator = separator.unwrap_or(DEFAULT_REASON_SEPARATOR);
        Some(format!("{}{}", self.reason_prefix, selected.join(separator)))
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.summary(None, None) {
            Some(summary) => f.write_str(&summary),
            None => Ok(()),
        }
    }
}
