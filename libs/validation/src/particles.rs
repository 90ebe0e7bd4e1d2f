//! Particle validators
//!
//! Small checks on a single property. Each adds a canned message only when
//! the check fails and returns whether it passed, so hooks can chain them or
//! branch on the result.

use crate::outcome::{Severity, ValidationOutcome};
use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

const NULL: &str = "== null";
const EMPTY: &str = "is empty";
const WHITE_SPACE: &str = "is white space";
const CONDITION_MET: &str = "is invalid";
const CONDITION_NOT_MET: &str = "does not satisfy its condition";

impl ValidationOutcome {
    /// Invalidates when `condition` holds.
    ///
    /// A blank `message` falls back to a generic one.
    pub fn invalidate_if(&mut self, condition: bool, property: Option<&str>, message: &str) -> bool {
        if condition {
            self.push_reason(Severity::Error, property, non_blank(message, CONDITION_MET));
        }
        !condition
    }

    /// Invalidates when `condition` does not hold
    pub fn invalidate_if_not(
        &mut self,
        condition: bool,
        property: Option<&str>,
        message: &str,
    ) -> bool {
        if !condition {
            self.push_reason(Severity::Error, property, non_blank(message, CONDITION_NOT_MET));
        }
        condition
    }

    pub fn invalidate_if_null<V: ?Sized>(&mut self, value: Option<&V>, property: &str) -> bool {
        if value.is_none() {
            self.push_reason(Severity::Error, Some(property), NULL);
            return false;
        }
        true
    }

    pub fn invalidate_if_null_or_empty(&mut self, value: Option<&str>, property: &str) -> bool {
        match value {
            None => self.invalidate_if_null::<str>(None, property),
            Some(text) if text.is_empty() => {
                self.push_reason(Severity::Error, Some(property), EMPTY);
                false
            }
            Some(_) => true,
        }
    }

    pub fn invalidate_if_null_or_white_space(
        &mut self,
        value: Option<&str>,
        property: &str,
    ) -> bool {
        match value {
            Some(text) if !text.is_empty() && text.trim().is_empty() => {
                self.push_reason(Severity::Error, Some(property), WHITE_SPACE);
                false
            }
            other => self.invalidate_if_null_or_empty(other, property),
        }
    }

    /// Invalidates a missing or empty collection, or one holding equal items.
    ///
    /// Every duplicated item is named once, in order of first repetition.
    pub fn invalidate_if_null_empty_or_duplicates<I>(
        &mut self,
        values: Option<&[I]>,
        property: &str,
    ) -> bool
    where
        I: Eq + Hash + Display,
    {
        let Some(values) = values else {
            return self.invalidate_if_null::<[I]>(None, property);
        };
        if values.is_empty() {
            self.push_reason(Severity::Error, Some(property), EMPTY);
            return false;
        }

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let duplicates: Vec<String> = values
            .iter()
            .filter(|value| !seen.insert(*value) && reported.insert(*value))
            .map(ToString::to_string)
            .collect();

        if duplicates.is_empty() {
            return true;
        }

        let message = format!("contains duplicates: {}", duplicates.join(", "));
        self.push_reason(Severity::Error, Some(property), &message);
        false
    }

    /// Invalidates `value` outside the inclusive range `min..=max`
    pub fn invalidate_if_out_of_range<N>(&mut self, value: N, min: N, max: N, property: &str) -> bool
    where
        N: PartialOrd + Display,
    {
        if value < min || value > max {
            let message = format!("must be between {} and {}, got {}", min, max, value);
            self.push_reason(Severity::Error, Some(property), &message);
            return false;
        }
        true
    }
}

fn non_blank<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
