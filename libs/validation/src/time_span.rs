//! # Time Spans
//!
//! Text form: `[-][d.]hh:mm[:ss[.fffffff]]`, or a bare day count `[-]d`.
//! Hours run 0-23, minutes and seconds 0-59, the fraction has at most seven
//! digits (100 ns ticks). Surrounding white space is ignored.
//!
//! The outcome methods never fail: a value that cannot be parsed, or that
//! violates its bound, records a reason and yields a zero span. Zero is also
//! a legitimate parse result, so a caller that must tell the two apart
//! compares the reason count before and after the call.

use crate::outcome::{Severity, ValidationOutcome};
use chrono::Duration;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Largest day count a time span can carry
pub const MAX_DAYS: i64 = 10_675_199;

const NANOS_PER_TICK: i64 = 100;
const FRACTION_DIGITS: usize = 7;

static TIME_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?P<sign>-)?(?:(?P<bare>\d+)|(?:(?P<days>\d+)\.)?(?P<hours>\d{1,2}):(?P<minutes>\d{1,2})(?::(?P<seconds>\d{1,2})(?:\.(?P<fraction>\d{1,7}))?)?)\s*$",
    )
    .expect("time span pattern is valid")
});

/// Parse the text form of a time span
pub fn parse_time_span(text: &str) -> Option<Duration> {
    let captures = TIME_SPAN.captures(text)?;
    let number = |name: &str| -> Option<i64> {
        match captures.name(name) {
            Some(digits) => digits.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let days = match captures.name("bare") {
        Some(_) => number("bare")?,
        None => number("days")?,
    };
    let (hours, minutes, seconds) = (number("hours")?, number("minutes")?, number("seconds")?);

    if days > MAX_DAYS || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }

    let ticks = match captures.name("fraction") {
        Some(fraction) => {
            let padded = format!("{:0<width$}", fraction.as_str(), width = FRACTION_DIGITS);
            padded.parse::<i64>().ok()?
        }
        None => 0,
    };

    let whole_seconds = ((days * 24 + hours) * 60 + minutes) * 60 + seconds;
    let magnitude = Duration::try_seconds(whole_seconds)?
        .checked_add(&Duration::nanoseconds(ticks * NANOS_PER_TICK))?;

    if captures.name("sign").is_some() {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Render `span` as `[-][d.]hh:mm:ss[.fffffff]`
pub fn format_time_span(span: Duration) -> String {
    let negative = span < Duration::zero();
    let magnitude = if negative { -span } else { span };

    let total_seconds = magnitude.num_seconds();
    let days = total_seconds / 86_400;
    let hours = total_seconds % 86_400 / 3_600;
    let minutes = total_seconds % 3_600 / 60;
    let seconds = total_seconds % 60;
    let ticks = i64::from(magnitude.subsec_nanos()) / NANOS_PER_TICK;

    let mut rendered = String::new();
    if negative {
        rendered.push('-');
    }
    if days > 0 {
        rendered.push_str(&format!("{}.", days));
    }
    rendered.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        rendered.push_str(&format!(".{:07}", ticks));
    }
    rendered
}

/// Constraint checked after a successful parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpanBound {
    AtLeast(Duration),
    GreaterThan(Duration),
    AtMost(Duration),
    LessThan(Duration),
    /// Inclusive on both ends
    Between(Duration, Duration),
}

impl TimeSpanBound {
    pub fn admits(&self, span: Duration) -> bool {
        match *self {
            TimeSpanBound::AtLeast(min) => span >= min,
            TimeSpanBound::GreaterThan(min) => span > min,
            TimeSpanBound::AtMost(max) => span <= max,
            TimeSpanBound::LessThan(max) => span < max,
            TimeSpanBound::Between(min, max) => min <= span && span <= max,
        }
    }
}

impl fmt::Display for TimeSpanBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TimeSpanBound::AtLeast(min) => write!(f, ">= {}", format_time_span(min)),
            TimeSpanBound::GreaterThan(min) => write!(f, "> {}", format_time_span(min)),
            TimeSpanBound::AtMost(max) => write!(f, "<= {}", format_time_span(max)),
            TimeSpanBound::LessThan(max) => write!(f, "< {}", format_time_span(max)),
            TimeSpanBound::Between(min, max) => write!(
                f,
                "between {} and {}",
                format_time_span(min),
                format_time_span(max)
            ),
        }
    }
}

impl ValidationOutcome {
    /// Parse `text`, recording a reason and returning zero when it is
    /// missing or malformed
    pub fn parse_time_span(&mut self, text: Option<&str>, property: &str) -> Duration {
        let Some(text) = text else {
            self.push_reason(Severity::Error, Some(property), "== null");
            return Duration::zero();
        };

        match parse_time_span(text) {
            Some(span) => span,
            None => {
                let message = format!("is not a valid time span: '{}'", text);
                self.push_reason(Severity::Error, Some(property), &message);
                Duration::zero()
            }
        }
    }

    /// Parse `text` and check it against `bound`; zero on either failure
    pub fn parse_time_span_constrained(
        &mut self,
        text: Option<&str>,
        property: &str,
        bound: TimeSpanBound,
    ) -> Duration {
        let before = self.reasons().len();
        let span = self.parse_time_span(text, property);
        if self.reasons().len() > before {
            return Duration::zero();
        }

        if bound.admits(span) {
            return span;
        }

        let message = format!("must be {}, got {}", bound, format_time_span(span));
        self.push_reason(Severity::Error, Some(property), &message);
        Duration::zero()
    }

    pub fn parse_time_span_at_least(
        &mut self,
        text: Option<&str>,
        property: &str,
        min: Duration,
    ) -> Duration {
        self.parse_time_span_constrained(text, property, TimeSpanBound::AtLeast(min))
    }

    pub fn parse_time_span_greater_than(
        &mut self,
        text: Option<&str>,
        property: &str,
        min: Duration,
    ) -> Duration {
        self.parse_time_span_constrained(text, property, TimeSpanBound::GreaterThan(min))
    }

    pub fn parse_time_span_at_most(
        &mut self,
        text: Option<&str>,
        property: &str,
        max: Duration,
    ) -> Duration {
        self.parse_time_span_constrained(text, property, TimeSpanBound::AtMost(max))
    }

    pub fn parse_time_span_less_than(
        &mut self,
        text: Option<&str>,
        property: &str,
        max: Duration,
    ) -> Duration {
        self.parse_time_span_constrained(text, property, TimeSpanBound::LessThan(max))
    }

    pub fn parse_time_span_between(
        &mut self,
        text: Option<&str>,
        property: &str,
        min: Duration,
        max: Duration,
    ) -> Duration {
        self.parse_time_span_constrained(text, property, TimeSpanBound::Between(min, max))
    }
}
