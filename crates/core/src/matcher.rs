//! Attribute matchers and matcher combinators.
//!
//! A [`Matcher`] decides whether a single resolved attribute value is
//! acceptable. It is one of:
//!
//! - a literal value, matched with strict equality
//! - a list of literals, matched by membership
//! - a predicate function over the (possibly absent) value
//!
//! The combinators in this module build predicate matchers:
//!
//! - [`contains`]: case-insensitive regular expression search
//! - [`fuzzy`]: in-order, whitespace separated token search
//! - [`min`] / [`max`] / [`within`]: inclusive bounds
//!
//! Absence never satisfies a literal, a list or a bound.

use crate::value::{compare_numbers, compare_values, display_text, strict_eq};
use core::cmp::Ordering;
use core::fmt;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use std::rc::Rc;

/// Predicate over a resolved attribute value.
pub type ValuePredicate = Rc<dyn Fn(Option<&Value>) -> bool>;

/// Decides whether a resolved attribute value matches.
#[derive(Clone)]
pub enum Matcher {
    /// Strict equality with a literal.
    Value(Value),
    /// Strict membership in a list of literals.
    OneOf(Vec<Value>),
    /// Arbitrary predicate over the resolved value.
    Predicate(ValuePredicate),
}

impl Matcher {
    /// Wraps a predicate function.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(Option<&Value>) -> bool + 'static,
    {
        Matcher::Predicate(Rc::new(f))
    }

    /// Builds a membership matcher.
    pub fn one_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Matcher::OneOf(values.into_iter().map(Into::into).collect())
    }

    /// Tests a resolved value.
    pub fn test(&self, value: Option<&Value>) -> bool {
        match self {
            Matcher::Value(expected) => value.map(|v| strict_eq(v, expected)).unwrap_or(false),
            Matcher::OneOf(options) => value
                .map(|v| options.iter().any(|o| strict_eq(v, o)))
                .unwrap_or(false),
            Matcher::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Matcher::OneOf(vs) => f.debug_tuple("OneOf").field(vs).finish(),
            Matcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<Value> for Matcher {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Matcher::OneOf(items),
            other => Matcher::Value(other),
        }
    }
}

impl From<Vec<Value>> for Matcher {
    fn from(values: Vec<Value>) -> Self {
        Matcher::OneOf(values)
    }
}

impl From<&str> for Matcher {
    fn from(value: &str) -> Self {
        Matcher::Value(Value::from(value))
    }
}

impl From<String> for Matcher {
    fn from(value: String) -> Self {
        Matcher::Value(Value::from(value))
    }
}

impl From<i64> for Matcher {
    fn from(value: i64) -> Self {
        Matcher::Value(Value::from(value))
    }
}

impl From<i32> for Matcher {
    fn from(value: i32) -> Self {
        Matcher::Value(Value::from(value))
    }
}

impl From<f64> for Matcher {
    fn from(value: f64) -> Self {
        Matcher::Value(Value::from(value))
    }
}

impl From<bool> for Matcher {
    fn from(value: bool) -> Self {
        Matcher::Value(Value::from(value))
    }
}

// =========================================================================
// Text matchers
// =========================================================================

/// Text a value is matched as. Null and absence have no text.
fn text_of(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        other => Some(display_text(other)),
    }
}

fn case_insensitive(pattern: &str) -> Option<Regex> {
    RegexBuilder::new(pattern).case_insensitive(true).build().ok()
}

fn regex_matcher(regex: Regex) -> Matcher {
    Matcher::predicate(move |value| {
        text_of(value)
            .map(|text| regex.is_match(&text))
            .unwrap_or(false)
    })
}

/// Case-insensitive regular expression search.
///
/// A pattern that does not compile is searched for as literal text.
///
/// ```
/// use recollect_core::matcher::contains;
/// use serde_json::json;
///
/// let m = contains("merchant");
/// assert!(m.test(Some(&json!("The Merchant of Venice"))));
/// assert!(!m.test(Some(&json!("Twelfth Night"))));
/// assert!(contains("^the").test(Some(&json!("The Tempest"))));
/// ```
pub fn contains(pattern: &str) -> Matcher {
    if let Some(regex) = case_insensitive(pattern) {
        return regex_matcher(regex);
    }
    let needle = pattern.to_lowercase();
    Matcher::predicate(move |value| {
        text_of(value)
            .map(|text| text.to_lowercase().contains(&needle))
            .unwrap_or(false)
    })
}

/// In-order token search.
///
/// `text` is split on whitespace; each token must appear, in order, with the
/// next token starting after at least one whitespace character.
///
/// ```
/// use recollect_core::matcher::fuzzy;
/// use serde_json::json;
///
/// let m = fuzzy("merc eni");
/// assert!(m.test(Some(&json!("The Merchant of Venice"))));
/// assert!(!m.test(Some(&json!("Twelfth Night"))));
/// ```
pub fn fuzzy(text: &str) -> Matcher {
    const GAP: &str = r"[^\s]*\s.*";
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let raw = tokens.join(GAP);
    if let Some(regex) = case_insensitive(&raw) {
        return regex_matcher(regex);
    }
    let escaped: Vec<String> = tokens.iter().map(|t| regex::escape(t)).collect();
    match case_insensitive(&escaped.join(GAP)) {
        Some(regex) => regex_matcher(regex),
        None => Matcher::predicate(|_| false),
    }
}

// =========================================================================
// Bounds
// =========================================================================

/// Compares a value against a bound of the same kind.
///
/// Only number/number and string/string pairs are comparable.
fn compare_to_bound(value: Option<&Value>, bound: &Value) -> Option<Ordering> {
    match (value?, bound) {
        (Value::Number(a), Value::Number(b)) => Some(compare_numbers(a, b)),
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}

/// Inclusive lower bound.
pub fn min(bound: impl Into<Value>) -> Matcher {
    let bound = bound.into();
    Matcher::predicate(move |value| {
        matches!(
            compare_to_bound(value, &bound),
            Some(Ordering::Greater | Ordering::Equal)
        )
    })
}

/// Inclusive upper bound.
pub fn max(bound: impl Into<Value>) -> Matcher {
    let bound = bound.into();
    Matcher::predicate(move |value| {
        matches!(
            compare_to_bound(value, &bound),
            Some(Ordering::Less | Ordering::Equal)
        )
    })
}

/// Inclusive range; the bounds may be given in either order.
///
/// ```
/// use recollect_core::matcher::within;
/// use serde_json::json;
///
/// assert!(within(22, 16).test(Some(&json!(16))));
/// assert!(within(16, 22).test(Some(&json!(22))));
/// assert!(!within(16, 22).test(Some(&json!(55))));
/// assert!(!within(16, 22).test(None));
/// ```
pub fn within(a: impl Into<Value>, b: impl Into<Value>) -> Matcher {
    let (a, b) = (a.into(), b.into());
    let (low, high) = if compare_values(&a, &b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };
    Matcher::predicate(move |value| {
        matches!(
            compare_to_bound(value, &low),
            Some(Ordering::Greater | Ordering::Equal)
        ) && matches!(
            compare_to_bound(value, &high),
            Some(Ordering::Less | Ordering::Equal)
        )
    })
}
