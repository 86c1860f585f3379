//! Selection specs: the predicate evaluator behind `where`, `not` and `join`.

use crate::matcher::Matcher;
use crate::record::Record;

/// An ordered map from attribute path to [`Matcher`].
///
/// A record matches when every clause matches (logical AND, evaluated in
/// insertion order, stopping at the first failure). An empty selection
/// matches every record.
///
/// ```
/// use recollect_core::{matcher, Record, Selection};
/// use serde_json::json;
///
/// let tim = Record::try_from(json!({"id": 3, "last_name": "doe", "age": 55})).unwrap();
/// let spec = Selection::new()
///     .with("last_name", "doe")
///     .with("age", matcher::min(21));
/// assert!(spec.matches(&tim));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Selection {
    clauses: Vec<(String, Matcher)>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause, builder style.
    pub fn with(mut self, path: impl Into<String>, matcher: impl Into<Matcher>) -> Self {
        self.push(path, matcher);
        self
    }

    /// Adds a clause. A clause on a path already present replaces it in place.
    pub fn push(&mut self, path: impl Into<String>, matcher: impl Into<Matcher>) {
        let path = path.into();
        let matcher = matcher.into();
        match self.clauses.iter_mut().find(|(p, _)| *p == path) {
            Some(clause) => clause.1 = matcher,
            None => self.clauses.push((path, matcher)),
        }
    }

    /// Returns the clauses in evaluation order.
    #[inline]
    pub fn clauses(&self) -> &[(String, Matcher)] {
        &self.clauses
    }

    /// Returns the number of clauses.
    #[inline]
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Returns true if there are no clauses.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Evaluates the selection against a record.
    pub fn matches(&self, record: &Record) -> bool {
        self.clauses
            .iter()
            .all(|(path, matcher)| record.with_value(path, |value| matcher.test(value)))
    }

    /// Evaluates the selection, inverting the overall result when `invert` is set.
    ///
    /// Only the final boolean is inverted, never the individual clauses.
    #[inline]
    pub fn matches_inverted(&self, record: &Record, invert: bool) -> bool {
        self.matches(record) != invert
    }
}

impl<P, M> FromIterator<(P, M)> for Selection
where
    P: Into<String>,
    M: Into<Matcher>,
{
    fn from_iter<I: IntoIterator<Item = (P, M)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (path, matcher) in iter {
            selection.push(path, matcher);
        }
        selection
    }
}
