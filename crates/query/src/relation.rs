//! Qualified attribute references and relations between collections.

use core::fmt;
use recollect_core::{Error, Result};

/// A `collection.attribute` reference.
///
/// The collection name is the text before the first dot; the attribute is
/// everything after it, so nested paths such as `users.address.city` work.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualifiedAttribute {
    pub collection: String,
    pub attribute: String,
}

impl QualifiedAttribute {
    /// Parses a reference. Both parts must be non-empty.
    pub fn parse(reference: &str) -> Result<Self> {
        match reference.split_once('.') {
            Some((collection, attribute)) if !collection.is_empty() && !attribute.is_empty() => {
                Ok(Self {
                    collection: collection.to_string(),
                    attribute: attribute.to_string(),
                })
            }
            _ => Err(Error::invalid_reference(reference)),
        }
    }
}

impl fmt::Display for QualifiedAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.collection, self.attribute)
    }
}

/// Keep only the records of `right` whose attribute value appears at `left`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Relation {
    pub left: String,
    pub right: String,
}

impl Relation {
    /// Creates a relation between two `collection.attribute` references.
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Parses both sides.
    pub fn parse(&self) -> Result<(QualifiedAttribute, QualifiedAttribute)> {
        Ok((
            QualifiedAttribute::parse(&self.left)?,
            QualifiedAttribute::parse(&self.right)?,
        ))
    }
}

impl<L: Into<String>, R: Into<String>> From<(L, R)> for Relation {
    fn from((left, right): (L, R)) -> Self {
        Relation::new(left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let attr = QualifiedAttribute::parse("users.id").unwrap();
        assert_eq!(attr.collection, "users");
        assert_eq!(attr.attribute, "id");
        assert_eq!(attr.to_string(), "users.id");
    }

    #[test]
    fn test_parse_nested_attribute() {
        let attr = QualifiedAttribute::parse("users.address.city").unwrap();
        assert_eq!(attr.collection, "users");
        assert_eq!(attr.attribute, "address.city");
    }

    #[test]
    fn test_parse_invalid() {
        for reference in ["users", "users.", ".id", ""] {
            assert_eq!(
                QualifiedAttribute::parse(reference),
                Err(Error::invalid_reference(reference))
            );
        }
    }

    #[test]
    fn test_relation_parse() {
        let relation = Relation::from(("users.job_id", "jobs.id"));
        let (left, right) = relation.parse().unwrap();
        assert_eq!(left.collection, "users");
        assert_eq!(right.attribute, "id");
        assert!(Relation::new("users", "jobs.id").parse().is_err());
    }
}
