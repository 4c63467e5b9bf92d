//! Version orderings used to lay out the release index.
//!
//! Both comparators are fallible: a string the ordering cannot interpret is
//! an error, never silently sorted to one end.

use std::cmp::Ordering;

use crate::error::{invalid_version, CatalogError};

/// A total order over version-like strings.
pub trait VersionOrder {
    fn compare(&self, a: &str, b: &str) -> Result<Ordering, CatalogError>;
}

// ---------------------------------------------------------------------------
// DottedNumericOrder
// ---------------------------------------------------------------------------

/// Numeric-aware ordering over dotted keys such as `18.04` or `22.10`.
///
/// Components compare as integers; a key that is a prefix of another sorts first.
#[derive(Debug, Clone, Copy, Default)]
pub struct DottedNumericOrder;

impl DottedNumericOrder {
    fn components(value: &str) -> Result<Vec<u64>, CatalogError> {
        value
            .split('.')
            .map(|part| {
                part.parse::<u64>()
                    .map_err(|e| invalid_version(value, format!("component '{part}': {e}")))
            })
            .collect()
    }
}

impl VersionOrder for DottedNumericOrder {
    fn compare(&self, a: &str, b: &str) -> Result<Ordering, CatalogError> {
        Ok(Self::components(a)?.cmp(&Self::components(b)?))
    }
}

// ---------------------------------------------------------------------------
// SemverOrder
// ---------------------------------------------------------------------------

/// Semantic-version ordering backed by the `semver` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemverOrder;

impl VersionOrder for SemverOrder {
    fn compare(&self, a: &str, b: &str) -> Result<Ordering, CatalogError> {
        let left = semver::Version::parse(a).map_err(|e| invalid_version(a, e))?;
        let right = semver::Version::parse(b).map_err(|e| invalid_version(b, e))?;
        Ok(left.cmp(&right))
    }
}

// ---------------------------------------------------------------------------
// Sorting helper
// ---------------------------------------------------------------------------

/// Sort `items` with a fallible ordering.
///
/// Ties under `order` fall back to plain string order so the result never
/// depends on input order. Every item is checked against the ordering before
/// sorting so that the sort itself only sees a total order.
pub fn sort_with<S: AsRef<str>>(items: &mut [S], order: &dyn VersionOrder) -> Result<(), CatalogError> {
    for item in items.iter() {
        order.compare(item.as_ref(), item.as_ref())?;
    }

    let mut failure = None;
    items.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        match order.compare(a, b) {
            Ok(ordering) => ordering.then_with(|| a.cmp(b)),
            Err(e) => {
                failure.get_or_insert(e);
                Ordering::Equal
            }
        }
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dotted_numeric_orders_by_value_not_text() {
        let order = DottedNumericOrder;
        assert_eq!(order.compare("9.10", "10.04").unwrap(), Ordering::Less);
        assert_eq!(order.compare("22.04", "22.10").unwrap(), Ordering::Less);
        assert_eq!(order.compare("3.9", "3.10").unwrap(), Ordering::Less);
        assert_eq!(order.compare("1.0", "1.0").unwrap(), Ordering::Equal);
    }

    #[test]
    fn dotted_numeric_rejects_text() {
        let err = DottedNumericOrder.compare("focal", "22.04").unwrap_err();
        assert!(matches!(err, CatalogError::InvalidVersion { ref value, .. } if value == "focal"));
    }

    #[test]
    fn semver_orders_patch_numerically() {
        let order = SemverOrder;
        assert_eq!(order.compare("3.10.9", "3.10.10").unwrap(), Ordering::Less);
        assert_eq!(order.compare("3.11.0", "3.10.12").unwrap(), Ordering::Greater);
    }

    #[test]
    fn semver_rejects_leading_zeros() {
        assert!(SemverOrder.compare("3.10.04", "3.10.5").is_err());
    }

    #[test]
    fn sort_with_sorts_and_breaks_ties_by_text() {
        let mut keys = vec!["20.04", "18.04", "22.04", "020.04"];
        sort_with(&mut keys, &DottedNumericOrder).unwrap();
        assert_eq!(keys, vec!["18.04", "020.04", "20.04", "22.04"]);
    }

    #[test]
    fn sort_with_surfaces_comparator_failure() {
        let mut versions = vec!["3.10.1".to_string(), "bogus".to_string()];
        assert!(sort_with(&mut versions, &SemverOrder).is_err());
    }
}
