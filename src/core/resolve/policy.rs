//! Candidate selection policies
//!
//! The DK service can return several reports for one name and several batches
//! for one report. Which one gets migrated is decided here, by a named policy,
//! rather than by indexing into whatever list came back.

use crate::domain::SourceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How to pick one candidate out of a lookup result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Take the first candidate in service order
    #[default]
    First,
    /// Take the last candidate in service order
    Last,
    /// Require exactly one candidate
    Unique,
}

impl SelectionPolicy {
    /// Pick one candidate
    ///
    /// Returns `Ok(None)` when there are no candidates, leaving the caller to
    /// decide which "not found" error applies.
    ///
    /// # Errors
    ///
    /// [`SourceError::Ambiguous`] when the policy is `Unique` and more than one
    /// candidate is present.
    ///
    /// # Examples
    ///
    /// ```
    /// use dkbridge::core::resolve::SelectionPolicy;
    ///
    /// let picked = SelectionPolicy::First.select("batch", vec!["B2", "B1"]).unwrap();
    /// assert_eq!(picked, Some("B2"));
    /// ```
    pub fn select<T>(&self, what: &str, candidates: Vec<T>) -> Result<Option<T>, SourceError> {
        let count = candidates.len();
        match self {
            SelectionPolicy::First => Ok(candidates.into_iter().next()),
            SelectionPolicy::Last => Ok(candidates.into_iter().next_back()),
            SelectionPolicy::Unique if count > 1 => Err(SourceError::Ambiguous {
                what: what.to_string(),
                count,
            }),
            SelectionPolicy::Unique => Ok(candidates.into_iter().next()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectionPolicy::First => "first",
            SelectionPolicy::Last => "last",
            SelectionPolicy::Unique => "unique",
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            "unique" => Ok(Self::Unique),
            _ => Err(format!(
                "Invalid selection policy: {s}. Expected 'first', 'last' or 'unique'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(SelectionPolicy::First, vec![1, 2, 3], Some(1) ; "first of many")]
    #[test_case(SelectionPolicy::Last, vec![1, 2, 3], Some(3) ; "last of many")]
    #[test_case(SelectionPolicy::Unique, vec![7], Some(7) ; "unique of one")]
    #[test_case(SelectionPolicy::First, vec![], None ; "first of none")]
    #[test_case(SelectionPolicy::Unique, vec![], None ; "unique of none")]
    fn test_select(policy: SelectionPolicy, candidates: Vec<i32>, expected: Option<i32>) {
        assert_eq!(policy.select("report", candidates).unwrap(), expected);
    }

    #[test]
    fn test_unique_rejects_many() {
        let err = SelectionPolicy::Unique
            .select("report", vec!["R1", "R2"])
            .unwrap_err();
        assert!(matches!(err, SourceError::Ambiguous { count: 2, .. }));
    }

    #[test]
    fn test_from_str_round_trip() {
        for policy in [
            SelectionPolicy::First,
            SelectionPolicy::Last,
            SelectionPolicy::Unique,
        ] {
            assert_eq!(policy.as_str().parse::<SelectionPolicy>().unwrap(), policy);
        }
        assert!("newest".parse::<SelectionPolicy>().is_err());
    }
}
