//! Shared half-open time interval used by the expander, the validator, and
//! the schedule rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A half-open UTC interval `[start, end)`. The end instant is excluded, so
/// back-to-back spans do not overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSpan {
    /// Builds a span, refusing empty or inverted intervals.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CoreError> {
        if start >= end {
            return Err(CoreError::InvalidInput(format!(
                "interval must start before it ends ({} >= {})",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// For spans whose ordering is already guaranteed (e.g. rows read back
    /// from the store, or a validated draft placed on a date).
    pub fn new_unchecked(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Two half-open intervals conflict iff `s1 < e2 && s2 < e1`. Touching
    /// endpoints are not a conflict.
    pub fn overlaps(&self, other: &TimeSpan) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn at(hour: u32, min: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, 2)
            .unwrap()
            .and_hms_opt(hour, min, 0)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn rejects_inverted_and_empty_spans() {
        assert!(TimeSpan::new(at(12, 0), at(10, 0)).is_err());
        assert!(TimeSpan::new(at(12, 0), at(12, 0)).is_err());
        assert!(TimeSpan::new(at(10, 0), at(12, 0)).is_ok());
    }

    #[test]
    fn partial_overlap_conflicts() {
        let a = TimeSpan::new(at(10, 0), at(12, 0)).unwrap();
        let b = TimeSpan::new(at(11, 0), at(13, 0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_endpoints_do_not_conflict() {
        let a = TimeSpan::new(at(10, 0), at(12, 0)).unwrap();
        let b = TimeSpan::new(at(12, 0), at(14, 0)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn containment_conflicts() {
        let outer = TimeSpan::new(at(9, 0), at(17, 0)).unwrap();
        let inner = TimeSpan::new(at(12, 0), at(12, 30)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    proptest! {
        /// Overlap is symmetric and agrees with the interval arithmetic.
        #[test]
        fn overlap_is_symmetric(s1 in 0i64..1000, d1 in 1i64..100, s2 in 0i64..1000, d2 in 1i64..100) {
            let base = at(0, 0);
            let a = TimeSpan::new_unchecked(
                base + chrono::Duration::minutes(s1),
                base + chrono::Duration::minutes(s1 + d1),
            );
            let b = TimeSpan::new_unchecked(
                base + chrono::Duration::minutes(s2),
                base + chrono::Duration::minutes(s2 + d2),
            );
            prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
            prop_assert_eq!(a.overlaps(&b), s1 < s2 + d2 && s2 < s1 + d1);
        }
    }
}
