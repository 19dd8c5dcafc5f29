//! Date-range arithmetic shared by the validators.
//!
//! All ranges are inclusive on both ends and use calendar dates. Employment
//! windows are half-open on the right when no termination date is recorded.

use chrono::{Datelike, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// An inclusive `[start, end]` calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range, rejecting `start > end`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the bounds are inverted.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        let range = Self { start, end };
        if range.is_well_formed() {
            Ok(range)
        } else {
            Err(CoreError::Validation(format!(
                "malformed date range: start {start} is after end {end}"
            )))
        }
    }

    /// A single-day range.
    #[must_use]
    pub const fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Whether the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The shared sub-range, or `None` when the ranges are disjoint.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start <= end).then_some(Self { start, end })
    }

    /// Number of calendar months touched by the range, counting both end
    /// months. `2024-01-01..=2024-12-31` is 12 months; `2024-03-31..=2024-04-01`
    /// is 2. Malformed ranges count as zero.
    #[must_use]
    pub fn whole_months(&self) -> u32 {
        if !self.is_well_formed() {
            return 0;
        }
        let start = i64::from(self.start.year()) * 12 + i64::from(self.start.month0());
        let end = i64::from(self.end.year()) * 12 + i64::from(self.end.month0());
        u32::try_from(end - start + 1).unwrap_or(0)
    }
}

/// Whole months of the intersection of two ranges, clamped to zero when
/// they do not overlap.
#[must_use]
pub fn overlap_months(a: &DateRange, b: &DateRange) -> u32 {
    a.intersect(b).map_or(0, |shared| shared.whole_months())
}

/// Highest total weight carried on any single day by the given ranges.
/// Ranges that end the day before another starts never stack. Malformed
/// ranges are skipped.
#[must_use]
pub fn peak_concurrent(spans: impl IntoIterator<Item = (DateRange, f64)>) -> f64 {
    let mut events: Vec<(NaiveDate, f64)> = Vec::new();
    for (range, weight) in spans {
        if !range.is_well_formed() {
            continue;
        }
        events.push((range.start, weight));
        if let Some(after) = range.end.succ_opt() {
            events.push((after, -weight));
        }
    }
    // Same-day releases before same-day starts.
    events.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut current = 0.0;
    let mut peak = 0.0_f64;
    for (_, delta) in events {
        current += delta;
        peak = peak.max(current);
    }
    peak
}

/// The window `[hire_date, termination_date]` during which an employee may
/// be validly assigned. An open end means "still employed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmploymentWindow {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

/// Which side of an employment window an activity fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WindowBreach {
    BeforeStart,
    AfterEnd,
}

impl EmploymentWindow {
    /// Check that `activity` lies entirely inside the window.
    ///
    /// The start check wins when both bounds are violated.
    ///
    /// # Errors
    ///
    /// Returns the violated bound.
    pub fn check(&self, activity: &DateRange) -> Result<(), WindowBreach> {
        if activity.start < self.start {
            return Err(WindowBreach::BeforeStart);
        }
        match self.end {
            Some(end) if activity.end > end => Err(WindowBreach::AfterEnd),
            _ => Ok(()),
        }
    }

    #[must_use]
    pub fn contains(&self, activity: &DateRange) -> bool {
        self.check(activity).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn r(start: &str, end: &str) -> DateRange {
        DateRange::new(d(start), d(end)).unwrap()
    }

    #[test]
    fn new_rejects_inverted_bounds() {
        assert!(DateRange::new(d("2024-02-01"), d("2024-01-01")).is_err());
        assert!(DateRange::new(d("2024-01-01"), d("2024-01-01")).is_ok());
    }

    #[rstest]
    #[case("2024-01-01", "2024-12-31", 12)]
    #[case("2024-01-15", "2024-01-20", 1)]
    #[case("2024-03-31", "2024-04-01", 2)]
    #[case("2023-11-01", "2024-02-29", 4)]
    fn whole_months_counts_calendar_months(
        #[case] start: &str,
        #[case] end: &str,
        #[case] expected: u32,
    ) {
        assert_eq!(r(start, end).whole_months(), expected);
    }

    #[rstest]
    #[case(("2024-01-01", "2024-06-30"), ("2024-04-01", "2024-12-31"), 3)]
    #[case(("2024-01-01", "2024-03-31"), ("2024-04-01", "2024-12-31"), 0)]
    #[case(("2024-01-01", "2024-12-31"), ("2023-01-01", "2025-12-31"), 12)]
    #[case(("2024-06-30", "2024-07-01"), ("2024-07-01", "2024-12-31"), 1)]
    fn overlap_months_uses_intersection(
        #[case] a: (&str, &str),
        #[case] b: (&str, &str),
        #[case] expected: u32,
    ) {
        assert_eq!(overlap_months(&r(a.0, a.1), &r(b.0, b.1)), expected);
        assert_eq!(overlap_months(&r(b.0, b.1), &r(a.0, a.1)), expected);
    }

    #[test]
    fn peak_concurrent_only_stacks_shared_days() {
        let sequential = [
            (r("2024-01-01", "2024-12-31"), 100.0),
            (r("2025-01-01", "2025-12-31"), 100.0),
        ];
        assert_eq!(peak_concurrent(sequential), 100.0);

        let staggered = [
            (r("2024-01-01", "2024-06-30"), 60.0),
            (r("2024-04-01", "2024-09-30"), 30.0),
            (r("2024-07-01", "2024-12-31"), 50.0),
        ];
        assert_eq!(peak_concurrent(staggered), 90.0);

        let same_day = [
            (r("2024-03-01", "2024-03-01"), 40.0),
            (r("2024-03-01", "2024-03-31"), 70.0),
        ];
        assert_eq!(peak_concurrent(same_day), 110.0);
        assert_eq!(peak_concurrent(Vec::new()), 0.0);
    }

    #[test]
    fn overlaps_is_inclusive() {
        assert!(r("2024-01-01", "2024-01-31").overlaps(&r("2024-01-31", "2024-02-28")));
        assert!(!r("2024-01-01", "2024-01-30").overlaps(&r("2024-01-31", "2024-02-28")));
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let window = EmploymentWindow {
            start: d("2023-03-01"),
            end: Some(d("2024-02-29")),
        };
        assert!(window.contains(&r("2023-03-01", "2024-02-29")));
        assert_eq!(
            window.check(&r("2023-02-28", "2023-12-31")),
            Err(WindowBreach::BeforeStart)
        );
        assert_eq!(
            window.check(&r("2023-03-01", "2024-03-01")),
            Err(WindowBreach::AfterEnd)
        );
    }

    #[test]
    fn open_window_has_no_end() {
        let window = EmploymentWindow {
            start: d("2020-01-01"),
            end: None,
        };
        assert!(window.contains(&r("2020-01-01", "2099-12-31")));
    }
}
