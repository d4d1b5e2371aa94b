//! Per-user time-conflict validation against the persisted schedule store.
//!
//! Conflicts are an expected, structured outcome, not an error: a check
//! returns a [`ConflictReport`] whose entries describe every existing
//! schedule that overlaps the candidate. Checking has no side effects and is
//! safe to abandon mid-batch.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::interval::TimeSpan;
use crate::models::{Occurrence, Schedule};

/// The validator's view of storage: a queryable interval store. Implemented
/// by the SQLite repository; tests may substitute their own.
#[async_trait]
pub trait IntervalStore {
    /// All schedules of `user_id` whose interval overlaps
    /// `[start, end)`, optionally excluding one schedule id (used by the
    /// edit path so a schedule never conflicts with itself).
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Schedule>, CoreError>;
}

/// One existing schedule that overlaps a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictEntry {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl From<&Schedule> for ConflictEntry {
    fn from(schedule: &Schedule) -> Self {
        Self {
            id: schedule.id,
            title: schedule.title.clone(),
            start_time: schedule.start_time,
            end_time: schedule.end_time,
        }
    }
}

/// Every existing schedule that overlaps a candidate occurrence (or any
/// occurrence of a batch). Empty means no conflict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub entries: Vec<ConflictEntry>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds every schedule not already present, keyed by id. Batch checks
    /// report the union of conflicts, so one existing schedule overlapping
    /// several occurrences appears once.
    fn absorb(&mut self, conflicting: &[Schedule]) {
        for schedule in conflicting {
            if !self.entries.iter().any(|e| e.id == schedule.id) {
                self.entries.push(ConflictEntry::from(schedule));
            }
        }
    }
}

pub struct ConflictValidator;

impl ConflictValidator {
    /// Checks one candidate interval for the user. One store round-trip.
    pub async fn check<S>(
        store: &S,
        user_id: Uuid,
        span: TimeSpan,
        exclude_id: Option<Uuid>,
    ) -> Result<ConflictReport, CoreError>
    where
        S: IntervalStore + ?Sized,
    {
        let conflicting = store
            .find_overlapping(user_id, span.start, span.end, exclude_id)
            .await?;
        let mut report = ConflictReport::default();
        report.absorb(&conflicting);
        Ok(report)
    }

    /// Checks every occurrence of an expanded batch against the persisted
    /// store and returns the union of all conflicts found.
    ///
    /// Occurrences are only compared to existing rows, never to their
    /// batch siblings: expansion emits at most one occurrence per day with
    /// one shared time box, so siblings cannot overlap and checking them
    /// would fabricate conflicts. The check never stops at the first
    /// failure; the caller gets every problem in one response.
    pub async fn check_batch<S>(
        store: &S,
        user_id: Uuid,
        occurrences: &[Occurrence],
    ) -> Result<ConflictReport, CoreError>
    where
        S: IntervalStore + ?Sized,
    {
        let mut report = ConflictReport::default();
        for occurrence in occurrences {
            let conflicting = store
                .find_overlapping(user_id, occurrence.start_time, occurrence.end_time, None)
                .await?;
            report.absorb(&conflicting);
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleKind;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    /// In-memory stand-in for the SQLite store, applying the same half-open
    /// overlap rule the real query uses.
    struct MemoryStore {
        schedules: HashMap<Uuid, Schedule>,
    }

    impl MemoryStore {
        fn new(schedules: Vec<Schedule>) -> Self {
            Self {
                schedules: schedules.into_iter().map(|s| (s.id, s)).collect(),
            }
        }
    }

    #[async_trait]
    impl IntervalStore for MemoryStore {
        async fn find_overlapping(
            &self,
            user_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            exclude_id: Option<Uuid>,
        ) -> Result<Vec<Schedule>, CoreError> {
            let span = TimeSpan::new_unchecked(start, end);
            let mut found: Vec<Schedule> = self
                .schedules
                .values()
                .filter(|s| s.user_id == user_id)
                .filter(|s| Some(s.id) != exclude_id)
                .filter(|s| s.span().overlaps(&span))
                .cloned()
                .collect();
            found.sort_by_key(|s| s.start_time);
            Ok(found)
        }
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn stored(user_id: Uuid, title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Schedule {
        Schedule {
            id: Uuid::now_v7(),
            user_id,
            project_id: None,
            recurring_group_id: None,
            kind: ScheduleKind::Inactive,
            title: title.to_string(),
            content: None,
            start_time: start,
            end_time: end,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        }
    }

    fn candidate(user_id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) -> Occurrence {
        Occurrence {
            user_id,
            project_id: None,
            recurring_group_id: None,
            kind: ScheduleKind::Inactive,
            title: "candidate".to_string(),
            content: None,
            start_time: start,
            end_time: end,
        }
    }

    #[tokio::test]
    async fn overlapping_schedule_is_reported() {
        let user = Uuid::now_v7();
        let existing = stored(user, "standup", at(2, 11), at(2, 13));
        let store = MemoryStore::new(vec![existing.clone()]);

        let span = TimeSpan::new(at(2, 10), at(2, 12)).unwrap();
        let report = ConflictValidator::check(&store, user, span, None)
            .await
            .unwrap();

        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].id, existing.id);
    }

    #[tokio::test]
    async fn touching_boundary_is_not_a_conflict() {
        let user = Uuid::now_v7();
        let store = MemoryStore::new(vec![stored(user, "lunch", at(2, 12), at(2, 14))]);

        let span = TimeSpan::new(at(2, 10), at(2, 12)).unwrap();
        let report = ConflictValidator::check(&store, user, span, None)
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn other_users_schedules_are_ignored() {
        let user = Uuid::now_v7();
        let someone_else = Uuid::now_v7();
        let store = MemoryStore::new(vec![stored(someone_else, "their slot", at(2, 10), at(2, 12))]);

        let span = TimeSpan::new(at(2, 10), at(2, 12)).unwrap();
        let report = ConflictValidator::check(&store, user, span, None)
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn excluded_id_never_conflicts_with_itself() {
        let user = Uuid::now_v7();
        let existing = stored(user, "deep work", at(2, 10), at(2, 12));
        let store = MemoryStore::new(vec![existing.clone()]);

        let span = TimeSpan::new(at(2, 10), at(2, 11)).unwrap();
        let report = ConflictValidator::check(&store, user, span, Some(existing.id))
            .await
            .unwrap();
        assert!(report.is_empty());
    }

    #[tokio::test]
    async fn batch_report_is_the_union_across_all_occurrences() {
        let user = Uuid::now_v7();
        let monday = stored(user, "monday clash", at(2, 10), at(2, 12));
        let friday = stored(user, "friday clash", at(6, 10), at(6, 12));
        let store = MemoryStore::new(vec![monday.clone(), friday.clone()]);

        // Mon/Wed/Fri candidates; Wednesday is clear.
        let batch = vec![
            candidate(user, at(2, 11), at(2, 13)),
            candidate(user, at(4, 11), at(4, 13)),
            candidate(user, at(6, 11), at(6, 13)),
        ];

        let report = ConflictValidator::check_batch(&store, user, &batch)
            .await
            .unwrap();

        let mut ids: Vec<Uuid> = report.entries.iter().map(|e| e.id).collect();
        ids.sort();
        let mut expected = vec![monday.id, friday.id];
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn batch_report_deduplicates_one_existing_schedule() {
        let user = Uuid::now_v7();
        // One long existing block colliding with two occurrences on the
        // same day would still be a single entry.
        let block = stored(user, "all morning", at(2, 8), at(2, 12));
        let store = MemoryStore::new(vec![block.clone()]);

        let batch = vec![
            candidate(user, at(2, 8), at(2, 9)),
            candidate(user, at(2, 10), at(2, 11)),
        ];

        let report = ConflictValidator::check_batch(&store, user, &batch)
            .await
            .unwrap();
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].id, block.id);
    }

    #[tokio::test]
    async fn empty_batch_reports_nothing() {
        let user = Uuid::now_v7();
        let store = MemoryStore::new(vec![stored(user, "anything", at(2, 10), at(2, 12))]);

        let report = ConflictValidator::check_batch(&store, user, &[])
            .await
            .unwrap();
        assert!(report.is_empty());
    }
}
