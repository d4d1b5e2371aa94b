use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

use crate::conflict::ConflictReport;
use crate::error::CoreError;
use crate::interval::TimeSpan;

/// A user profile. Conflict checking is scoped per user; schedules belonging
/// to other users never collide.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whether a calendar slot counts as project activity or blocked-off time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum ScheduleKind {
    Project,
    Inactive,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid schedule kind: {0}")]
pub struct ParseScheduleKindError(String);

impl FromStr for ScheduleKind {
    type Err = ParseScheduleKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "project" => Ok(ScheduleKind::Project),
            "inactive" => Ok(ScheduleKind::Inactive),
            _ => Err(ParseScheduleKindError(s.to_string())),
        }
    }
}

impl std::fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleKind::Project => write!(f, "project"),
            ScheduleKind::Inactive => write!(f, "inactive"),
        }
    }
}

/// One concrete, dated schedule occurrence. This is the unit persisted and
/// the unit checked for conflicts. Occurrences are created only through the
/// expansion pipeline and are never mutated by the engine afterwards; edits
/// re-run the single-occurrence validation path instead.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: Uuid,
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    /// Shared by every occurrence spawned from one recurring creation
    /// request; None for one-off schedules. Flat tag, not a parent link.
    pub recurring_group_id: Option<Uuid>,
    pub kind: ScheduleKind,
    pub title: String,
    pub content: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Schedule {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new_unchecked(self.start_time, self.end_time)
    }
}

/// A fully resolved schedule instance as produced by expansion, before it
/// has a row identity. The repository assigns ids and timestamps when the
/// batch is persisted, which keeps expansion a pure function of its inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub user_id: Uuid,
    pub project_id: Option<Uuid>,
    pub recurring_group_id: Option<Uuid>,
    pub kind: ScheduleKind,
    pub title: String,
    pub content: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl Occurrence {
    pub fn span(&self) -> TimeSpan {
        TimeSpan::new_unchecked(self.start_time, self.end_time)
    }
}

/// Immutable input for schedule creation: a title and a single day's time
/// box, optionally tied to a project. Recurrence is supplied separately as a
/// [`RepeatRule`].
#[derive(Debug, Clone)]
pub struct ScheduleDraft {
    pub title: String,
    pub kind: ScheduleKind,
    pub project_id: Option<Uuid>,
    pub content: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

impl ScheduleDraft {
    /// Checks the template invariant: the slot starts before it ends, on one
    /// calendar day. Overnight spans are not representable here.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.start_time >= self.end_time {
            return Err(CoreError::InvalidInput(format!(
                "Schedule must start before it ends ({} >= {})",
                self.start_time, self.end_time
            )));
        }
        Ok(())
    }

    /// The draft's time box placed on an arbitrary day.
    pub fn span_on(&self, date: NaiveDate) -> TimeSpan {
        TimeSpan::new_unchecked(
            date.and_time(self.start_time).and_utc(),
            date.and_time(self.end_time).and_utc(),
        )
    }

    /// The draft's own interval, on its own date.
    pub fn span(&self) -> TimeSpan {
        self.span_on(self.date)
    }
}

/// The two supported recurrence families. A closed enumeration with
/// per-variant fields: a weekly rule cannot carry a daily cadence and vice
/// versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frequency {
    /// Every `interval` days, counted from the template date.
    Daily { interval: u32 },
    /// On each listed weekday. An empty set is legal and expands to nothing.
    Weekly { weekdays: HashSet<Weekday> },
}

/// How a repeat rule terminates. `Unbounded` rules are cut off by the
/// expansion safety caps alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatEnd {
    OnDate(NaiveDate),
    AfterCount(u32),
    Unbounded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatRule {
    pub frequency: Frequency,
    pub end: RepeatEnd,
}

impl RepeatRule {
    /// Rejects rules that must not reach expansion. A zero daily interval is
    /// refused outright rather than coerced.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Frequency::Daily { interval: 0 } = self.frequency {
            return Err(CoreError::InvalidRule(
                "daily interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Result of a creation request. Conflicts are an expected business outcome,
/// not an error: callers branch on this instead of catching anything.
#[derive(Debug)]
pub enum CreateOutcome {
    Single(Schedule),
    /// All occurrences spawned from one recurring request, in ascending
    /// date order, sharing `group_id`. The vector may be empty when the
    /// rule matched no day in range (a no-op create).
    Recurring {
        group_id: Uuid,
        schedules: Vec<Schedule>,
    },
    Conflict(ConflictReport),
}

/// Result of an edit request after single-occurrence re-validation.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(Schedule),
    Conflict(ConflictReport),
}
