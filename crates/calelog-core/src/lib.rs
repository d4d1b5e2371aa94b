//! # Calelog Core Library
//!
//! Calendar scheduling engine with recurrence expansion and per-user
//! time-conflict validation over a SQLite store.
//!
//! ## Features
//!
//! - **Recurrence Expansion**: Deterministic day-walk expansion of daily and
//!   weekly repeat rules into concrete occurrence batches, with hard safety
//!   caps for rules that supply no usable end condition
//! - **Conflict Validation**: Half-open interval overlap checks scoped per
//!   user, reporting the full set of colliding schedules rather than the
//!   first hit
//! - **All-or-Nothing Batches**: A recurring request persists entirely or
//!   not at all; conflicts reject the whole batch before any write
//! - **Flat Recurrence Groups**: Occurrences spawned together share an
//!   opaque group id, kept as a tagged column rather than an object graph
//! - **Type Safety**: Illegal rule combinations are unrepresentable; the
//!   two recurrence families are a closed tagged enum
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and outcome types
//! - [`interval`]: Shared half-open time interval
//! - [`recurrence`]: The pure recurrence expansion engine
//! - [`conflict`]: Conflict validation against the interval store
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use calelog_core::{
//!     db,
//!     models::{CreateOutcome, ScheduleDraft, ScheduleKind},
//!     repository::{ScheduleRepository, SqliteRepository, UserRepository},
//! };
//! use chrono::{NaiveDate, NaiveTime};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("calelog.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!     let user = repo.resolve_user("default").await?;
//!
//!     let draft = ScheduleDraft {
//!         title: "Focus block".to_string(),
//!         kind: ScheduleKind::Inactive,
//!         project_id: None,
//!         content: None,
//!         date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
//!         start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
//!         end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
//!     };
//!
//!     match repo.create_schedule(user.id, draft, None).await? {
//!         CreateOutcome::Single(schedule) => println!("created {}", schedule.id),
//!         CreateOutcome::Conflict(report) => {
//!             for entry in &report.entries {
//!                 println!("collides with '{}'", entry.title);
//!             }
//!         }
//!         CreateOutcome::Recurring { .. } => unreachable!("no repeat rule given"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod conflict;
pub mod db;
pub mod error;
pub mod interval;
pub mod models;
pub mod recurrence;
pub mod repository;
