//! Data access layer: domain traits over a SQLite schedule store.
//!
//! # Concurrency
//!
//! Creation runs check-then-insert: the conflict scan and the batch insert
//! are two steps, and between them a concurrent request for the same user
//! could persist an overlapping schedule that neither request saw. The
//! engine does not own the transaction boundary and cannot close this race
//! itself; deployments that need the guarantee must wrap check+insert in a
//! serializable transaction scope per user or enforce an exclusion
//! constraint in the store. Known gap, deliberately documented rather than
//! papered over.
//!
//! The store is shared across users; every query here is scoped by
//! `user_id`, no cross-user locks are taken, and no query results are cached
//! between invocations.

use crate::conflict::IntervalStore;
use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    CreateOutcome, Project, RepeatRule, Schedule, ScheduleDraft, UpdateOutcome, User,
};
use async_trait::async_trait;
use uuid::Uuid;

// Re-export domain modules
pub mod projects;
pub mod schedules;
pub mod users;

/// Domain-specific trait for schedule operations
#[async_trait]
pub trait ScheduleRepository {
    /// Expands the draft (once for one-off requests, N times for recurring
    /// ones), validates the whole batch against the persisted store, and on
    /// a clean result inserts it atomically. Any conflict rejects the whole
    /// request with nothing written.
    async fn create_schedule(
        &self,
        user_id: Uuid,
        draft: ScheduleDraft,
        repeat: Option<RepeatRule>,
    ) -> Result<CreateOutcome, CoreError>;

    /// Re-runs single-occurrence validation for an edited schedule,
    /// excluding the schedule's own stored interval from the scan. Keeps
    /// the row's recurrence-group tag untouched.
    async fn update_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        draft: ScheduleDraft,
    ) -> Result<UpdateOutcome, CoreError>;

    /// Deletes one schedule, or every schedule sharing its recurrence group
    /// when `whole_group` is set and the row carries a group tag. Returns
    /// the number of rows removed.
    async fn delete_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        whole_group: bool,
    ) -> Result<u64, CoreError>;

    async fn find_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<Schedule>, CoreError>;

    /// Schedules whose id starts with the given hex prefix, for short-id
    /// resolution at the CLI.
    async fn find_schedules_by_id_prefix(
        &self,
        user_id: Uuid,
        prefix: &str,
    ) -> Result<Vec<Schedule>, CoreError>;

    /// All schedules of a user starting within the given month, ascending.
    async fn schedules_for_month(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<Schedule>, CoreError>;

    async fn schedules_in_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Vec<Schedule>, CoreError>;
}

/// Domain-specific trait for project operations
#[async_trait]
pub trait ProjectRepository {
    async fn add_project(
        &self,
        user_id: Uuid,
        name: String,
        description: Option<String>,
    ) -> Result<Project, CoreError>;
    async fn find_project_by_name(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Project>, CoreError>;
    async fn find_projects(&self, user_id: Uuid) -> Result<Vec<Project>, CoreError>;
    async fn delete_project(&self, user_id: Uuid, name: String) -> Result<(), CoreError>;
}

/// Domain-specific trait for user profiles
#[async_trait]
pub trait UserRepository {
    /// Finds the user with this profile name, creating it on first use.
    async fn resolve_user(&self, name: &str) -> Result<User, CoreError>;
}

/// Main repository trait that composes all domain traits plus the
/// validator's interval-store seam
#[async_trait]
pub trait Repository:
    ScheduleRepository + ProjectRepository + UserRepository + IntervalStore
{
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}
