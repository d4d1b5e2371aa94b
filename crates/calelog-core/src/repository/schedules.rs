use crate::conflict::{ConflictValidator, IntervalStore};
use crate::error::CoreError;
use crate::models::{
    CreateOutcome, Occurrence, RepeatRule, Schedule, ScheduleDraft, UpdateOutcome,
};
use crate::recurrence::RecurrenceExpander;
use crate::repository::SqliteRepository;
use async_trait::async_trait;
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use sqlx::{Sqlite, Transaction};
use uuid::Uuid;

#[async_trait]
impl IntervalStore for SqliteRepository {
    async fn find_overlapping(
        &self,
        user_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Schedule>, CoreError> {
        // Half-open overlap: an existing row conflicts iff it starts before
        // the candidate ends and ends after the candidate starts.
        let schedules = match exclude_id {
            Some(exclude) => {
                sqlx::query_as(
                    r#"SELECT * FROM schedules
                    WHERE user_id = $1 AND start_time < $2 AND end_time > $3 AND id != $4
                    ORDER BY start_time ASC
                    "#,
                )
                .bind(user_id)
                .bind(end)
                .bind(start)
                .bind(exclude)
                .fetch_all(self.pool())
                .await?
            }
            None => {
                sqlx::query_as(
                    r#"SELECT * FROM schedules
                    WHERE user_id = $1 AND start_time < $2 AND end_time > $3
                    ORDER BY start_time ASC
                    "#,
                )
                .bind(user_id)
                .bind(end)
                .bind(start)
                .fetch_all(self.pool())
                .await?
            }
        };
        Ok(schedules)
    }
}

#[async_trait]
impl super::ScheduleRepository for SqliteRepository {
    async fn create_schedule(
        &self,
        user_id: Uuid,
        draft: ScheduleDraft,
        repeat: Option<RepeatRule>,
    ) -> Result<CreateOutcome, CoreError> {
        match repeat {
            None => {
                let batch = RecurrenceExpander::expand(user_id, &draft, None, None)?;
                let occurrence = batch.into_iter().next().ok_or(CoreError::Unknown)?;

                let report =
                    ConflictValidator::check(self, user_id, occurrence.span(), None).await?;
                if !report.is_empty() {
                    return Ok(CreateOutcome::Conflict(report));
                }

                let mut tx = self.pool().begin().await?;
                let schedule = Self::insert_occurrence(&mut tx, &occurrence).await?;
                tx.commit().await?;
                Ok(CreateOutcome::Single(schedule))
            }
            Some(rule) => {
                let group_id = Uuid::now_v7();
                let batch =
                    RecurrenceExpander::expand(user_id, &draft, Some(&rule), Some(group_id))?;

                // Every occurrence is checked against the persisted store
                // before anything is written; one conflict anywhere rejects
                // the whole batch.
                let report = ConflictValidator::check_batch(self, user_id, &batch).await?;
                if !report.is_empty() {
                    return Ok(CreateOutcome::Conflict(report));
                }

                let mut tx = self.pool().begin().await?;
                let mut schedules = Vec::with_capacity(batch.len());
                for occurrence in &batch {
                    schedules.push(Self::insert_occurrence(&mut tx, occurrence).await?);
                }
                tx.commit().await?;
                Ok(CreateOutcome::Recurring {
                    group_id,
                    schedules,
                })
            }
        }
    }

    async fn update_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        draft: ScheduleDraft,
    ) -> Result<UpdateOutcome, CoreError> {
        let _existing = self
            .find_schedule(user_id, schedule_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(schedule_id.to_string()))?;

        draft.validate()?;
        let span = draft.span();
        let report =
            ConflictValidator::check(self, user_id, span, Some(schedule_id)).await?;
        if !report.is_empty() {
            return Ok(UpdateOutcome::Conflict(report));
        }

        let schedule: Schedule = sqlx::query_as(
            r#"UPDATE schedules
            SET title = $1, kind = $2, project_id = $3, content = $4,
                start_time = $5, end_time = $6, updated_at = $7
            WHERE id = $8 AND user_id = $9
            RETURNING *
            "#,
        )
        .bind(&draft.title)
        .bind(draft.kind)
        .bind(draft.project_id)
        .bind(&draft.content)
        .bind(span.start)
        .bind(span.end)
        .bind(Utc::now())
        .bind(schedule_id)
        .bind(user_id)
        .fetch_one(self.pool())
        .await
        .map_err(|_| CoreError::NotFound(schedule_id.to_string()))?;

        Ok(UpdateOutcome::Updated(schedule))
    }

    async fn delete_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
        whole_group: bool,
    ) -> Result<u64, CoreError> {
        let schedule = self
            .find_schedule(user_id, schedule_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(schedule_id.to_string()))?;

        let result = match (whole_group, schedule.recurring_group_id) {
            (true, Some(group_id)) => {
                sqlx::query("DELETE FROM schedules WHERE recurring_group_id = $1 AND user_id = $2")
                    .bind(group_id)
                    .bind(user_id)
                    .execute(self.pool())
                    .await?
            }
            _ => {
                sqlx::query("DELETE FROM schedules WHERE id = $1 AND user_id = $2")
                    .bind(schedule_id)
                    .bind(user_id)
                    .execute(self.pool())
                    .await?
            }
        };

        Ok(result.rows_affected())
    }

    async fn find_schedule(
        &self,
        user_id: Uuid,
        schedule_id: Uuid,
    ) -> Result<Option<Schedule>, CoreError> {
        let schedule = sqlx::query_as("SELECT * FROM schedules WHERE id = $1 AND user_id = $2")
            .bind(schedule_id)
            .bind(user_id)
            .fetch_optional(self.pool())
            .await?;
        Ok(schedule)
    }

    async fn find_schedules_by_id_prefix(
        &self,
        user_id: Uuid,
        prefix: &str,
    ) -> Result<Vec<Schedule>, CoreError> {
        // Ids are stored as 16-byte blobs; match on their hex expansion.
        let mut pattern = prefix.replace('-', "").to_uppercase();
        pattern.push('%');

        let schedules = sqlx::query_as(
            "SELECT * FROM schedules WHERE user_id = $1 AND hex(id) LIKE $2",
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(self.pool())
        .await?;
        Ok(schedules)
    }

    async fn schedules_for_month(
        &self,
        user_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Vec<Schedule>, CoreError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            CoreError::InvalidInput(format!("invalid month: {:04}-{:02}", year, month))
        })?;
        let next = first
            .checked_add_months(Months::new(1))
            .ok_or_else(|| CoreError::InvalidInput(format!("month out of range: {}", first)))?;

        let schedules = sqlx::query_as(
            r#"SELECT * FROM schedules
            WHERE user_id = $1 AND start_time >= $2 AND start_time < $3
            ORDER BY start_time ASC
            "#,
        )
        .bind(user_id)
        .bind(first.and_time(NaiveTime::MIN).and_utc())
        .bind(next.and_time(NaiveTime::MIN).and_utc())
        .fetch_all(self.pool())
        .await?;
        Ok(schedules)
    }

    async fn schedules_in_group(
        &self,
        user_id: Uuid,
        group_id: Uuid,
    ) -> Result<Vec<Schedule>, CoreError> {
        let schedules = sqlx::query_as(
            r#"SELECT * FROM schedules
            WHERE user_id = $1 AND recurring_group_id = $2
            ORDER BY start_time ASC
            "#,
        )
        .bind(user_id)
        .bind(group_id)
        .fetch_all(self.pool())
        .await?;
        Ok(schedules)
    }
}

impl SqliteRepository {
    async fn insert_occurrence(
        tx: &mut Transaction<'_, Sqlite>,
        occurrence: &Occurrence,
    ) -> Result<Schedule, CoreError> {
        let now = Utc::now();
        let schedule = sqlx::query_as(
            r#"INSERT INTO schedules
                (id, user_id, project_id, recurring_group_id, kind, title, content,
                 start_time, end_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(occurrence.user_id)
        .bind(occurrence.project_id)
        .bind(occurrence.recurring_group_id)
        .bind(occurrence.kind)
        .bind(&occurrence.title)
        .bind(&occurrence.content)
        .bind(occurrence.start_time)
        .bind(occurrence.end_time)
        .bind(now)
        .bind(now)
        .fetch_one(&mut **tx)
        .await?;
        Ok(schedule)
    }
}
