use anyhow::{anyhow, Result};
use calelog_core::error::CoreError;
use calelog_core::repository::{Repository, ScheduleRepository};
use uuid::Uuid;

/// Resolves a full UUID or a unique short-id prefix to a schedule id,
/// scoped to the acting user.
pub async fn resolve_schedule_id(
    repo: &impl Repository,
    user_id: Uuid,
    short_id: &str,
) -> Result<Uuid> {
    if let Ok(id) = short_id.parse::<Uuid>() {
        return Ok(id);
    }
    if short_id.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    if !short_id.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
        return Err(anyhow!(CoreError::InvalidInput(format!(
            "'{}' is not a schedule ID or ID prefix",
            short_id
        ))));
    }

    let schedules = repo.find_schedules_by_id_prefix(user_id, short_id).await?;
    if schedules.len() == 1 {
        Ok(schedules[0].id)
    } else if schedules.is_empty() {
        Err(anyhow!(CoreError::NotFound(format!(
            "No schedule found with ID prefix '{}'",
            short_id
        ))))
    } else {
        let schedule_info: Vec<(String, String)> = schedules
            .into_iter()
            .map(|s| (s.id.simple().to_string()[..8].to_string(), s.title))
            .collect();
        Err(anyhow!(CoreError::AmbiguousId(schedule_info)))
    }
}
