use anyhow::Result;
use calelog_core::error::CoreError;
use calelog_core::repository::{Repository, ScheduleRepository};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::cli::DeleteCommand;
use crate::util::resolve_schedule_id;

pub async fn delete_schedule(
    repo: &impl Repository,
    user_id: Uuid,
    command: DeleteCommand,
) -> Result<()> {
    let schedule_id = resolve_schedule_id(repo, user_id, &command.id).await?;
    let schedule = repo
        .find_schedule(user_id, schedule_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(schedule_id.to_string()))?;

    let deletes_group = command.all_recurrences && schedule.recurring_group_id.is_some();

    if !command.force {
        let prompt = if deletes_group {
            format!(
                "Delete '{}' and every other occurrence in its recurring group?",
                schedule.title
            )
        } else {
            format!(
                "Delete schedule '{}' on {}?",
                schedule.title,
                schedule.start_time.format("%Y-%m-%d")
            )
        };
        let confirmation = Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .unwrap_or(false);

        if !confirmation {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    let removed = repo
        .delete_schedule(user_id, schedule_id, command.all_recurrences)
        .await?;

    if removed == 1 {
        println!("{} Deleted 1 schedule.", "✓".green().bold());
    } else {
        println!("{} Deleted {} schedules.", "✓".green().bold(), removed);
    }
    Ok(())
}
