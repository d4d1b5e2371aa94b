use anyhow::Result;
use calelog_core::error::CoreError;
use calelog_core::models::{ScheduleDraft, ScheduleKind, UpdateOutcome};
use calelog_core::repository::{ProjectRepository, Repository, ScheduleRepository};
use owo_colors::{OwoColorize, Style};
use uuid::Uuid;

use crate::cli::EditCommand;
use crate::parser::{parse_date, parse_time};
use crate::util::resolve_schedule_id;
use crate::views::table;

pub async fn edit_schedule(
    repo: &impl Repository,
    user_id: Uuid,
    command: EditCommand,
) -> Result<()> {
    let schedule_id = resolve_schedule_id(repo, user_id, &command.id).await?;
    let existing = repo
        .find_schedule(user_id, schedule_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(schedule_id.to_string()))?;

    // Unspecified fields keep their stored values.
    let date = match &command.date {
        Some(d) => parse_date(d)?,
        None => existing.start_time.date_naive(),
    };
    let start_time = match &command.from {
        Some(t) => parse_time(t)?,
        None => existing.start_time.time(),
    };
    let end_time = match &command.to {
        Some(t) => parse_time(t)?,
        None => existing.end_time.time(),
    };

    let (kind, project_id) = if command.inactive {
        (ScheduleKind::Inactive, None)
    } else if let Some(name) = &command.project {
        let project = repo
            .find_project_by_name(user_id, name)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown project '{}'. Create it first: calelog project add {}",
                    name,
                    name
                )
            })?;
        (ScheduleKind::Project, Some(project.id))
    } else {
        (existing.kind, existing.project_id)
    };

    let content = if command.content_clear {
        None
    } else {
        command.content.clone().or(existing.content)
    };

    let draft = ScheduleDraft {
        title: command.title.unwrap_or(existing.title),
        kind,
        project_id,
        content,
        date,
        start_time,
        end_time,
    };

    match repo.update_schedule(user_id, schedule_id, draft).await? {
        UpdateOutcome::Updated(schedule) => {
            let success_style = Style::new().green().bold();
            println!(
                "{} Updated schedule: {}",
                "✓".style(success_style),
                schedule.title.bright_white().bold()
            );
            println!(
                "  {} {} {}-{}",
                "→".blue(),
                schedule.start_time.format("%Y-%m-%d"),
                schedule.start_time.format("%H:%M"),
                schedule.end_time.format("%H:%M")
            );
        }
        UpdateOutcome::Conflict(report) => {
            eprintln!(
                "{} The new time collides with {} existing schedule(s):",
                "✗".red().bold(),
                report.entries.len()
            );
            table::display_conflicts(&report);
            std::process::exit(1);
        }
    }

    Ok(())
}
