use anyhow::Result;
use calelog_core::repository::{ProjectRepository, Repository, ScheduleRepository};
use chrono::{Datelike, Local};
use std::collections::HashMap;
use uuid::Uuid;

use crate::cli::ListCommand;
use crate::views::table::{self, ViewSchedule};

pub async fn list_schedules(
    repo: &impl Repository,
    user_id: Uuid,
    command: ListCommand,
) -> Result<()> {
    let today = Local::now().date_naive();
    let year = command.year.unwrap_or_else(|| today.year());
    let month = command.month.unwrap_or_else(|| today.month());

    let schedules = repo.schedules_for_month(user_id, year, month).await?;

    let project_names: HashMap<Uuid, String> = repo
        .find_projects(user_id)
        .await?
        .into_iter()
        .map(|p| (p.id, p.name))
        .collect();

    let views: Vec<ViewSchedule> = schedules
        .iter()
        .map(|s| {
            let project_name = s.project_id.and_then(|id| project_names.get(&id).cloned());
            ViewSchedule::from_schedule(s, project_name)
        })
        .collect();

    println!("Schedules for {:04}-{:02}:", year, month);
    table::display_schedules(&views);
    Ok(())
}
