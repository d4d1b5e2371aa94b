use anyhow::Result;
use calelog_core::repository::{ProjectRepository, Repository};
use owo_colors::OwoColorize;
use uuid::Uuid;

use crate::cli::{ProjectCommand, ProjectSubcommand};
use crate::views::table::{self, ViewProject};

pub async fn project_command(
    repo: &impl Repository,
    user_id: Uuid,
    command: ProjectCommand,
) -> Result<()> {
    match command.command {
        ProjectSubcommand::Add { name, description } => {
            let project = repo.add_project(user_id, name, description).await?;
            println!(
                "{} Created project: {}",
                "✓".green().bold(),
                project.name.bright_white().bold()
            );
        }
        ProjectSubcommand::List => {
            let projects = repo.find_projects(user_id).await?;
            let views: Vec<ViewProject> = projects
                .into_iter()
                .map(|p| ViewProject {
                    name: p.name,
                    description: p.description,
                    created_at: p.created_at,
                })
                .collect();
            table::display_projects(&views);
        }
        ProjectSubcommand::Delete { name } => {
            repo.delete_project(user_id, name.clone()).await?;
            println!("{} Deleted project '{}'.", "✓".green().bold(), name);
        }
    }
    Ok(())
}
