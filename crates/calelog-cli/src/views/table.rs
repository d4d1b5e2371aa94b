use calelog_core::conflict::ConflictReport;
use calelog_core::models::{Schedule, ScheduleKind};
use chrono::Utc;
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};

#[derive(Debug, Clone)]
pub struct ViewSchedule {
    pub short_id: String,
    pub date: String,
    pub time: String,
    pub title: String,
    pub kind: ScheduleKind,
    pub project_name: Option<String>,
    pub recurring: bool,
    pub starts_in: String,
}

impl ViewSchedule {
    pub fn from_schedule(schedule: &Schedule, project_name: Option<String>) -> Self {
        Self {
            short_id: schedule.id.simple().to_string()[..8].to_string(),
            date: schedule.start_time.format("%Y-%m-%d %a").to_string(),
            time: format!(
                "{}-{}",
                schedule.start_time.format("%H:%M"),
                schedule.end_time.format("%H:%M")
            ),
            title: schedule.title.clone(),
            kind: schedule.kind,
            project_name,
            recurring: schedule.recurring_group_id.is_some(),
            starts_in: schedule.start_time.humanize(),
        }
    }
}

pub fn display_schedules(schedules: &[ViewSchedule]) {
    if schedules.is_empty() {
        println!("No schedules found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Date", "Time", "Title", "Kind", "Project", "When"]);

    for schedule in schedules {
        let mut row = Row::new();
        row.add_cell(Cell::new(&schedule.short_id));
        row.add_cell(Cell::new(&schedule.date));
        row.add_cell(Cell::new(&schedule.time));

        let mut display_title = String::new();
        if schedule.recurring {
            display_title.push('↻'); // Recurring symbol
            display_title.push(' ');
        }
        display_title.push_str(&schedule.title);

        let title_cell = match schedule.kind {
            ScheduleKind::Project => Cell::new(display_title).fg(Color::Cyan),
            ScheduleKind::Inactive => Cell::new(display_title).fg(Color::DarkGrey),
        };
        row.add_cell(title_cell);

        row.add_cell(Cell::new(schedule.kind.to_string()));
        row.add_cell(Cell::new(
            schedule.project_name.as_deref().unwrap_or("None"),
        ));
        row.add_cell(Cell::new(&schedule.starts_in));
        table.add_row(row);
    }

    println!("{table}");
}

/// Renders every existing schedule that collided with the request.
pub fn display_conflicts(report: &ConflictReport) {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Start", "End"]);

    for entry in &report.entries {
        let mut row = Row::new();
        row.add_cell(Cell::new(entry.id.simple().to_string()[..8].to_string()));
        row.add_cell(
            Cell::new(&entry.title)
                .fg(Color::Red)
                .add_attribute(Attribute::Bold),
        );
        row.add_cell(Cell::new(entry.start_time.format("%Y-%m-%d %H:%M").to_string()));
        row.add_cell(Cell::new(entry.end_time.format("%Y-%m-%d %H:%M").to_string()));
        table.add_row(row);
    }

    println!("{table}");
}

#[derive(Debug, Clone)]
pub struct ViewProject {
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

pub fn display_projects(projects: &[ViewProject]) {
    if projects.is_empty() {
        println!("No projects found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Description", "Created At"]);

    for project in projects {
        let mut row = Row::new();
        row.add_cell(Cell::new(&project.name));
        row.add_cell(Cell::new(project.description.as_deref().unwrap_or("None")));
        row.add_cell(Cell::new(project.created_at.humanize()));
        table.add_row(row);
    }

    println!("{table}");
}
