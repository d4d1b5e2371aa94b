use anyhow::Result;
use calelog_core::models::{
    CreateOutcome, Frequency, RepeatEnd, RepeatRule, ScheduleDraft, ScheduleKind,
};
use calelog_core::repository::{ProjectRepository, Repository, ScheduleRepository};
use owo_colors::{OwoColorize, Style};
use uuid::Uuid;

use crate::cli::{AddCommand, RepeatFrequency};
use crate::parser::{parse_date, parse_time, parse_weekdays};
use crate::views::table;

pub async fn add_schedule(
    repo: &impl Repository,
    user_id: Uuid,
    command: AddCommand,
) -> Result<()> {
    let date = parse_date(&command.date)?;
    let start_time = parse_time(&command.from)?;
    let end_time = parse_time(&command.to)?;

    let (kind, project_id) = match &command.project {
        Some(name) => {
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
        }
        None => (ScheduleKind::Inactive, None),
    };

    let repeat = build_repeat_rule(&command)?;

    let draft = ScheduleDraft {
        title: command.title,
        kind,
        project_id,
        content: command.content,
        date,
        start_time,
        end_time,
    };

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    match repo.create_schedule(user_id, draft, repeat).await? {
        CreateOutcome::Single(schedule) => {
            println!(
                "{} Created schedule: {}",
                "✓".style(success_style),
                schedule.title.bright_white().bold()
            );
            println!(
                "  {} {} {}-{}",
                "→".style(info_style),
                schedule.start_time.format("%Y-%m-%d"),
                schedule.start_time.format("%H:%M"),
                schedule.end_time.format("%H:%M")
            );
            println!(
                "  {} Schedule ID: {}",
                "→".style(info_style),
                schedule.id.simple().to_string()[..8].to_string().yellow()
            );
        }
        CreateOutcome::Recurring {
            group_id,
            schedules,
        } => {
            if schedules.is_empty() {
                println!(
                    "{} The repeat rule matched no day in range; nothing was created.",
                    "!".yellow().bold()
                );
                return Ok(());
            }
            println!(
                "{} Created recurring schedule: {} ({} occurrences)",
                "✓".style(success_style),
                schedules[0].title.bright_white().bold(),
                schedules.len()
            );
            println!(
                "  {} First: {}  Last: {}",
                "→".style(info_style),
                schedules[0].start_time.format("%Y-%m-%d"),
                schedules[schedules.len() - 1].start_time.format("%Y-%m-%d")
            );
            println!(
                "  {} Group ID: {}",
                "→".style(info_style),
                group_id.simple().to_string()[..8].to_string().yellow()
            );
            println!(
                "  {} Delete the whole series later with: calelog delete <id> --all-recurrences",
                "→".style(info_style)
            );
        }
        CreateOutcome::Conflict(report) => {
            eprintln!(
                "{} The requested time collides with {} existing schedule(s):",
                "✗".red().bold(),
                report.entries.len()
            );
            table::display_conflicts(&report);
            std::process::exit(1);
        }
    }

    Ok(())
}

fn build_repeat_rule(command: &AddCommand) -> Result<Option<RepeatRule>> {
    let Some(every) = command.every else {
        if command.interval.is_some() || command.on.is_some() || command.until.is_some() || command.count.is_some() {
            return Err(anyhow::anyhow!(
                "--interval/--on/--until/--count only apply together with --every"
            ));
        }
        return Ok(None);
    };

    let frequency = match every {
        RepeatFrequency::Daily => {
            if command.on.is_some() {
                return Err(anyhow::anyhow!("--on applies to weekly repeats only"));
            }
            Frequency::Daily {
                interval: command.interval.unwrap_or(1),
            }
        }
        RepeatFrequency::Weekly => {
            if command.interval.is_some() {
                return Err(anyhow::anyhow!("--interval applies to daily repeats only"));
            }
            let weekdays = match &command.on {
                Some(days) => parse_weekdays(days)?,
                None => return Err(anyhow::anyhow!("weekly repeats need --on (e.g. --on mon,wed,fri)")),
            };
            Frequency::Weekly { weekdays }
        }
    };

    let end = match (&command.until, command.count) {
        (Some(until), None) => RepeatEnd::OnDate(parse_date(until)?),
        (None, Some(count)) => RepeatEnd::AfterCount(count),
        (None, None) => RepeatEnd::Unbounded,
        (Some(_), Some(_)) => unreachable!("clap rejects --until with --count"),
    };

    Ok(Some(RepeatRule { frequency, end }))
}
