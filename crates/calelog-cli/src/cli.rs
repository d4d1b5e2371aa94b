use clap::{Parser, Subcommand, ValueEnum};

/// A calendar for time-boxed activities with recurring schedules and
/// per-user conflict checking
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Profile to act as (overrides the configured profile)
    #[clap(long, global = true)]
    pub user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Add a schedule (one-off or recurring)
    Add(AddCommand),
    /// List a month of schedules
    List(ListCommand),
    /// Edit a schedule
    Edit(EditCommand),
    /// Delete a schedule, or its whole recurring group
    Delete(DeleteCommand),
    /// Manage projects
    Project(ProjectCommand),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatFrequency {
    Daily,
    Weekly,
}

#[derive(Parser, Debug, Clone)]
pub struct AddCommand {
    /// The title of the schedule
    pub title: String,
    /// The date of the schedule (e.g. '2025-06-02')
    #[clap(short, long)]
    pub date: String,
    /// Start time of day (e.g. '10:00', '9:00 AM')
    #[clap(long)]
    pub from: String,
    /// End time of day, same day (e.g. '12:00', 'noon')
    #[clap(long)]
    pub to: String,
    /// Tie the schedule to a project (marks it as project activity)
    #[clap(short, long)]
    pub project: Option<String>,
    /// Free-text note
    #[clap(short, long)]
    pub content: Option<String>,
    /// Repeat frequency
    #[clap(long, value_enum)]
    pub every: Option<RepeatFrequency>,
    /// Cadence in days for daily repeats (default 1)
    #[clap(long, help = "Repeat every N days (daily only)")]
    pub interval: Option<u32>,
    /// Days of week for weekly repeats
    #[clap(long, help = "Days of week (mon,tue,... or 'weekdays'/'weekends')")]
    pub on: Option<String>,
    /// Last date the repeat may fall on
    #[clap(long, conflicts_with = "count", help = "End date for the repeat (e.g. '2025-12-31')")]
    pub until: Option<String>,
    /// Maximum number of occurrences
    #[clap(long, help = "Maximum number of occurrences")]
    pub count: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// Year to list (defaults to the current year)
    #[clap(short, long)]
    pub year: Option<i32>,
    /// Month to list, 1-12 (defaults to the current month)
    #[clap(short, long)]
    pub month: Option<u32>,
}

#[derive(Parser, Debug, Clone)]
pub struct EditCommand {
    /// The ID of the schedule to edit (full or unique prefix)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    /// Move the schedule to another date
    #[arg(long)]
    pub date: Option<String>,

    /// New start time of day
    #[arg(long)]
    pub from: Option<String>,

    /// New end time of day
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub content: Option<String>,
    #[arg(long, conflicts_with = "content")]
    pub content_clear: bool,

    /// Tie to a project
    #[arg(long)]
    pub project: Option<String>,
    /// Detach from any project and mark as inactive time
    #[arg(long, conflicts_with = "project")]
    pub inactive: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteCommand {
    /// The ID of the schedule to delete (full or unique prefix)
    pub id: String,
    /// Delete every schedule in the same recurring group
    #[clap(long)]
    pub all_recurrences: bool,
    /// Force deletion without confirmation
    #[clap(short, long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ProjectCommand {
    #[command(subcommand)]
    pub command: ProjectSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ProjectSubcommand {
    /// Add a new project
    Add {
        name: String,
        #[clap(short, long)]
        description: Option<String>,
    },
    /// List projects
    List,
    /// Delete a project (refused while schedules reference it)
    Delete { name: String },
}
