use calelog_core::db;
use calelog_core::error::CoreError;
use calelog_core::repository::{SqliteRepository, UserRepository};
use clap::Parser;
use owo_colors::{OwoColorize, Style};

mod cli;
mod commands;
mod config;
mod parser;
mod util;
mod views;

#[tokio::main]
async fn main() {
    let config = config::Config::new().unwrap_or_default();
    let cli = cli::Cli::parse();

    let db_pool = match db::establish_connection(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };
    let repository = SqliteRepository::new(db_pool);

    let profile = cli.user.as_deref().unwrap_or(&config.profile);
    let user = match repository.resolve_user(profile).await {
        Ok(user) => user,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        cli::Commands::Add(command) => {
            commands::add::add_schedule(&repository, user.id, command).await
        }
        cli::Commands::List(command) => {
            commands::list::list_schedules(&repository, user.id, command).await
        }
        cli::Commands::Edit(command) => {
            commands::edit::edit_schedule(&repository, user.id, command).await
        }
        cli::Commands::Delete(command) => {
            commands::delete::delete_schedule(&repository, user.id, command).await
        }
        cli::Commands::Project(command) => {
            commands::project::project_command(&repository, user.id, command).await
        }
    };

    if let Err(e) = result {
        handle_error(e);
        std::process::exit(1);
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(s) => {
                eprintln!("{} {}", "Error:".style(error_style), s);
            }
            CoreError::InvalidRule(s) => {
                eprintln!(
                    "{} Invalid repeat rule: {}",
                    "Error:".style(error_style),
                    s.yellow()
                );
            }
            CoreError::AmbiguousId(schedules) => {
                eprintln!("{}", "Error: Ambiguous ID.".style(error_style));
                eprintln!("Did you mean one of these?");
                for (id, title) in schedules {
                    eprintln!("  {} ({})", id.yellow(), title);
                }
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
