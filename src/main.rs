use chargebook::cli::{self, App, Cli, Commands, StationCommand, UserCommand, VehicleCommand};
use chargebook::{ClientConfig, Result};
use clap::Parser;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use std::env;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Directory for the daily rolling JSON log; unset means stderr only.
const LOG_DIR_VAR: &str = "CHARGEBOOK_LOG_DIR";

/// Sets up stderr logging, plus a JSON log file when `CHARGEBOOK_LOG_DIR` is set.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_logging() -> Option<WorkerGuard> {
    match env::var(LOG_DIR_VAR) {
        Ok(dir) if !dir.is_empty() => {
            let appender = tracing_appender::rolling::daily(dir, "chargebook.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(fmt::layer().json().with_writer(writer))
                .init();
            Some(guard)
        },
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(std::io::stderr)
                .init();
            None
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env first so the log directory can come from it too
    dotenv::dotenv().ok();
    let _log_guard = init_logging();

    let args = Cli::parse();
    info!("Initializing charging-station booking client...");

    let config = ClientConfig::from_env()?.with_overrides(args.api_url, args.token);
    let app = App::new(config);

    // One-shot mode
    if let Some(command) = args.command {
        if let Err(e) = app.run_command(command).await {
            error!("Command execution failed: {:?}", e);
            eprintln!("{} {}", "Error:".red(), e.to_string().red());
            return Err(e);
        }
        return Ok(());
    }

    println!("{}", "Welcome to the charging-station booking CLI!".cyan().bold());

    // Main interactive loop
    loop {
        let options = &[
            "List stations",
            "Show station details",
            "Book a station",
            "List vehicles",
            "Create station",
            "Update station",
            "Delete station",
            "List users",
            "Create user",
            "Update user",
            "Delete user",
            "Neighbourhood statistics",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()?
            .unwrap_or(options.len() - 1); // Cancelled means exit

        println!("\n---\n");

        // Build the command from prompts; prompt failures are reported like command errors
        let command: Result<Option<Commands>> = match selection {
            0 => Ok(Some(Commands::Stations(StationCommand::List))),
            1 => cli::prompt_id("Station")
                .map(|id| Some(Commands::Stations(StationCommand::Get { id }))),
            2 => match app.available_stations().await {
                Ok(stations) => {
                    cli::prompt_booking(&stations).map(|args| Some(Commands::Book(args)))
                },
                Err(e) => Err(e),
            },
            3 => Ok(Some(Commands::Vehicles(VehicleCommand::List))),
            4 => cli::prompt_station_fields().and_then(|fields| {
                cli::prompt_create_status()
                    .map(|status| Some(Commands::Stations(StationCommand::Create { fields, status })))
            }),
            5 => cli::prompt_id("Station").and_then(|id| {
                let fields = cli::prompt_station_fields()?;
                let status = cli::prompt_update_status()?;
                Ok(Some(Commands::Stations(StationCommand::Update { id, fields, status })))
            }),
            6 => cli::prompt_id("Station").and_then(|id| {
                cli::confirm(&format!("Delete station {}?", id))
                    .map(|yes| yes.then(|| Commands::Stations(StationCommand::Delete { id })))
            }),
            7 => Ok(Some(Commands::Users(UserCommand::List))),
            8 => cli::prompt_user_fields("Password")
                .map(|f| Some(Commands::Users(UserCommand::Create(f)))),
            9 => cli::prompt_id("User").and_then(|id| {
                cli::prompt_user_fields("New password")
                    .map(|fields| Some(Commands::Users(UserCommand::Update { id, fields })))
            }),
            10 => cli::prompt_id("User").and_then(|id| {
                cli::confirm(&format!("Delete user {}?", id))
                    .map(|yes| yes.then(|| Commands::Users(UserCommand::Delete { id })))
            }),
            11 => cli::prompt_stats().map(|args| Some(Commands::Stats(args))),
            12 => {
                println!("{}", "Exiting application. Goodbye!".green());
                break;
            },
            _ => unreachable!(),
        };

        let command_result = match command {
            Ok(Some(command)) => app.run_command(command).await,
            Ok(None) => {
                println!("{}", "Cancelled.".dimmed());
                Ok(())
            },
            Err(e) => Err(e),
        };

        // Errors are shown and the loop continues
        if let Err(e) = command_result {
            error!("Command execution failed: {:?}", e);
            println!("{} {}", "Error executing command:".red(), e.to_string().red());
        }

        println!("\n---\n");
    }

    Ok(())
}
