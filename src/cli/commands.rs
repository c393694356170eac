use crate::api::ApiClient;
use crate::cli::render;
use crate::config::ClientConfig;
use crate::error::{AppError, Result};
use crate::models::{
    BookingRequest, ResourceId, Station, StationInput, UserInput, DEFAULT_BOOKING_MINUTES,
    DEFAULT_STATS_DAYS,
};
use clap::{Args, Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// CLI for the charging-station booking API
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL including the /api prefix (overrides CHARGEBOOK_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Session token sent as bearer credential (overrides CHARGEBOOK_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Run a single command; without one the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Manage charging stations
    #[command(subcommand)]
    Stations(StationCommand),

    /// List registered vehicles
    #[command(subcommand)]
    Vehicles(VehicleCommand),

    /// Manage users (admin token required)
    #[command(subcommand)]
    Users(UserCommand),

    /// Charges per day for a neighbourhood (admin token required)
    Stats(StatsArgs),

    /// Book a station for a vehicle
    Book(BookArgs),
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum StationCommand {
    /// List all stations with their occupancy
    List,
    /// Show one station and its recent charge sessions
    Get { id: ResourceId },
    /// Create a station
    Create {
        #[command(flatten)]
        fields: StationFields,
        /// Station status (the backend defaults to "active")
        #[arg(long)]
        status: Option<String>,
    },
    /// Replace the fields of a station
    Update {
        id: ResourceId,
        #[command(flatten)]
        fields: StationFields,
        /// Station status; the backend overwrites it on every update
        #[arg(long)]
        status: String,
    },
    /// Delete a station
    Delete { id: ResourceId },
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum VehicleCommand {
    /// List all vehicles
    List,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a user
    Create(UserArgs),
    /// Replace the fields of a user
    Update {
        id: ResourceId,
        #[command(flatten)]
        fields: UserArgs,
    },
    /// Delete a user
    Delete { id: ResourceId },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StationFields {
    #[arg(long)]
    pub address: String,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,
    /// Maximum power in kW
    #[arg(long)]
    pub power_kw: f64,
    /// Neighbourhood code
    #[arg(long)]
    pub nil: String,
}

impl StationFields {
    pub fn into_input(self, status: Option<String>) -> StationInput {
        StationInput {
            address: self.address,
            latitude: self.latitude,
            longitude: self.longitude,
            power_kw: self.power_kw,
            nil: self.nil,
            status,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct UserArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: Option<String>,
    /// New password; left unchanged on update when omitted
    #[arg(long)]
    pub password: Option<String>,
}

impl From<UserArgs> for UserInput {
    fn from(args: UserArgs) -> Self {
        UserInput {
            name: args.name,
            surname: args.surname,
            email: args.email,
            phone: args.phone,
            password: args.password,
        }
    }
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct StatsArgs {
    /// Neighbourhood code
    #[arg(short, long)]
    pub neighborhood: String,

    /// Number of days to look back
    #[arg(short, long, default_value_t = DEFAULT_STATS_DAYS)]
    pub days: u32,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct BookArgs {
    /// Station ID
    #[arg(short, long)]
    pub station: ResourceId,

    /// Vehicle ID
    #[arg(short, long)]
    pub vehicle: ResourceId,

    /// Booking length in minutes
    #[arg(short, long, default_value_t = DEFAULT_BOOKING_MINUTES)]
    pub duration: u32,
}

impl StatsArgs {
    /// Rejects an empty neighbourhood or a zero-day window.
    pub fn validate(&self) -> Result<()> {
        if self.neighborhood.trim().is_empty() {
            return Err(AppError::Cli("Neighbourhood must not be empty".to_string()));
        }
        if self.days == 0 {
            return Err(AppError::Cli("Days must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl BookArgs {
    pub fn validate(&self) -> Result<()> {
        if self.duration == 0 {
            return Err(AppError::Cli(
                "Booking duration must be at least 1 minute".to_string(),
            ));
        }
        Ok(())
    }
}

/// CLI application
pub struct App {
    api_client: ApiClient,
}

impl App {
    /// Create a new CLI application around an already resolved configuration
    pub fn new(config: ClientConfig) -> Self {
        let api_client = ApiClient::new(config);
        info!("Using booking API at {}", api_client.base_url());
        Self { api_client }
    }

    /// Run one command and print its result
    pub async fn run_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Stations(cmd) => self.run_station_command(cmd).await,
            Commands::Vehicles(VehicleCommand::List) => {
                let vehicles = self
                    .with_spinner("Fetching vehicles", self.api_client.get_vehicles())
                    .await?;
                println!("{} vehicles", vehicles.len().to_string().bold());
                println!("{}", render::vehicles_table(&vehicles));
                Ok(())
            },
            Commands::Users(cmd) => self.run_user_command(cmd).await,
            Commands::Stats(args) => self.show_stats(args).await,
            Commands::Book(args) => self.book(args).await,
        }
    }

    async fn run_station_command(&self, cmd: StationCommand) -> Result<()> {
        match cmd {
            StationCommand::List => {
                let stations = self
                    .with_spinner("Fetching stations", self.api_client.get_stations())
                    .await?;
                let occupied = stations.iter().filter(|s| s.occupied == Some(true)).count();
                println!(
                    "{} stations, {} occupied",
                    stations.len().to_string().bold(),
                    occupied.to_string().yellow()
                );
                println!("{}", render::stations_table(&stations));
            },
            StationCommand::Get { id } => {
                let detail = self
                    .with_spinner(
                        &format!("Fetching station {}", id),
                        self.api_client.get_station(id.clone()),
                    )
                    .await?;
                println!("{}", render::stations_table(std::slice::from_ref(&detail.station)));
                if detail.recent_sessions.is_empty() {
                    println!("{}", "No charge sessions recorded.".dimmed());
                } else {
                    println!("{}", "Recent charge sessions".cyan().bold());
                    println!("{}", render::sessions_table(&detail.recent_sessions));
                }
            },
            StationCommand::Create { fields, status } => {
                let input = fields.into_input(status);
                let ack = self
                    .with_spinner("Creating station", self.api_client.create_station(&input))
                    .await?;
                report_ack(ack.success, ack.message.as_deref(), "Station created");
            },
            StationCommand::Update { id, fields, status } => {
                let input = fields.into_input(Some(status));
                let ack = self
                    .with_spinner(
                        &format!("Updating station {}", id),
                        self.api_client.update_station(id.clone(), &input),
                    )
                    .await?;
                report_ack(
                    ack.success,
                    ack.message.as_deref(),
                    &format!("Station {} updated", id),
                );
            },
            StationCommand::Delete { id } => {
                let ack = self
                    .with_spinner(
                        &format!("Deleting station {}", id),
                        self.api_client.delete_station(id.clone()),
                    )
                    .await?;
                report_ack(
                    ack.success,
                    ack.message.as_deref(),
                    &format!("Station {} deleted", id),
                );
            },
        }
        Ok(())
    }

    async fn run_user_command(&self, cmd: UserCommand) -> Result<()> {
        match cmd {
            UserCommand::List => {
                let users = self
                    .with_spinner("Fetching users", self.api_client.get_users())
                    .await?;
                println!("{} users", users.len().to_string().bold());
                println!("{}", render::users_table(&users));
            },
            UserCommand::Create(fields) => {
                let input = UserInput::from(fields);
                let ack = self
                    .with_spinner("Creating user", self.api_client.create_user(&input))
                    .await?;
                report_ack(
                    ack.success,
                    ack.message.as_deref(),
                    &format!("User {} created", input.email),
                );
            },
            UserCommand::Update { id, fields } => {
                let input = UserInput::from(fields);
                let ack = self
                    .with_spinner(
                        &format!("Updating user {}", id),
                        self.api_client.update_user(id.clone(), &input),
                    )
                    .await?;
                report_ack(
                    ack.success,
                    ack.message.as_deref(),
                    &format!("User {} updated", id),
                );
            },
            UserCommand::Delete { id } => {
                let ack = self
                    .with_spinner(
                        &format!("Deleting user {}", id),
                        self.api_client.delete_user(id.clone()),
                    )
                    .await?;
                report_ack(
                    ack.success,
                    ack.message.as_deref(),
                    &format!("User {} deleted", id),
                );
            },
        }
        Ok(())
    }

    async fn show_stats(&self, args: StatsArgs) -> Result<()> {
        args.validate()?;
        let neighborhood = args.neighborhood.trim();

        let series = self
            .with_spinner(
                &format!("Fetching stats for {}", neighborhood),
                self.api_client.get_stats(neighborhood, args.days),
            )
            .await?;

        println!(
            "{}-day charges for {}: {} total",
            args.days,
            neighborhood.bold(),
            crate::models::total_charges(&series).to_string().green()
        );
        println!("{}", render::stats_table(&series));
        Ok(())
    }

    async fn book(&self, args: BookArgs) -> Result<()> {
        args.validate()?;
        let request = BookingRequest::new(args.station, args.vehicle).with_duration(args.duration);

        let confirmation = self
            .with_spinner(
                &format!("Booking station {}", request.station_id),
                self.api_client.submit_booking(&request),
            )
            .await?;

        let window = match (confirmation.start_time, confirmation.end_time) {
            (Some(start), Some(end)) => format!(
                " from {} to {} UTC",
                start.format("%Y-%m-%d %H:%M"),
                end.format("%H:%M")
            ),
            _ => String::new(),
        };
        report_ack(
            confirmation.success,
            None,
            &format!(
                "Station {} booked for vehicle {}{}",
                request.station_id, request.vehicle_id, window
            ),
        );
        Ok(())
    }

    /// Stations that are not currently occupied, for the interactive booking picker
    pub async fn available_stations(&self) -> Result<Vec<Station>> {
        let stations = self
            .with_spinner("Fetching stations", self.api_client.get_stations())
            .await?;
        Ok(stations
            .into_iter()
            .filter(|s| s.occupied != Some(true))
            .collect())
    }

    /// Shows a spinner on stderr while `fut` is pending.
    async fn with_spinner<T, F>(&self, message: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner:.cyan} {msg}")?);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));

        let result = fut.await;
        spinner.finish_and_clear();
        result
    }
}

fn report_ack(success: bool, message: Option<&str>, default: &str) {
    let text = message.unwrap_or(default);
    if success {
        println!("{} {}", "✔".green(), text.green());
    } else {
        println!("{} {}", "✘".red(), text.yellow());
    }
}
