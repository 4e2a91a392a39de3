use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use icare_core::clock::{Shift, SystemClock};
use icare_core::intake_output::IntakeOutputType;
use icare_core::observation::ObservationCategory;
use icare_core::session::CareSession;
use icare_core::task::TaskRegistry;
use icare_core::vitals::VitalType;
use icare_infrastructure::{CarePaths, ConfigService, TomlRecordStore};
use std::path::PathBuf;
use std::sync::Arc;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "icare")]
#[command(about = "iCare - bedside care monitoring and shift handoff", long_about = None)]
struct Cli {
    /// Path to care.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the record files (overrides the config)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Today's overview: shift, completion and open alerts
    Status,
    /// List the care tasks and whether each is done today
    Tasks,
    /// Mark a task as done for today
    CheckIn {
        task: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Record a vital sign reading
    Vital {
        #[arg(value_parser = parse_vital_type)]
        vital_type: VitalType,
        value: f64,
    },
    /// Record fluid intake or output
    Io {
        #[arg(value_parser = parse_io_type)]
        io_type: IntakeOutputType,
        /// Millilitres
        #[arg(long)]
        amount: Option<f64>,
        /// Stool descriptor
        #[arg(long)]
        stool: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Record an observation note
    Observe {
        #[arg(value_parser = parse_observation_category)]
        category: ObservationCategory,
        text: String,
        #[arg(long)]
        abnormal: bool,
    },
    /// List abnormal events, newest first
    Events {
        /// Only today's events still waiting on the caregiver
        #[arg(long)]
        pending: bool,
    },
    /// Acknowledge an abnormal event
    Ack { id: String },
    /// Resolve an abnormal event
    Resolve {
        id: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Escalate an abnormal event
    Escalate { id: String },
    /// Generate, store and print the shift handoff report
    Report {
        /// morning, afternoon or night (defaults to the current shift)
        #[arg(long, value_parser = parse_shift)]
        shift: Option<Shift>,
        /// YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Daily completion rate over the last days
    Trend {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Show or edit the patient profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    SetBed { bed: String },
    AddAlert { alert: String },
}

fn parse_vital_type(s: &str) -> Result<VitalType, String> {
    VitalType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = VitalType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown vital type '{}', expected one of: {}", s, known.join(", "))
    })
}

fn parse_io_type(s: &str) -> Result<IntakeOutputType, String> {
    IntakeOutputType::parse(s).ok_or_else(|| {
        let known: Vec<&str> = IntakeOutputType::ALL.iter().map(|t| t.as_str()).collect();
        format!("unknown intake/output type '{}', expected one of: {}", s, known.join(", "))
    })
}

fn parse_observation_category(s: &str) -> Result<ObservationCategory, String> {
    ObservationCategory::parse(s).ok_or_else(|| {
        let known: Vec<&str> = ObservationCategory::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{}', expected one of: {}", s, known.join(", "))
    })
}

fn parse_shift(s: &str) -> Result<Shift, String> {
    Shift::parse(s).ok_or_else(|| format!("unknown shift '{}', expected morning, afternoon or night", s))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new().context("Failed to locate config directory")?,
    };
    let config = config_service
        .load()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    logging::init(&config)?;

    let data_dir = CarePaths::resolve_data_dir(cli.data_dir.as_deref().or(config.data_dir.as_deref()))
        .context("Failed to resolve data directory")?;
    tracing::debug!(data_dir = %data_dir.display(), policy = config.event_transitions.as_str(), "Opening care session");

    let store = Arc::new(TomlRecordStore::new(data_dir));
    let mut session = CareSession::with_options(
        store,
        SystemClock,
        TaskRegistry::standard(),
        config.event_transitions,
    );

    match cli.command {
        Commands::Status => commands::overview::status(&session),
        Commands::Tasks => commands::overview::tasks(&session),
        Commands::CheckIn { task, note } => commands::record::check_in(&mut session, &task, note)?,
        Commands::Vital { vital_type, value } => {
            commands::record::vital(&mut session, vital_type, value)?
        }
        Commands::Io {
            io_type,
            amount,
            stool,
            note,
        } => commands::record::intake_output(&mut session, io_type, amount, stool, note)?,
        Commands::Observe {
            category,
            text,
            abnormal,
        } => commands::record::observe(&mut session, category, &text, abnormal)?,
        Commands::Events { pending } => commands::events::list(&session, pending),
        Commands::Ack { id } => commands::events::acknowledge(&mut session, &id)?,
        Commands::Resolve { id, note } => commands::events::resolve(&mut session, &id, note)?,
        Commands::Escalate { id } => commands::events::escalate(&mut session, &id)?,
        Commands::Report { shift, date } => commands::report::generate(&mut session, date, shift)?,
        Commands::Trend { days } => commands::overview::trend(&session, days),
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&session),
            ProfileAction::SetBed { bed } => commands::profile::set_bed(&mut session, bed)?,
            ProfileAction::AddAlert { alert } => {
                commands::profile::add_alert(&mut session, alert)?
            }
        },
    }

    Ok(())
}
