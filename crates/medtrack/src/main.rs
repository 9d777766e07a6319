//! Medtrack: medication reminder tracker.
//!
//! Main binary with subcommands:
//! - `daemon`: long-lived scheduling loop (timers, alerts, history)
//! - `add` / `remove`: mutate the persisted reminders list
//! - `list` / `history`: render current state

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medtrack_store::{Reminder, ReminderTime, Store, StoreError, Weekday};

mod daemon;

#[derive(Parser)]
#[command(name = "medtrack")]
#[command(about = "Medication reminder tracker", long_about = None)]
struct Cli {
    /// Data directory holding the reminder and history files
    #[arg(long, env = "MEDTRACK_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scheduling daemon
    Daemon {
        /// Seconds between scheduling passes over the persisted list
        #[arg(long, default_value = "30")]
        refresh_interval: u64,

        /// Disable alarm sound playback
        #[arg(long)]
        no_sound: bool,
    },

    /// Add a reminder
    Add {
        /// Medication name
        #[arg(long)]
        medication: String,

        /// Dose description, e.g. "100mg"
        #[arg(long)]
        dosage: String,

        /// Time of day, 24h HH:MM
        #[arg(long, value_parser = parse_time)]
        time: ReminderTime,

        /// Days of week, comma-separated (full names or mon,tue,...)
        #[arg(long, value_delimiter = ',', value_parser = parse_weekday, required = true)]
        days: Vec<Weekday>,

        /// Alert tune identifier
        #[arg(long, default_value = "bell")]
        tune: String,
    },

    /// Remove the reminder at the given position
    Remove {
        /// Zero-based index as shown by `list`
        index: usize,
    },

    /// List reminders with their positions
    List,

    /// Show the dose history
    History,
}

fn parse_time(s: &str) -> Result<ReminderTime, String> {
    s.parse().map_err(|e: StoreError| e.to_string())
}

fn parse_weekday(s: &str) -> Result<Weekday, String> {
    s.parse().map_err(|e: StoreError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "medtrack=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let store = Store::new(cli.data_dir.unwrap_or_else(Store::default_dir));

    match cli.command {
        Commands::Daemon {
            refresh_interval,
            no_sound,
        } => {
            daemon::run(daemon::DaemonConfig {
                store,
                refresh_interval,
                no_sound,
            })
            .await
        }

        Commands::Add {
            medication,
            dosage,
            time,
            days,
            tune,
        } => add_reminder(&store, medication, dosage, time, days, tune).await,

        Commands::Remove { index } => remove_reminder(&store, index).await,

        Commands::List => list_reminders(&store).await,

        Commands::History => show_history(&store).await,
    }
}

async fn add_reminder(
    store: &Store,
    medication: String,
    dosage: String,
    time: ReminderTime,
    days: Vec<Weekday>,
    tune: String,
) -> Result<()> {
    let reminder =
        Reminder::new(medication, dosage, time, days, tune).map_err(|e| miette::miette!("{}", e))?;

    let reminders = store
        .add_reminder(reminder)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!(
        "added reminder [{}]; a running daemon picks it up on its next scheduling pass",
        reminders.len() - 1
    );
    Ok(())
}

async fn remove_reminder(store: &Store, index: usize) -> Result<()> {
    let removed = store
        .remove_reminder(index)
        .await
        .map_err(|e| miette::miette!("{}", e))?;

    println!("removed [{}] {}", index, removed.medication);
    Ok(())
}

async fn list_reminders(store: &Store) -> Result<()> {
    let reminders = store.load_reminders().await;
    if reminders.is_empty() {
        println!("no reminders");
        return Ok(());
    }

    for (index, reminder) in reminders.iter().enumerate() {
        let days: Vec<&str> = reminder.days.iter().map(|d| d.name()).collect();
        println!(
            "[{}] {} - {} at {} on {} (tune: {})",
            index,
            reminder.medication,
            reminder.dosage,
            reminder.time,
            days.join(", "),
            reminder.tune
        );
    }
    Ok(())
}

async fn show_history(store: &Store) -> Result<()> {
    let history = store.load_history().await;
    if history.is_empty() {
        println!("no doses recorded");
        return Ok(());
    }

    for entry in &history {
        println!(
            "{} - {} taken at {} on {}",
            entry.medication, entry.dosage, entry.time, entry.date
        );
    }
    Ok(())
}
