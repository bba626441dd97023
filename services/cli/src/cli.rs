use crate::commands;
use crate::infra::{parse_date, parse_intensity};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use leanlog::config::{AppConfig, ScheduleConfig};
use leanlog::error::AppError;
use leanlog::telemetry;
use leanlog::tracker::Intensity;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "leanlog",
    about = "Daily weight-loss log: score days, follow streaks, plan weekly doses",
    version
)]
pub(crate) struct Cli {
    /// Override the configured data directory
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Print JSON instead of text where a command supports it
    #[arg(long, global = true)]
    pub(crate) json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Record, preview, or show a single day
    Day {
        #[command(subcommand)]
        command: DayCommand,
    },
    /// Dashboard KPIs, trend caption, and the most recent days
    History(HistoryArgs),
    /// Plain-text report over the last seven saved days
    Report,
    /// Weekly dose calendar with administered marks
    Schedule(ScheduleArgs),
    /// Mark scheduled doses as given or not
    Dose {
        #[command(subcommand)]
        command: DoseCommand,
    },
    /// Inspect or change scoring goals
    Goals {
        #[command(subcommand)]
        command: GoalsCommand,
    },
    /// Export saved days
    Export {
        #[command(subcommand)]
        command: ExportCommand,
    },
    /// Import saved days
    Import {
        #[command(subcommand)]
        command: ImportCommand,
    },
    /// Write a full JSON backup
    Backup(BackupOutput),
    /// Replace the stored state from a JSON backup
    Restore {
        /// Backup file to read
        path: PathBuf,
    },
    /// Show or toggle the display theme
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
    /// Delete every saved day and dose mark (goals and theme are kept)
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum DayCommand {
    /// Score and store a day, replacing any record on that date
    Save(DayArgs),
    /// Score a day against current goals without storing it
    Score(DayArgs),
    /// Show the stored record for a date
    Show(DateArg),
}

#[derive(Subcommand, Debug)]
pub(crate) enum DoseCommand {
    /// Record the dose scheduled on DATE as given
    Mark(DateArg),
    /// Record the dose scheduled on DATE as not given
    Unmark(DateArg),
    /// Remove every dose mark
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum GoalsCommand {
    Show,
    /// Change one or more goals; unspecified goals keep their value
    Set(GoalArgs),
    /// Restore the default goals
    Reset,
}

#[derive(Subcommand, Debug)]
pub(crate) enum ExportCommand {
    /// Write every saved day as CSV
    Csv(CsvOutput),
}

#[derive(Subcommand, Debug)]
pub(crate) enum ImportCommand {
    /// Merge days from a CSV export, keeping their exported scores
    Csv {
        /// CSV file to read
        path: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum ThemeCommand {
    Show,
    Toggle,
}

#[derive(Args, Debug)]
pub(crate) struct DateArg {
    /// Day (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DayArgs {
    /// Day (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Morning weight in kg
    #[arg(long)]
    pub(crate) weight: Option<f64>,
    /// Hours slept
    #[arg(long)]
    pub(crate) sleep: Option<f64>,
    /// Energy, 0 to 10
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) energy: Option<u8>,
    /// Hunger, 0 to 10
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) hunger: Option<u8>,
    /// Pain, 0 to 10
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) pain: Option<u8>,
    /// Cardio minutes
    #[arg(long)]
    pub(crate) cardio_min: Option<u32>,
    #[arg(long)]
    pub(crate) steps: Option<u32>,
    /// leve, moderada, or intensa
    #[arg(long, value_parser = parse_intensity)]
    pub(crate) intensity: Option<Intensity>,
    /// Protein target reached
    #[arg(long)]
    pub(crate) protein: bool,
    /// Water target reached
    #[arg(long)]
    pub(crate) water: bool,
    /// A strength session was planned today
    #[arg(long)]
    pub(crate) strength_day: bool,
    /// The planned strength session was done
    #[arg(long)]
    pub(crate) strength_done: bool,
    #[arg(long)]
    pub(crate) mobility_done: bool,
    #[arg(long)]
    pub(crate) mobility_min: Option<u32>,
    /// Snacked outside planned meals
    #[arg(long)]
    pub(crate) snacks: bool,
    /// Meals that followed the plan
    #[arg(long, default_value_t = 0)]
    pub(crate) clean_meals: u32,
    /// Best thing about the day
    #[arg(long, default_value = "")]
    pub(crate) win: String,
    /// One thing to fix tomorrow
    #[arg(long, default_value = "")]
    pub(crate) fix: String,
}

#[derive(Args, Debug)]
pub(crate) struct HistoryArgs {
    /// Number of recent days to list
    #[arg(long, default_value_t = 10)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct ScheduleArgs {
    /// First day to consider (YYYY-MM-DD); doses fall on the next Friday
    #[arg(long, value_parser = parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Number of weekly doses to list
    #[arg(
        long,
        value_parser = clap::value_parser!(u32).range(0..=i64::from(ScheduleConfig::MAX_COUNT))
    )]
    pub(crate) count: Option<u32>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GoalArgs {
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) steps: Option<u32>,
    /// Cardio minutes per day
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) cardio: Option<u32>,
    /// Hours of sleep per night
    #[arg(long)]
    pub(crate) sleep: Option<f64>,
    #[arg(long)]
    pub(crate) clean_meals: Option<u32>,
    /// Rest days earn full strength points
    #[arg(long)]
    pub(crate) neutral_strength: Option<bool>,
    /// Deduct points for snacking
    #[arg(long)]
    pub(crate) penalize_snacks: Option<bool>,
}

#[derive(Args, Debug)]
pub(crate) struct CsvOutput {
    /// Destination file, or `-` for stdout
    #[arg(long, short, default_value = "pasta_emagrecimento.csv")]
    pub(crate) output: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct BackupOutput {
    /// Destination file, or `-` for stdout
    #[arg(long, short, default_value = "pasta_emagrecimento_backup.json")]
    pub(crate) output: PathBuf,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(data_dir) = cli.data_dir.clone() {
        config.storage.data_dir = data_dir;
    }

    telemetry::init(&config.telemetry)?;

    commands::dispatch(cli.command, &config, cli.json)
}
