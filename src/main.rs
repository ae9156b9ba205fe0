use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use tabled::{Table, Tabled};

use solorun::config::AppConfig;
use solorun::logging::{self, LogLevel};
use solorun::{
    ImportManager, LoadRatioClassifier, LoadStatus, PositionTracker, RoutineGenerator, RunnerLevel,
    UserProfile,
};

/// SoloRun - Running Coach Analytics CLI
///
/// Classifies training-load ratios, derives session routines, and replays
/// recorded GPS tracks into distance and pace.
#[derive(Parser)]
#[command(name = "solorun")]
#[command(author = "SoloRun Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Running coach analytics CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an acute:chronic workload ratio
    Classify {
        /// Recent (acute) load, e.g. the last-7-day total
        #[arg(long)]
        recent: f64,

        /// Chronic load, e.g. a 28-day rolling average
        #[arg(long)]
        chronic: f64,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a session routine from an ACWR value
    Routine {
        /// Acute:chronic workload ratio
        #[arg(long)]
        acwr: f64,

        /// Runner level (beginner, intermediate, advanced)
        #[arg(long)]
        level: Option<String>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a recorded track (CSV or GPX) through the position tracker
    Track {
        /// Input file path
        #[arg(short, long)]
        file: PathBuf,

        /// Elapsed session seconds (defaults to the span of the fix timestamps)
        #[arg(long)]
        elapsed: Option<f64>,

        /// Emit machine-readable JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or initialize the configuration file
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[derive(Tabled)]
struct StepRow {
    #[tabled(rename = "Phase")]
    phase: &'static str,
    #[tabled(rename = "Duration")]
    duration: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default()?,
    };

    let mut log_config = config.log.clone();
    if cli.verbose > 0 {
        log_config.level = match cli.verbose {
            1 => LogLevel::Info,
            2 => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
    }
    logging::init_logging(&log_config)?;

    match cli.command {
        Commands::Classify {
            recent,
            chronic,
            json,
        } => {
            let assessment = LoadRatioClassifier::classify(recent, chronic);

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                println!("{}", "Workload assessment".bold());
                println!("  Ratio:  {:.2}", assessment.ratio);
                println!("  Status: {}", colorize_status(assessment.status));
                println!("  {}", assessment.status.recommendation().dimmed());
            }
        }

        Commands::Routine { acwr, level, json } => {
            let level = match level {
                Some(name) => Some(RunnerLevel::from_str(&name)?),
                None => config.default_level,
            };
            let profile = level.map(UserProfile::with_level);
            let plan = RoutineGenerator::generate(acwr, profile.as_ref());

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", plan.kind.label().green().bold());
                println!(
                    "  Target pace: {}",
                    format_pace_secs(plan.target_pace_secs_per_km)
                );
                println!("  Duration:    {} min", plan.total_duration_secs / 60);
                println!("  Audio:       {}", plan.audio_program);

                let rows: Vec<StepRow> = plan
                    .steps
                    .iter()
                    .map(|step| StepRow {
                        phase: step.phase.as_str(),
                        duration: format_mmss(step.duration_secs),
                    })
                    .collect();
                println!("{}", Table::new(rows));
            }
        }

        Commands::Track {
            file,
            elapsed,
            json,
        } => {
            let fixes = ImportManager::new().import_file(&file)?;
            let mut tracker = PositionTracker::new();
            for (index, fix) in fixes.into_iter().enumerate() {
                tracker
                    .record_fix(fix)
                    .with_context(|| format!("Rejected fix #{} in {}", index + 1, file.display()))?;
            }

            let mut summary = tracker.summary();
            if let Some(elapsed_secs) = elapsed {
                summary.elapsed_seconds = elapsed_secs;
                summary.pace_min_per_km = tracker.pace_min_per_km(elapsed_secs);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", "Track summary".bold());
                println!("  Fixes:    {}", summary.fix_count);
                println!("  Distance: {:.2} km", summary.total_distance_km);
                println!("  Elapsed:  {}", format_mmss(summary.elapsed_seconds as u32));
                println!("  Pace:     {}", format_pace_min(summary.pace_min_per_km));
            }
        }

        Commands::Config { init } => {
            let path = AppConfig::config_path()?;
            if init && !path.exists() {
                AppConfig::default().save_to_file(&path)?;
                println!("{} {}", "✓ Wrote".green(), path.display());
            }
            println!("{} {}", "Config file:".bold(), path.display());
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

fn colorize_status(status: LoadStatus) -> ColoredString {
    let label = status.description();
    match status {
        LoadStatus::InsufficientData => label.cyan(),
        LoadStatus::LowLoadRisk => label.yellow(),
        LoadStatus::SweetSpot => label.green(),
        LoadStatus::HighLoadCaution => label.yellow().bold(),
        LoadStatus::InjuryRiskWarning => label.red().bold(),
    }
}

/// `390` -> `6'30"/km`
fn format_pace_secs(secs_per_km: u32) -> String {
    format!("{}'{:02}\"/km", secs_per_km / 60, secs_per_km % 60)
}

/// `6.5` -> `6'30"/km`; 0.0 means no usable pace yet
fn format_pace_min(min_per_km: f64) -> String {
    if min_per_km <= 0.0 {
        return "--".to_string();
    }
    let total_secs = (min_per_km * 60.0).round() as u32;
    format_pace_secs(total_secs)
}

/// `600` -> `10:00`
fn format_mmss(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
