use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use rust_decimal::Decimal;
use std::path::PathBuf;

use trainload::acwr::{self, format_chronic, format_ratio};
use trainload::config::AppConfig;
use trainload::dashboard::DashboardEngine;
use trainload::error::{ErrorSeverity, TrainLoadError};
use trainload::import::{self, ImportManager};
use trainload::logging::{init_logging, LogLevel};
use trainload::models::ChronicMethod;
use trainload::report;
use trainload::validation::{end_time, validate_session};

/// TrainLoad - Workload metrics for sports training
///
/// Computes acute and chronic load, the acute:chronic workload ratio, weekly
/// plan completion and readiness, and turns them into recommendations.
#[derive(Parser)]
#[command(name = "trainload")]
#[command(author = "TrainLoad Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Training workload dashboard CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the weekly dashboard from an input bundle
    Report {
        /// Dashboard input file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Extra activities to merge in (CSV or JSON)
        #[arg(short, long)]
        activities: Option<PathBuf>,

        /// Chronic baseline method (trailing_avg, ewma)
        #[arg(short, long)]
        method: Option<ChronicMethod>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Classify an acute:chronic workload ratio
    Classify {
        /// Acute load (sum of the last 7 days)
        #[arg(short, long)]
        acute: Decimal,

        /// Chronic baseline
        #[arg(short, long)]
        chronic: Decimal,
    },

    /// Validate a session draft
    Validate {
        /// Session draft file (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show or initialize the configuration
    Config {
        /// Print the effective configuration
        #[arg(short, long)]
        show: bool,

        /// Write a default configuration file
        #[arg(short, long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        match err.downcast_ref::<TrainLoadError>() {
            Some(app_err) => {
                match app_err.severity() {
                    ErrorSeverity::Warning | ErrorSeverity::Info => {
                        tracing::warn!(error = %app_err, "Command failed")
                    }
                    ErrorSeverity::Error | ErrorSeverity::Critical => {
                        tracing::error!(error = %app_err, "Command failed")
                    }
                }
                eprintln!("{} {}", "Error:".red().bold(), app_err.user_message());
            }
            None => eprintln!("{} {:#}", "Error:".red().bold(), err),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone();
    let config = match &config_path {
        Some(path) => AppConfig::load_from_file(path)?,
        None => AppConfig::load_or_default()?,
    };

    let mut log_config = config.logging.clone();
    log_config.level = LogLevel::from_verbosity(cli.verbose, log_config.level);
    init_logging(&log_config).context("Failed to initialize logging")?;

    if cli.verbose > 0 {
        eprintln!(
            "{}",
            format!("Log level: {}", log_config.level.to_filter()).dimmed()
        );
    }

    match cli.command {
        Commands::Report {
            input,
            activities,
            method,
            format,
        } => {
            let mut inputs = import::load_dashboard_inputs(&input)?;

            if let Some(path) = activities {
                let extra = ImportManager::new().import_file(&path)?;
                tracing::info!(count = extra.len(), "Merged extra activities");
                inputs.activities.extend(extra);
            }
            if method.is_some() {
                inputs.method = method;
            }

            let metrics = DashboardEngine::from_config(&config).compute(&inputs);

            match format {
                ReportFormat::Text => print!("{}", report::render_text(&inputs, &metrics)?),
                ReportFormat::Json => println!("{}", report::to_json(&metrics)?),
            }
        }

        Commands::Classify { acute, chronic } => {
            let classification = acwr::classify_ratio(acute, chronic);
            println!(
                "Ratio: {} ({})",
                format_ratio(classification.ratio).bold(),
                classification.label
            );
            println!("Chronic: {}", format_chronic(chronic));
            if !acwr::is_chronic_reliable(chronic) {
                println!(
                    "{}",
                    "No training base yet: the ratio uses a floor of 1".yellow()
                );
            }
        }

        Commands::Validate { input } => {
            let draft = import::load_session_draft(&input)?;
            let errors = validate_session(&draft);
            if !errors.is_empty() {
                return Err(TrainLoadError::Validation(errors).into());
            }

            println!("{}", "✓ Session is valid".green());
            if let (Some(start), Some(minutes)) = (&draft.start_time, draft.duration_min) {
                let minutes = u32::try_from(minutes).context("Duration is too long")?;
                println!("  Ends at: {}", end_time(start, minutes)?);
            }
        }

        Commands::Config { show, init, force } => {
            if init {
                let path = config_path.unwrap_or_else(AppConfig::default_config_path);
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                AppConfig::default().save_to_file(&path)?;
                println!(
                    "{}",
                    format!("✓ Wrote default configuration to {}", path.display()).green()
                );
            }
            if show || !init {
                println!(
                    "{}",
                    toml::to_string_pretty(&config)
                        .context("Failed to serialize configuration")?
                );
            }
        }
    }

    Ok(())
}
