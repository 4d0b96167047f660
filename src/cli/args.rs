//! Command-line argument parsing for the envios driver client
//!
//! The CLI stands in for the driver app screens: `login`/`logout` for the
//! credential form, `list` for the filtered shipment list and `update` for the
//! per-shipment status buttons.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{StatusCatalog, StatusFilter};

/// Envios - shipment list and status updates for delivery drivers
#[derive(Parser, Debug)]
#[command(
    name = "envios",
    version,
    about = "List shipments and update their delivery status",
    long_about = "Driver client for the Khelcom shipments backend.
Lists shipments from the WordPress REST API and moves them between the canonical bilingual delivery states."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Store backend credentials and check them against the backend
    Login(LoginArgs),

    /// Remove stored credentials
    Logout,

    /// Show which credentials are stored
    Status,

    /// List shipments, optionally filtered by status
    List(ListArgs),

    /// Move a shipment to another status
    Update(UpdateArgs),

    /// Show the canonical delivery states
    Statuses,
}

/// Arguments for the login command
#[derive(Args, Debug, Clone)]
pub struct LoginArgs {
    /// Site URL (https://...)
    #[arg(long)]
    pub url: Option<String>,

    /// WordPress username
    #[arg(short, long)]
    pub username: Option<String>,

    /// Save without checking the credentials against the backend
    #[arg(long)]
    pub no_verify: bool,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Status to show: a canonical label, its number, or "Todos"
    #[arg(short, long, default_value = "Todos")]
    pub status: String,
}

impl ListArgs {
    /// The filter this selection stands for
    pub fn filter(&self) -> StatusFilter {
        match resolve_status(&self.status) {
            Some(label) => StatusFilter::Status(label.to_string()),
            None => StatusFilter::parse(&self.status),
        }
    }
}

/// Arguments for the update command
#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    /// Shipment identifier
    pub id: i64,

    /// New status: a canonical label or its number from `envios statuses`
    pub status: String,
}

impl UpdateArgs {
    /// Validate the requested status and return its canonical label
    pub fn validate(&self) -> Result<&'static str, String> {
        resolve_status(&self.status).ok_or_else(|| {
            format!(
                "Unknown status '{}'. Use a number from 1 to {} or one of: {}",
                self.status,
                StatusCatalog.len(),
                StatusCatalog.labels().join(", ")
            )
        })
    }
}

/// Map a label or 1-based index onto the canonical label
pub fn resolve_status(input: &str) -> Option<&'static str> {
    match input.trim().parse::<usize>() {
        Ok(index) => StatusCatalog.by_index(index),
        Err(_) => StatusCatalog.find(input),
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level implied by the verbosity flags
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }

    /// Whether any verbosity flag was given
    pub fn has_verbosity_flag(&self) -> bool {
        self.global.quiet || self.global.verbose || self.global.very_verbose
    }
}
