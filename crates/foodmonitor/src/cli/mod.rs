//! Command-line interface for foodmonitor.
//!
//! This module provides the CLI structure for the `foodmon` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ConfigCommand, DietAddArgs, DietCommand, FoodAddArgs, FoodCommand, FormatArg, HygieneCommand,
    OutputFormat, ZoneCommand, ZoneSetArgs,
};

use crate::logging::Verbosity;

/// foodmon - Keep track of the kitchen
///
/// Food inventory with expiry tracking, storage temperature zones, a hygiene
/// checklist, and a daily diet log.
#[derive(Debug, Parser)]
#[command(name = "foodmon")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the dashboard overview
    Dashboard(FormatArg),

    /// Manage the food inventory
    #[command(subcommand)]
    Food(FoodCommand),

    /// Monitor temperature zones
    #[command(subcommand)]
    Zone(ZoneCommand),

    /// Work through the hygiene checklist
    #[command(subcommand)]
    Hygiene(HygieneCommand),

    /// Track meals and nutrition
    #[command(subcommand)]
    Diet(DietCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Delete all stored data so the sample data returns
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
