//! # tickseq CLI Module
//!
//! ## Available Commands
//!
//! - `intro` - Run the intro headless and print the hand-off timeline
//! - `classify` - Show which location lists contain a map
//! - `save init|show|warp|champion` - Manage a save block file

mod commands;

use crate::config::TickseqConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickseq_core::TickseqError;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// tickseq - frame-tick intro sequencer
///
/// Drives the copyright screen and flag scene one tick at a time and
/// classifies save locations into save-warp flags.
#[derive(Parser, Debug)]
#[command(name = "tickseq")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a tickseq.toml config file
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the intro headless until the title screen
    Intro {
        /// Start the copyright screen as re-entered from the title screen
        #[arg(short, long)]
        after_title: bool,

        /// Tick budget (overrides the config file)
        #[arg(short, long)]
        max_ticks: Option<u64>,

        /// Save file read by the boot hook
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Print the display event log
        #[arg(short, long)]
        events: bool,
    },

    /// Show which location lists contain a map
    Classify {
        /// Map group
        #[arg(short, long)]
        group: u8,

        /// Map number within the group
        #[arg(short, long)]
        num: u8,
    },

    /// Manage a save block file
    Save {
        #[command(subcommand)]
        action: SaveAction,
    },
}

/// Save block operations.
#[derive(Subcommand, Debug)]
pub enum SaveAction {
    /// Write a fresh save block
    Init {
        /// Save file path
        #[arg(short, long)]
        file: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print a save block
    Show {
        /// Save file path
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Move the save to a map and recompute the save-warp flags
    Warp {
        /// Save file path
        #[arg(short, long)]
        file: PathBuf,

        /// Map group
        #[arg(short, long)]
        group: u8,

        /// Map number within the group
        #[arg(short, long)]
        num: u8,
    },

    /// Set the champion save-warp bit
    Champion {
        /// Save file path
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), TickseqError> {
    let config = TickseqConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Intro {
            after_title,
            max_ticks,
            save,
            events,
        }) => cmd_intro(
            &config,
            json_mode,
            cli.verbose,
            after_title,
            max_ticks,
            save.as_deref(),
            events,
        ),
        Some(Commands::Classify { group, num }) => cmd_classify(&config, json_mode, group, num),
        Some(Commands::Save { action }) => match action {
            SaveAction::Init { file, force } => cmd_save_init(&file, json_mode, force),
            SaveAction::Show { file } => cmd_save_show(&config, &file, json_mode),
            SaveAction::Warp { file, group, num } => {
                cmd_save_warp(&config, &file, json_mode, group, num)
            }
            SaveAction::Champion { file } => cmd_save_champion(&config, &file, json_mode),
        },
        None => {
            // No subcommand - run the intro from boot
            cmd_intro(&config, json_mode, cli.verbose, false, None, None, false)
        }
    }
}
