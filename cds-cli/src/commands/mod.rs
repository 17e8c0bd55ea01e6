//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod action;

pub use action::ActionCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Action management
    Action {
        #[command(subcommand)]
        command: ActionCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Action { command } => action::handle_action_command(command, config).await,
    }
}
