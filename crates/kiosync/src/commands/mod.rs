//! Subcommand handlers.

mod control;
mod run;
mod status;

use std::sync::Arc;

use kiosync_core::{Controller, MemoryRegistry};

use crate::cli::{Command, GlobalOpts};
use crate::config;
use crate::error::CliError;

/// Resolve config, build a controller, and route to the handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let tablet = config::resolve(global)?;
    let registry = Arc::new(MemoryRegistry::with_all_slots());
    let controller = Controller::new(&tablet, registry)?;

    match command {
        Command::Run => run::handle(controller).await,
        Command::Status => status::handle(controller, &tablet).await,
        command => control::handle(command, controller).await,
    }
}
