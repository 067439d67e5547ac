//! One-shot remote-control subcommands.

use kiosync_core::{Action, Controller, Slot};

use crate::cli::Command;
use crate::error::CliError;

pub async fn handle(command: Command, controller: Controller) -> Result<(), CliError> {
    let (slot, action, done) = match command {
        Command::Screen { state } => (Slot::Screen, state.into(), "screen switched"),
        Command::Screensaver { state } => (Slot::Screensaver, state.into(), "screensaver set"),
        Command::Motion { state } => (Slot::MotionSensor, state.into(), "motion detection set"),
        Command::Reload => (Slot::LoadStartUrl, Action::TurnOn, "reload requested"),
        Command::Brightness { level } => (
            Slot::Brightness,
            Action::SetLevel(i64::from(level)),
            "brightness set",
        ),
        // Run and Status are routed before we get here.
        Command::Run | Command::Status => return Ok(()),
    };

    controller.execute(slot, action).await?;
    println!("{done}");
    Ok(())
}
