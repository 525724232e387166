//! Command dispatch: bridges CLI args -> core calls -> output formatting.

pub mod camera;
pub mod cron;
pub mod endnodes;
pub mod events;
pub mod mode;
pub mod monitor;
pub mod notifications;
pub mod rules;
pub mod sensors;
pub mod status;
pub mod util;

use giga_core::{DeviceKind, Session};

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Dispatch a cloud-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    session: &mut Session,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Status => status::handle(session, global).await,
        Command::Mode(args) => mode::handle(session, args, resolved, global).await,
        Command::Sensors => sensors::handle(session, global).await,
        Command::Cameras => camera::list(session, global).await,
        Command::Camera(args) => camera::handle(session, args, global).await,
        Command::Siren { state } => {
            endnodes::handle(session, DeviceKind::IndoorSiren, state, global).await
        }
        Command::Plug { state } => endnodes::handle(session, DeviceKind::Plug, state, global).await,
        Command::Privacy { state } => camera::privacy(session, state, global).await,
        Command::Events(args) => events::handle(session, args, global).await,
        Command::Monitor(args) => monitor::handle(session, args, resolved, global).await,
        Command::Rules => rules::handle(session, global).await,
        Command::Notifications => notifications::handle(session, global).await,
        // Cron and Completions are handled before dispatch
        Command::Cron(_) | Command::Completions(_) => unreachable!(),
    }
}
