//! Siren and smart-plug switching via endnode commands.

use giga_core::{DeviceKind, Registry, Session};

use crate::cli::{GlobalOpts, Switch};
use crate::error::CliError;
use crate::output;

pub async fn handle(
    session: &Session,
    kind: DeviceKind,
    state: Switch,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let stations = session.client().list_basestations().await?;
    let registry = Registry::build(&stations, &[]);
    let device = registry.require(&kind)?;

    session
        .client()
        .endnode_command(&device.basestation_id, &device.id, state.as_str())
        .await?;

    let color = output::should_color(&global.color);
    if !global.quiet {
        println!(
            "{} turned {}",
            device.friendly_name.as_deref().unwrap_or(&device.id),
            output::state(state.as_str(), color),
        );
    }
    Ok(())
}
