//! Camera listing and operations: stream URIs, recording, snapshots,
//! and the privacy toggle.

use giga_core::Session;

use crate::cli::{CameraArgs, CameraCommand, GlobalOpts, OutputFormat, Switch};
use crate::error::CliError;
use crate::output;

use super::util;

/// `cameras`: status and settings of every registered camera.
pub async fn list(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let cameras = session.client().list_cameras().await?;

    if let OutputFormat::Json = global.output {
        output::print_output(&output::render_json(&cameras), global.quiet);
        return Ok(());
    }

    let color = output::should_color(&global.color);
    for cam in &cameras {
        let settings = cam.settings.clone().unwrap_or_default();
        let motion = cam
            .motion_detection
            .as_ref()
            .and_then(|m| m.status.as_deref())
            .unwrap_or("unknown");
        if !global.quiet {
            println!(
                "{} {} | firmware {} | quality {} | nightmode {} | mic {} | motion detection {} | connection {}",
                cam.friendly_name.as_deref().unwrap_or(&cam.id),
                output::state(cam.status.as_deref().unwrap_or("unknown"), color),
                output::state(cam.firmware_status.as_deref().unwrap_or("unknown"), color),
                output::state(settings.quality.as_deref().unwrap_or("unknown"), color),
                output::state(settings.nightmode.as_deref().unwrap_or("unknown"), color),
                output::state(settings.mic.as_deref().unwrap_or("unknown"), color),
                output::state(motion, color),
                output::state(settings.connection.as_deref().unwrap_or("unknown"), color),
            );
        }
    }
    Ok(())
}

/// `camera <stream|record|snapshot>`.
pub async fn handle(
    session: &Session,
    args: CameraArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CameraCommand::Stream { id } => {
            let id = util::resolve_camera(session, id).await?;
            let liveview = session.client().liveview(&id).await?;
            if let OutputFormat::Json = global.output {
                output::print_output(&output::render_json(&liveview.uri), global.quiet);
                return Ok(());
            }
            for (scheme, uri) in &liveview.uri {
                if !global.quiet {
                    println!("{scheme} {uri}");
                }
            }
            Ok(())
        }
        CameraCommand::Record { action, id } => {
            let id = util::resolve_camera(session, id).await?;
            session.client().recording_command(&id, action.as_str()).await?;
            if !global.quiet {
                println!("Camera {id} | recording {}", action.as_str());
            }
            Ok(())
        }
        CameraCommand::Snapshot { id, file } => {
            let id = util::resolve_camera(session, id).await?;
            let bytes = session.client().snapshot(&id).await?;
            std::fs::write(&file, &bytes)?;
            if !global.quiet {
                println!("Snapshot saved as {}", file.display());
            }
            Ok(())
        }
    }
}

/// `privacy <on|off>`: toggles privacy mode on the first camera.
pub async fn privacy(
    session: &Session,
    state: Switch,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let id = util::resolve_camera(session, None).await?;
    session
        .client()
        .set_privacy(&id, matches!(state, Switch::On))
        .await?;
    let color = output::should_color(&global.color);
    if !global.quiet {
        println!("Camera {id} | privacy {}", output::state(state.as_str(), color));
    }
    Ok(())
}
