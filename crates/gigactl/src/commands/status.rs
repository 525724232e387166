//! System status: overall health plus the active mode.

use giga_core::Session;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let health = session.client().system_health().await?;
    let stations = session.client().list_basestations().await?;

    if let OutputFormat::Json = global.output {
        output::print_output(
            &output::render_json(&serde_json::json!({
                "health": health,
                "basestations": stations,
            })),
            global.quiet,
        );
        return Ok(());
    }

    let color = output::should_color(&global.color);
    let system = health.system_health.as_deref().unwrap_or("unknown");
    let suffix = health.status_suffix();

    for bs in &stations {
        let mode = bs
            .intrusion_settings
            .as_ref()
            .and_then(|s| s.active_mode.as_deref())
            .unwrap_or("unknown");
        if !global.quiet {
            println!(
                "System status {}{} | Modus {}",
                output::state(system, color),
                suffix,
                output::state(mode, color),
            );
        }
    }
    Ok(())
}
