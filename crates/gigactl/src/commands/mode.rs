//! Mode switching.

use giga_api::EventsQuery;
use giga_core::Session;

use crate::cli::{GlobalOpts, ModeArgs};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn handle(
    session: &Session,
    args: ModeArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let new_mode = args
        .mode
        .or(resolved.default_mode)
        .ok_or_else(|| CliError::Validation {
            field: "mode".into(),
            reason: "no mode given; pass one or set modus in the configuration file".into(),
        })?
        .as_str();

    let stations = session.client().list_basestations().await?;
    let bs = stations
        .first()
        .ok_or_else(|| CliError::NotFound { resource: "basestation".into() })?;

    let old_mode = bs
        .intrusion_settings
        .as_ref()
        .and_then(|s| s.active_mode.as_deref())
        .unwrap_or("unknown")
        .to_string();

    // Single-event fetch carries the current home state.
    let home_state = session
        .client()
        .list_events(&EventsQuery { limit: Some(1), ..Default::default() })
        .await?
        .home_state
        .unwrap_or_else(|| "unknown".into());

    match args.delay {
        Some(delay) => {
            session
                .client()
                .set_delayed_mode(&bs.id, new_mode, delay)
                .await?;
        }
        None => session.client().set_mode(&bs.id, new_mode).await?,
    }

    let color = output::should_color(&global.color);
    if !global.quiet {
        println!("{}", transition_message(&home_state, &old_mode, new_mode, color));
    }

    util::notify(
        resolved,
        global,
        &transition_message(&home_state, &old_mode, new_mode, false),
    )
    .await;
    Ok(())
}

fn transition_message(home_state: &str, old: &str, new: &str, color: bool) -> String {
    format!(
        "Status {} | Modus set from {} to {}",
        output::state(home_state, color),
        output::state(old, color),
        output::state(new, color),
    )
}
