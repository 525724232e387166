//! Shared helpers for command handlers.

use giga_core::{Notifier, Session};

use crate::cli::GlobalOpts;
use crate::config::Resolved;
use crate::error::CliError;

/// Send a Pushbullet note after a state-changing command. No-op without
/// a token or in quiet mode; failures are warnings inside the notifier.
pub async fn notify(resolved: &Resolved, global: &GlobalOpts, message: &str) {
    if global.quiet {
        return;
    }
    let Some(ref token) = resolved.pbtoken else {
        return;
    };
    match Notifier::new(token.clone()) {
        Ok(notifier) => {
            if notifier.push_note("Gigaset Elements", message).await {
                eprintln!("PushBullet notification sent");
            }
        }
        Err(e) => tracing::warn!("notifier unavailable: {e}"),
    }
}

/// Resolve a camera id: the explicit argument, or the first registered
/// camera.
pub async fn resolve_camera(session: &Session, id: Option<String>) -> Result<String, CliError> {
    if let Some(id) = id {
        return Ok(id);
    }
    let cameras = session.client().list_cameras().await?;
    cameras
        .first()
        .map(|c| c.id.clone())
        .ok_or_else(|| CliError::NotFound { resource: "camera".into() })
}
