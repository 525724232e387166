//! Live event monitor.
//!
//! Polls the events endpoint on a moving cursor, printing each event
//! once. With `--bridge`, events and mode/health changes are forwarded
//! to the configured home-automation server; with `--restart`, transport
//! failures reconnect and resume instead of exiting.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use giga_api::Event;
use giga_core::{Bridge, HEALTH_CHECK_INTERVAL, Monitor, POLL_INTERVAL, Session};

use crate::cli::{GlobalOpts, MonitorArgs};
use crate::config::Resolved;
use crate::error::CliError;

pub async fn handle(
    session: &mut Session,
    args: MonitorArgs,
    resolved: &Resolved,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let bridge = if args.bridge {
        let config = resolved.bridge.clone().ok_or(CliError::NoBridge)?;
        Some(Bridge::new(config)?)
    } else {
        None
    };

    loop {
        match run_loop(session, &args, bridge.as_ref(), global).await {
            Ok(()) => return Ok(()),
            Err(err) if args.restart && is_transient(&err) => {
                eprintln!(
                    "Monitor interrupted ({err}); restarting in {} second(s)",
                    args.restart_delay
                );
                tokio::time::sleep(Duration::from_secs(args.restart_delay)).await;
                let (fresh, _greeting) = Session::connect(resolved.session.clone()).await?;
                *session = fresh;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Failures worth a reconnect; everything else is a hard error even
/// under `--restart`. Server-class (5xx) statuses count as transient,
/// a rejected request does not.
fn is_transient(err: &CliError) -> bool {
    match err {
        CliError::ConnectionFailed { .. } | CliError::Timeout => true,
        CliError::ApiError { status: Some(s), .. } => *s >= 500,
        _ => false,
    }
}

/// Bridge-side state tracked between health re-checks.
struct BridgeState<'a> {
    bridge: &'a Bridge,
    station_id: String,
    last_health: String,
    last_mode: String,
    last_check: Instant,
}

impl BridgeState<'_> {
    /// Push current mode and health once at startup so the bridge
    /// devices reflect reality before the first change.
    async fn init<'a>(
        bridge: &'a Bridge,
        session: &Session,
    ) -> Result<BridgeState<'a>, CliError> {
        let (station_id, mode) = current_mode(session).await?;
        let health = current_health(session).await?;

        bridge.push_alert(&station_id, &health).await?;
        bridge.push_alert(&station_id, &mode).await?;

        Ok(BridgeState {
            bridge,
            station_id,
            last_health: health,
            last_mode: mode,
            last_check: Instant::now(),
        })
    }

    /// Re-check mode and health, forwarding only changes.
    async fn recheck(&mut self, session: &Session) -> Result<(), CliError> {
        if self.last_check.elapsed() < HEALTH_CHECK_INTERVAL {
            return Ok(());
        }
        self.last_check = Instant::now();

        let health = current_health(session).await?;
        if health != self.last_health {
            self.bridge.push_alert(&self.station_id, &health).await?;
            self.last_health = health;
        }

        let (_, mode) = current_mode(session).await?;
        if mode != self.last_mode {
            self.bridge.push_alert(&self.station_id, &mode).await?;
            self.last_mode = mode;
        }
        Ok(())
    }
}

async fn current_mode(session: &Session) -> Result<(String, String), CliError> {
    let stations = session.client().list_basestations().await?;
    let bs = stations
        .first()
        .ok_or_else(|| CliError::NotFound { resource: "basestation".into() })?;
    let mode = bs
        .intrusion_settings
        .as_ref()
        .and_then(|s| s.active_mode.as_deref())
        .unwrap_or("unknown")
        .to_string();
    Ok((bs.id.clone(), mode))
}

async fn current_health(session: &Session) -> Result<String, CliError> {
    let health = session.client().system_health().await?;
    Ok(health.system_health.unwrap_or_else(|| "unknown".into()))
}

async fn run_loop(
    session: &mut Session,
    args: &MonitorArgs,
    bridge: Option<&Bridge>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut bridge_state = match bridge {
        Some(bridge) => Some(BridgeState::init(bridge, session).await?),
        None => None,
    };

    let mut monitor = Monitor::starting_now(args.group.map(|g| g.as_str().to_string()));
    if !global.quiet {
        println!("Monitoring events, press Ctrl-C to abort");
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.client().health_ping().await;
                if let Some(state) = &bridge_state {
                    state.bridge.halt_ping(&state.station_id).await;
                }
                if !global.quiet {
                    println!("Monitor halted");
                }
                return Ok(());
            }
            result = iteration(session, &mut monitor, bridge_state.as_mut(), global) => result?,
        }
    }
}

/// One poll cycle: refresh auth if stale, re-check bridge state, fetch
/// and deliver new events, then sleep.
async fn iteration(
    session: &mut Session,
    monitor: &mut Monitor,
    mut bridge_state: Option<&mut BridgeState<'_>>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    session.ensure_fresh().await?;

    if let Some(state) = bridge_state.as_deref_mut() {
        state.recheck(session).await?;
    }

    let events = monitor.poll_once(session.client()).await?;
    for event in &events {
        if !global.quiet {
            println!("{}", format_event(event));
        }
        if let Some(state) = bridge_state.as_deref_mut() {
            state.bridge.forward_event(event).await?;
        }
        monitor.advance(event);
    }

    tokio::time::sleep(POLL_INTERVAL).await;
    Ok(())
}

fn format_event(event: &Event) -> String {
    let time = DateTime::<Utc>::from_timestamp_millis(event.ts)
        .map(|dt| dt.format("%m/%d/%Y %H:%M:%S").to_string())
        .unwrap_or_else(|| event.ts.to_string());
    format!(
        "{time} {} {}",
        event.event_type.as_deref().unwrap_or("unknown"),
        event
            .origin
            .as_ref()
            .and_then(|o| o.friendly_name.as_deref())
            .unwrap_or("system"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_errors_qualify_for_restart() {
        assert!(is_transient(&CliError::ConnectionFailed { reason: "reset".into() }));
        assert!(is_transient(&CliError::Timeout));
        assert!(is_transient(&CliError::ApiError {
            message: "HTTP 503: maintenance".into(),
            status: Some(503),
        }));
        assert!(!is_transient(&CliError::ApiError {
            message: "HTTP 400: bad payload".into(),
            status: Some(400),
        }));
        assert!(!is_transient(&CliError::NoCredentials));
        assert!(!is_transient(&CliError::AuthFailed { message: "denied".into() }));
    }

    #[test]
    fn event_lines_carry_time_type_and_source() {
        let event: Event = serde_json::from_value(serde_json::json!({
            "id": "e1",
            "ts": "1469204461573",
            "type": "open",
            "o": { "id": "d1", "type": "ds02", "friendly_name": "Front Door" }
        }))
        .expect("event fixture");
        let line = format_event(&event);
        assert!(line.contains("open"));
        assert!(line.contains("Front Door"));
        assert!(line.contains("07/22/2016"));
    }
}
