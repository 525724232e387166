//! Basestation and sensor listing.

use giga_api::{Basestation, Sensor};
use giga_core::{DeviceKind, Session};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let stations = session.client().list_basestations().await?;

    if let OutputFormat::Json = global.output {
        output::print_output(&output::render_json(&stations), global.quiet);
        return Ok(());
    }

    let color = output::should_color(&global.color);
    for bs in &stations {
        if !global.quiet {
            println!("{}", station_line(bs, color));
        }
        for sensor in &bs.sensors {
            if !global.quiet {
                println!("{}", sensor_line(sensor, color));
            }
        }
    }
    Ok(())
}

fn station_line(bs: &Basestation, color: bool) -> String {
    format!(
        "{} {} | firmware {}",
        bs.friendly_name.as_deref().unwrap_or(&bs.id),
        output::state(bs.status.as_deref().unwrap_or("unknown"), color),
        output::state(bs.firmware_status.as_deref().unwrap_or("unknown"), color),
    )
}

fn sensor_line(sensor: &Sensor, color: bool) -> String {
    let kind = DeviceKind::from_code(&sensor.type_code);
    let mut line = format!(
        "{} {} | firmware {}",
        sensor.friendly_name.as_deref().unwrap_or(&sensor.id),
        output::state(sensor.status.as_deref().unwrap_or("unknown"), color),
        output::state(sensor.firmware_status.as_deref().unwrap_or("unknown"), color),
    );
    if kind.has_battery() {
        let battery = sensor
            .battery
            .as_ref()
            .and_then(|b| b.state.as_deref())
            .unwrap_or("unknown");
        line.push_str(&format!(" | battery {}", output::state(battery, color)));
    }
    if kind.has_position() {
        let position = sensor.position_status.as_deref().unwrap_or("unknown");
        line.push_str(&format!(" | position {}", output::state(position, color)));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Basestation {
        serde_json::from_value(serde_json::json!({
            "id": "F1A2B3",
            "friendly_name": "Home",
            "status": "online",
            "firmware_status": "up_to_date",
            "sensors": [{
                "id": "door1",
                "type": "ds02",
                "friendly_name": "Front Door",
                "status": "online",
                "firmware_status": "up_to_date",
                "battery": { "state": "ok" },
                "position_status": "closed"
            }, {
                "id": "siren1",
                "type": "is01",
                "friendly_name": "Siren",
                "status": "online",
                "firmware_status": "up_to_date"
            }]
        }))
        .expect("fixture")
    }

    #[test]
    fn station_line_uppercases_states() {
        let line = station_line(&fixture(), false);
        assert!(line.contains("Home"));
        assert!(line.contains("ONLINE"));
        assert!(line.contains("firmware UP_TO_DATE"));
    }

    #[test]
    fn door_sensor_line_includes_battery_and_position() {
        let line = sensor_line(&fixture().sensors[0], false);
        assert!(line.contains("Front Door"));
        assert!(line.contains("ONLINE"));
        assert!(line.contains("battery OK"));
        assert!(line.contains("position CLOSED"));
    }

    #[test]
    fn siren_line_has_no_battery_or_position() {
        let line = sensor_line(&fixture().sensors[1], false);
        assert!(line.contains("Siren"));
        assert!(!line.contains("battery"));
        assert!(!line.contains("position"));
    }
}
