// Device registry
//
// A tagged enumeration of the vendor's device-type codes plus a
// capability lookup, replacing repeated membership checks against
// literal code lists. The registry itself is rebuilt fresh from the
// basestation/camera listings on every run, never mutated incrementally.

use std::collections::HashMap;

use giga_api::{Basestation, Camera};

use crate::error::CoreError;

/// Device kind decoded from the vendor's short type codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Basestation,
    Door,
    Window,
    Motion,
    IndoorSiren,
    Plug,
    Button,
    Universal,
    Water,
    Camera,
    Unknown(String),
}

impl DeviceKind {
    /// Decode a vendor type code. Unknown codes are carried verbatim so
    /// future hardware still shows up in listings.
    pub fn from_code(code: &str) -> Self {
        match code {
            "bs01" => Self::Basestation,
            "ds01" | "ds02" => Self::Door,
            "ws02" => Self::Window,
            "ps01" | "ps02" => Self::Motion,
            "is01" => Self::IndoorSiren,
            "sp01" | "sp02" => Self::Plug,
            "bn01" => Self::Button,
            "um01" => Self::Universal,
            "wd01" => Self::Water,
            "yc01" | "camera" => Self::Camera,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Battery-bearing kinds. The indoor siren is mains-powered, the
    /// basestation and cameras are wired.
    pub fn has_battery(&self) -> bool {
        !matches!(self, Self::IndoorSiren | Self::Basestation | Self::Camera)
    }

    /// Kinds that report an open/closed position.
    pub fn has_position(&self) -> bool {
        matches!(self, Self::Door)
    }

    /// Display name used in listings and error messages.
    pub fn name(&self) -> &str {
        match self {
            Self::Basestation => "basestation",
            Self::Door => "door",
            Self::Window => "window",
            Self::Motion => "motion",
            Self::IndoorSiren => "siren",
            Self::Plug => "plug",
            Self::Button => "button",
            Self::Universal => "universal",
            Self::Water => "water",
            Self::Camera => "camera",
            Self::Unknown(code) => code,
        }
    }
}

/// One registered device with enough context to address it.
#[derive(Debug, Clone)]
pub struct DeviceRef {
    pub id: String,
    pub basestation_id: String,
    pub friendly_name: Option<String>,
}

/// Kind-to-devices mapping derived from the basestation and camera
/// listings of the current run.
#[derive(Debug, Default)]
pub struct Registry {
    devices: HashMap<DeviceKind, Vec<DeviceRef>>,
}

impl Registry {
    /// Build the registry from fresh listings.
    pub fn build(basestations: &[Basestation], cameras: &[Camera]) -> Self {
        let mut devices: HashMap<DeviceKind, Vec<DeviceRef>> = HashMap::new();

        for bs in basestations {
            devices.entry(DeviceKind::Basestation).or_default().push(DeviceRef {
                id: bs.id.clone(),
                basestation_id: bs.id.clone(),
                friendly_name: bs.friendly_name.clone(),
            });
            for sensor in &bs.sensors {
                devices
                    .entry(DeviceKind::from_code(&sensor.type_code))
                    .or_default()
                    .push(DeviceRef {
                        id: sensor.id.clone(),
                        basestation_id: bs.id.clone(),
                        friendly_name: sensor.friendly_name.clone(),
                    });
            }
        }

        for cam in cameras {
            devices.entry(DeviceKind::Camera).or_default().push(DeviceRef {
                id: cam.id.clone(),
                basestation_id: String::new(),
                friendly_name: cam.friendly_name.clone(),
            });
        }

        Self { devices }
    }

    /// All devices of a kind, empty when none are registered.
    pub fn of_kind(&self, kind: &DeviceKind) -> &[DeviceRef] {
        self.devices.get(kind).map_or(&[], Vec::as_slice)
    }

    /// The first device of a kind, failing when the class is absent.
    pub fn require(&self, kind: &DeviceKind) -> Result<&DeviceRef, CoreError> {
        self.of_kind(kind)
            .first()
            .ok_or_else(|| CoreError::NoSuchSensor { kind: kind.name().to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_basestation() -> Basestation {
        serde_json::from_value(serde_json::json!({
            "id": "F1A2B3",
            "friendly_name": "Home",
            "sensors": [
                { "id": "door1", "type": "ds02", "friendly_name": "Front Door" },
                { "id": "plug1", "type": "sp01", "friendly_name": "Lamp" },
                { "id": "siren1", "type": "is01" },
                { "id": "mystery1", "type": "zz99" }
            ]
        }))
        .expect("fixture")
    }

    #[test]
    fn capability_table() {
        assert!(DeviceKind::from_code("ds02").has_battery());
        assert!(DeviceKind::from_code("ds02").has_position());
        assert!(!DeviceKind::from_code("is01").has_battery());
        assert!(!DeviceKind::from_code("ps02").has_position());
        assert!(DeviceKind::from_code("zz99").has_battery());
    }

    #[test]
    fn registry_maps_kinds_to_devices() {
        let registry = Registry::build(&[fixture_basestation()], &[]);

        let doors = registry.of_kind(&DeviceKind::Door);
        assert_eq!(doors.len(), 1);
        assert_eq!(doors[0].id, "door1");
        assert_eq!(doors[0].basestation_id, "F1A2B3");

        let plug = registry.require(&DeviceKind::Plug).expect("plug present");
        assert_eq!(plug.id, "plug1");

        let unknown = registry.of_kind(&DeviceKind::Unknown("zz99".into()));
        assert_eq!(unknown.len(), 1);
    }

    #[test]
    fn missing_class_is_an_error() {
        let registry = Registry::build(&[fixture_basestation()], &[]);
        let err = registry.require(&DeviceKind::Water).expect_err("no water sensor");
        assert!(matches!(err, CoreError::NoSuchSensor { ref kind } if kind == "water"));
    }
}
