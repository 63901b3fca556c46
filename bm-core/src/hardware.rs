//! The hardware node contract
//!
//! Every node in the tree implements `Hardware`. Node kinds form a closed set
//! (`HardwareType`); each concrete node type owns its kind-specific state and
//! its children directly. Parents are referenced by `Identifier`, never by
//! pointer, so ownership is strictly top-down.
//!
//! # Lifecycle
//!
//! Nodes are built once during detection and closed once at shutdown.
//! Calling `update` or `report` after `close` is a precondition violation: the
//! node will report whatever state it had, but sessions it owned are gone.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::identity::Identifier;
use crate::naming::NameSetting;
use crate::visitor::{accept, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum HardwareType {
    Mainboard,
    SuperIO,
}

impl fmt::Display for HardwareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mainboard => write!(f, "Mainboard"),
            Self::SuperIO => write!(f, "SuperIO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SensorType {
    Voltage,
    Temperature,
    Fan,
    Control,
}

impl SensorType {
    /// Identifier segment for sensors of this type
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Voltage => "voltage",
            Self::Temperature => "temperature",
            Self::Fan => "fan",
            Self::Control => "control",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Voltage => "V",
            Self::Temperature => "°C",
            Self::Fan => "RPM",
            Self::Control => "%",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Voltage => write!(f, "Voltage"),
            Self::Temperature => write!(f, "Temperature"),
            Self::Fan => write!(f, "Fan"),
            Self::Control => write!(f, "Control"),
        }
    }
}

/// One measured channel on a node
#[derive(Debug, Clone)]
pub struct Sensor {
    identifier: Identifier,
    sensor_type: SensorType,
    index: usize,
    name: NameSetting,
    value: Option<f32>,
    min: Option<f32>,
    max: Option<f32>,
}

impl Sensor {
    pub fn new(hardware: &Identifier, sensor_type: SensorType, index: usize, name: NameSetting) -> Self {
        Self {
            identifier: Self::identifier_for(hardware, sensor_type, index),
            sensor_type,
            index,
            name,
            value: None,
            min: None,
            max: None,
        }
    }

    /// `<hardware>/<type>/<index>`
    pub fn identifier_for(hardware: &Identifier, sensor_type: SensorType, index: usize) -> Identifier {
        Identifier::make(sensor_type.segment(), Some(hardware), Some(index))
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        self.name.get()
    }

    pub fn set_name(&mut self, value: Option<&str>) -> Result<()> {
        self.name.set(value)
    }

    pub fn value(&self) -> Option<f32> {
        self.value
    }

    pub fn min(&self) -> Option<f32> {
        self.min
    }

    pub fn max(&self) -> Option<f32> {
        self.max
    }

    /// Record a new reading and widen min/max
    pub fn record(&mut self, value: Option<f32>) {
        self.value = value;
        if let Some(v) = value {
            self.min = Some(self.min.map_or(v, |m| m.min(v)));
            self.max = Some(self.max.map_or(v, |m| m.max(v)));
        }
    }

    /// Value with unit, or "-" when nothing has been read
    pub fn format_value(&self) -> String {
        match self.value {
            Some(v) => match self.sensor_type {
                SensorType::Voltage => format!("{:.3} {}", v, self.sensor_type.unit()),
                SensorType::Fan => format!("{:.0} {}", v, self.sensor_type.unit()),
                _ => format!("{:.1} {}", v, self.sensor_type.unit()),
            },
            None => "-".to_string(),
        }
    }
}

/// Uniform contract of every tree node
pub trait Hardware {
    fn identifier(&self) -> &Identifier;

    fn name(&self) -> &str;

    /// Set the display name. `None` or empty resets to the computed default.
    fn set_name(&mut self, value: Option<&str>) -> Result<()>;

    fn hardware_type(&self) -> HardwareType;

    /// Identifier of the owning node, `None` for the root
    fn parent(&self) -> Option<&Identifier>;

    /// Owned children in detection order
    fn sub_hardware(&self) -> Vec<&dyn Hardware>;

    fn sub_hardware_mut(&mut self) -> Vec<&mut dyn Hardware>;

    fn sensors(&self) -> &[Sensor];

    fn sensors_mut(&mut self) -> &mut [Sensor];

    /// This node's own report section. Never includes children.
    fn report(&self) -> String;

    /// Refresh sensor values. Never changes the shape of the tree.
    fn update(&mut self);

    /// Dispatch `visitor` on every direct child, in order. Does not visit self.
    fn traverse(&self, visitor: &mut dyn Visitor) {
        for child in self.sub_hardware() {
            accept(child, visitor);
        }
    }

    /// Release owned sessions, then close every child. Safe to repeat.
    fn close(&mut self);
}

/// Common first lines of a node report
pub fn report_header(hardware: &dyn Hardware) -> String {
    let mut r = format!("{}\n\n", hardware.hardware_type());
    r.push_str(&format!("Name: {}\n", hardware.name()));
    r.push_str(&format!("Identifier: {}\n", hardware.identifier()));
    if let Some(parent) = hardware.parent() {
        r.push_str(&format!("Parent: {}\n", parent));
    }
    r.push('\n');
    r
}

impl fmt::Debug for dyn Hardware + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hardware")
            .field("identifier", &self.identifier().to_string())
            .field("name", &self.name())
            .field("type", &self.hardware_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MemorySettings;
    use std::sync::Arc;

    fn sensor(sensor_type: SensorType) -> Sensor {
        let hw: Identifier = "/lpc/nct6798d/0".parse().unwrap();
        let id = Sensor::identifier_for(&hw, sensor_type, 2);
        let name = NameSetting::load(Arc::new(MemorySettings::new()), &id, "CPU");
        Sensor::new(&hw, sensor_type, 2, name)
    }

    #[test]
    fn test_sensor_identifier() {
        let s = sensor(SensorType::Temperature);
        assert_eq!(s.identifier().to_string(), "/lpc/nct6798d/0/temperature/2");
    }

    #[test]
    fn test_record_tracks_min_max() {
        let mut s = sensor(SensorType::Temperature);
        assert_eq!(s.format_value(), "-");
        s.record(Some(40.0));
        s.record(Some(55.5));
        s.record(None);
        s.record(Some(38.0));
        assert_eq!(s.min(), Some(38.0));
        assert_eq!(s.max(), Some(55.5));
        assert_eq!(s.format_value(), "38.0 °C");
    }

    #[test]
    fn test_voltage_format() {
        let mut s = sensor(SensorType::Voltage);
        s.record(Some(1.2));
        assert_eq!(s.format_value(), "1.200 V");
    }
}
