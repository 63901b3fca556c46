//! Super-I/O hardware nodes
//!
//! One node per detected chip. The node owns the chip handle for the rest of
//! the run and exposes its channels as named sensors.

mod labels;

pub use labels::{board_labels, sensor_label, BoardLabels};

use std::sync::Arc;

use tracing::debug;

use crate::constants::ids;
use crate::error::Result;
use crate::hardware::{report_header, Hardware, HardwareType, Sensor};
use crate::identification::{Manufacturer, Model};
use crate::identity::Identifier;
use crate::lpc::{ChipHandle, Chip};
use crate::naming::NameSetting;
use crate::settings::Settings;

pub struct SuperIoHardware {
    identifier: Identifier,
    parent: Identifier,
    chip: Chip,
    name: NameSetting,
    handle: Option<Box<dyn ChipHandle>>,
    sensors: Vec<Sensor>,
}

impl SuperIoHardware {
    /// Wrap the `index`-th detected chip. Identifiers are `/lpc/<chip>/<index>`
    /// so a chip keeps its settings when other hardware comes and goes.
    pub fn new(
        parent: &Identifier,
        index: usize,
        handle: Box<dyn ChipHandle>,
        manufacturer: Manufacturer,
        model: Model,
        settings: Arc<dyn Settings>,
    ) -> Self {
        let chip = handle.chip();
        let identifier = Identifier::make(&chip.id(), Some(&Identifier::new([ids::LPC])), Some(index));
        let name = NameSetting::load(settings.clone(), &identifier, chip.name());

        let board = board_labels(manufacturer, model, chip);
        let sensors = handle
            .channels()
            .iter()
            .map(|channel| {
                let sensor_id = Sensor::identifier_for(&identifier, channel.sensor_type, channel.index);
                let default = sensor_label(board, channel);
                let name = NameSetting::load(settings.clone(), &sensor_id, default);
                Sensor::new(&identifier, channel.sensor_type, channel.index, name)
            })
            .collect::<Vec<_>>();

        debug!(
            identifier = %identifier,
            chip = %chip,
            sensors = sensors.len(),
            board_labels = board.is_some(),
            "Created Super-I/O node"
        );

        Self {
            identifier,
            parent: parent.clone(),
            chip,
            name,
            handle: Some(handle),
            sensors,
        }
    }

    pub fn chip(&self) -> Chip {
        self.chip
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }
}

impl Hardware for SuperIoHardware {
    fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    fn name(&self) -> &str {
        self.name.get()
    }

    fn set_name(&mut self, value: Option<&str>) -> Result<()> {
        self.name.set(value)
    }

    fn hardware_type(&self) -> HardwareType {
        HardwareType::SuperIO
    }

    fn parent(&self) -> Option<&Identifier> {
        Some(&self.parent)
    }

    fn sub_hardware(&self) -> Vec<&dyn Hardware> {
        Vec::new()
    }

    fn sub_hardware_mut(&mut self) -> Vec<&mut dyn Hardware> {
        Vec::new()
    }

    fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    fn sensors_mut(&mut self) -> &mut [Sensor] {
        &mut self.sensors
    }

    fn report(&self) -> String {
        let mut r = report_header(self);
        match &self.handle {
            Some(handle) => r.push_str(&handle.report()),
            None => r.push_str("Chip handle closed.\n"),
        }
        r
    }

    fn update(&mut self) {
        let Some(handle) = &self.handle else {
            return;
        };
        for sensor in &mut self.sensors {
            sensor.record(handle.read(sensor.sensor_type(), sensor.index()));
        }
    }

    fn close(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            debug!(identifier = %self.identifier, "Closing Super-I/O chip");
            handle.close();
        }
    }
}
