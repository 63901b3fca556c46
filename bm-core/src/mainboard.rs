//! Mainboard root node
//!
//! The mainboard is the root of the tree. It owns the inventory source, the
//! Super-I/O probe session, the firmware table reader and one
//! `SuperIoHardware` child per detected chip. Detection happens once, in
//! `Mainboard::new`; nothing is added or removed afterwards.

use std::sync::Arc;

use tracing::{debug, info};

use crate::constants::ids;
use crate::error::Result;
use crate::firmware::{default_extensions, FirmwareExtension, FirmwareTables};
use crate::hardware::{report_header, Hardware, HardwareType, Sensor};
use crate::identification::{resolve_manufacturer, resolve_model, Manufacturer, Model};
use crate::identity::Identifier;
use crate::lpc::ChipProbe;
use crate::naming::{default_name, NameSetting};
use crate::settings::Settings;
use crate::smbios::InventorySource;
use crate::superio::SuperIoHardware;

pub struct Mainboard {
    identifier: Identifier,
    name: NameSetting,
    manufacturer: Manufacturer,
    model: Model,
    inventory: Box<dyn InventorySource>,
    probe: Option<Box<dyn ChipProbe>>,
    firmware: Box<dyn FirmwareTables>,
    extensions: Vec<FirmwareExtension>,
    children: Vec<SuperIoHardware>,
}

impl Mainboard {
    /// Identify the board and detect its Super-I/O chips.
    ///
    /// A missing board record resolves to `Unknown`. A probe that finds no
    /// chips leaves the mainboard without children.
    pub fn new(
        inventory: Box<dyn InventorySource>,
        mut probe: Box<dyn ChipProbe>,
        firmware: Box<dyn FirmwareTables>,
        settings: Arc<dyn Settings>,
    ) -> Self {
        let identifier = Identifier::make(ids::MAINBOARD, None, None);

        let board = inventory.board_info();
        let manufacturer_raw = board.as_ref().and_then(|b| b.manufacturer_name.as_deref());
        let product = board.as_ref().and_then(|b| b.product_name.as_deref());
        let manufacturer = resolve_manufacturer(manufacturer_raw);
        let model = resolve_model(product);

        let name = NameSetting::load(settings.clone(), &identifier, default_name(manufacturer, product));
        debug!(
            %manufacturer,
            %model,
            name = %name.get(),
            "Identified mainboard"
        );

        let children = probe
            .enumerate()
            .into_iter()
            .enumerate()
            .map(|(index, handle)| {
                SuperIoHardware::new(&identifier, index, handle, manufacturer, model, settings.clone())
            })
            .collect::<Vec<_>>();

        info!(
            name = %name.get(),
            superio = children.len(),
            "Mainboard detected"
        );

        Self {
            identifier,
            name,
            manufacturer,
            model,
            inventory,
            probe: Some(probe),
            firmware,
            extensions: default_extensions(),
            children,
        }
    }

    /// Replace the registered firmware extensions
    pub fn with_extensions(mut self, extensions: Vec<FirmwareExtension>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn manufacturer(&self) -> Manufacturer {
        self.manufacturer
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn extensions(&self) -> &[FirmwareExtension] {
        &self.extensions
    }

    pub fn firmware(&self) -> &dyn FirmwareTables {
        self.firmware.as_ref()
    }

    pub fn super_io(&self) -> &[SuperIoHardware] {
        &self.children
    }
}

impl Hardware for Mainboard {
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
        HardwareType::Mainboard
    }

    fn parent(&self) -> Option<&Identifier> {
        None
    }

    fn sub_hardware(&self) -> Vec<&dyn Hardware> {
        self.children.iter().map(|c| c as &dyn Hardware).collect()
    }

    fn sub_hardware_mut(&mut self) -> Vec<&mut dyn Hardware> {
        self.children
            .iter_mut()
            .map(|c| c as &mut dyn Hardware)
            .collect()
    }

    fn sensors(&self) -> &[Sensor] {
        &[]
    }

    fn sensors_mut(&mut self) -> &mut [Sensor] {
        &mut []
    }

    fn report(&self) -> String {
        let mut r = report_header(self);

        let inventory = self.inventory.report();
        if inventory.trim().is_empty() {
            r.push_str("No SMBIOS data available.\n\n");
        } else {
            r.push_str(&inventory);
            if !inventory.ends_with("\n\n") {
                r.push('\n');
            }
        }

        if let Some(log) = self.probe.as_ref().and_then(|p| p.report()) {
            r.push_str(&log);
            r.push('\n');
        }

        for extension in self
            .extensions
            .iter()
            .filter(|e| e.target == HardwareType::Mainboard)
        {
            if let Some(section) = extension.report(self.firmware.as_ref()) {
                r.push_str(&section);
            }
        }
        r
    }

    fn update(&mut self) {}

    fn close(&mut self) {
        if let Some(mut probe) = self.probe.take() {
            debug!("Closing Super-I/O probe");
            probe.close();
        }
        for child in &mut self.children {
            child.close();
        }
    }
}
