//! Sensor labels
//!
//! Board vendors wire Super-I/O inputs differently, so the same `in2` can be
//! +12V on one board and +5V on another. Known boards get a curated table;
//! otherwise the driver's own `*_label` is used, then a generic name.

use crate::hardware::SensorType;
use crate::identification::{Manufacturer, Model};
use crate::lpc::{Channel, Chip};

#[derive(Debug)]
pub struct BoardLabels {
    pub voltages: &'static [(usize, &'static str)],
    pub temperatures: &'static [(usize, &'static str)],
    pub fans: &'static [(usize, &'static str)],
    pub controls: &'static [(usize, &'static str)],
}

impl BoardLabels {
    fn lookup(&self, sensor_type: SensorType, index: usize) -> Option<&'static str> {
        let table = match sensor_type {
            SensorType::Voltage => self.voltages,
            SensorType::Temperature => self.temperatures,
            SensorType::Fan => self.fans,
            SensorType::Control => self.controls,
        };
        table.iter().find(|(i, _)| *i == index).map(|(_, label)| *label)
    }
}

const GIGABYTE_Z390_IT8688E: BoardLabels = BoardLabels {
    voltages: &[(0, "Vcore"), (1, "+3.3V"), (2, "+12V"), (3, "+5V"), (4, "VCCSA"), (5, "VCCIO"), (6, "DRAM")],
    temperatures: &[(1, "System #1"), (2, "EC_TEMP1"), (3, "CPU"), (4, "PCIe x16"), (5, "VRM MOS"), (6, "PCH")],
    fans: &[(1, "CPU Fan"), (2, "System Fan #1"), (3, "System Fan #2"), (4, "System Fan #3"), (5, "CPU Optional Fan")],
    controls: &[(1, "CPU Fan"), (2, "System Fan #1"), (3, "System Fan #2"), (4, "System Fan #3"), (5, "CPU Optional Fan")],
};

const GIGABYTE_X570_IT8688E: BoardLabels = BoardLabels {
    voltages: &[(0, "Vcore"), (1, "+3.3V"), (2, "+12V"), (3, "+5V"), (4, "Vcore SoC"), (5, "CPU VDDP"), (6, "DRAM")],
    temperatures: &[(1, "System #1"), (2, "Chipset"), (3, "CPU"), (4, "PCIe x16"), (5, "VRM MOS"), (6, "VSOC MOS")],
    fans: &[(1, "CPU Fan"), (2, "System Fan #1"), (3, "System Fan #2"), (4, "PCH Fan"), (5, "CPU Optional Fan")],
    controls: &[(1, "CPU Fan"), (2, "System Fan #1"), (3, "System Fan #2"), (4, "PCH Fan"), (5, "CPU Optional Fan")],
};

const ASUS_P8P67_NCT6776F: BoardLabels = BoardLabels {
    voltages: &[(0, "CPU VCore"), (1, "+12V"), (2, "AVCC"), (3, "+3.3V"), (4, "+5V"), (7, "3VSB"), (8, "VBAT")],
    temperatures: &[(1, "Motherboard"), (2, "CPU"), (3, "Auxiliary")],
    fans: &[(1, "Chassis Fan #1"), (2, "CPU Fan"), (3, "Power Fan"), (4, "Chassis Fan #2")],
    controls: &[(1, "Chassis Fan #1"), (2, "CPU Fan"), (3, "Chassis Fan #2")],
};

const ASROCK_X570_NCT6796D: BoardLabels = BoardLabels {
    voltages: &[(0, "Vcore"), (1, "+5V"), (4, "+12V"), (5, "VDDCR SoC"), (7, "3VSB"), (8, "VBAT")],
    temperatures: &[(1, "Motherboard"), (2, "CPU"), (3, "Auxiliary"), (6, "Chipset")],
    fans: &[(1, "Chassis Fan #3"), (2, "CPU Fan #1"), (3, "Chassis Fan #1"), (4, "Chassis Fan #2"), (5, "CPU Fan #2"), (6, "Chipset Fan")],
    controls: &[],
};

/// Curated labels for a known board / chip pairing
pub fn board_labels(manufacturer: Manufacturer, model: Model, chip: Chip) -> Option<&'static BoardLabels> {
    match (manufacturer, model, chip) {
        (Manufacturer::Gigabyte, Model::Z390_AORUS_PRO | Model::Z390_AORUS_PRO_WIFI, Chip::IT8688E) => {
            Some(&GIGABYTE_Z390_IT8688E)
        }
        (Manufacturer::Gigabyte, Model::X570_AORUS_MASTER, Chip::IT8688E) => Some(&GIGABYTE_X570_IT8688E),
        (
            Manufacturer::ASUS,
            Model::P8P67 | Model::P8P67_EVO | Model::P8P67_PRO | Model::P8P67_M_PRO,
            Chip::NCT6776F,
        ) => Some(&ASUS_P8P67_NCT6776F),
        (Manufacturer::ASRock, Model::X570_Taichi, Chip::NCT6796D) => Some(&ASROCK_X570_NCT6796D),
        _ => None,
    }
}

/// Default sensor name: curated board label, then driver label, then generic
pub fn sensor_label(board: Option<&BoardLabels>, channel: &Channel) -> String {
    if let Some(label) = board.and_then(|b| b.lookup(channel.sensor_type, channel.index)) {
        return label.to_string();
    }
    if let Some(label) = &channel.label {
        return label.clone();
    }
    match channel.sensor_type {
        SensorType::Voltage => format!("Voltage #{}", channel.index),
        SensorType::Temperature => format!("Temperature #{}", channel.index),
        SensorType::Fan => format!("Fan #{}", channel.index),
        SensorType::Control => format!("Fan Control #{}", channel.index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_table_wins_over_driver_label() {
        let board = board_labels(Manufacturer::Gigabyte, Model::Z390_AORUS_PRO_WIFI, Chip::IT8688E);
        assert!(board.is_some());
        let channel = Channel::new(SensorType::Temperature, 3, Some("temp3".to_string()));
        assert_eq!(sensor_label(board, &channel), "CPU");
    }

    #[test]
    fn test_driver_label_then_generic() {
        let channel = Channel::new(SensorType::Temperature, 2, Some("CPUTIN".to_string()));
        assert_eq!(sensor_label(None, &channel), "CPUTIN");

        let channel = Channel::new(SensorType::Control, 4, None);
        assert_eq!(sensor_label(None, &channel), "Fan Control #4");
    }

    #[test]
    fn test_unlisted_channel_on_known_board_falls_back() {
        let board = board_labels(Manufacturer::ASRock, Model::X570_Taichi, Chip::NCT6796D);
        let channel = Channel::new(SensorType::Control, 1, None);
        assert_eq!(sensor_label(board, &channel), "Fan Control #1");
    }

    #[test]
    fn test_wrong_chip_has_no_board_table() {
        assert!(board_labels(Manufacturer::Gigabyte, Model::Z390_AORUS_PRO, Chip::IT8792E).is_none());
        assert!(board_labels(Manufacturer::Unknown, Model::Unknown, Chip::NCT6798D).is_none());
    }
}
