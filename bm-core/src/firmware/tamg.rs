//! Gigabyte `TAMG` ACPI table
//!
//! Gigabyte boards ship a vendor table describing the sensors their firmware
//! monitors. The payload follows an ASCII `$HEALTH$` marker:
//!
//! ```text
//! $HEALTH$ | 8 reserved | count: i32 | 12 reserved | count x 56-byte record
//! record:  name[32] | type: u8 | channel: i16 | channel hi: u8 |
//!          8 reserved | value: i32 | 8 reserved
//! ```
//!
//! All integers are little endian. A truncated table yields no sensors.

use std::fmt::{self, Write as _};

use super::{hex_dump, TableSignature};

pub(super) const SIGNATURE: TableSignature = TableSignature::from_bytes(*b"TAMG");

const MARKER: &[u8] = b"$HEALTH$";
const HEADER_LEN: usize = 8 + 4 + 12;
const NAME_LEN: usize = 32;
const RECORD_LEN: usize = NAME_LEN + 1 + 2 + 1 + 8 + 4 + 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TamgSensorType {
    Temperature,
    Voltage,
    Fan,
    Case,
    Other(u8),
}

impl From<u8> for TamgSensorType {
    fn from(raw: u8) -> Self {
        match raw {
            1 => Self::Temperature,
            2 | 3 => Self::Voltage,
            4 => Self::Fan,
            8 => Self::Case,
            other => Self::Other(other),
        }
    }
}

impl fmt::Display for TamgSensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Voltage => write!(f, "Voltage"),
            Self::Fan => write!(f, "Fan"),
            Self::Case => write!(f, "Case"),
            Self::Other(raw) => write!(f, "Type{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TamgSensor {
    pub name: String,
    pub sensor_type: TamgSensorType,
    pub channel: u32,
    pub value: f32,
}

#[derive(Debug, Clone)]
pub struct GigabyteTamg {
    sensors: Vec<TamgSensor>,
    marker_found: bool,
    table_len: usize,
}

impl GigabyteTamg {
    pub fn parse(table: &[u8]) -> Self {
        let marker = find(table, MARKER);
        let sensors = marker
            .and_then(|index| parse_sensors(&table[index + MARKER.len()..]))
            .unwrap_or_default();
        Self {
            sensors,
            marker_found: marker.is_some(),
            table_len: table.len(),
        }
    }

    pub fn sensors(&self) -> &[TamgSensor] {
        &self.sensors
    }

    pub fn report(&self, table: &[u8]) -> String {
        let mut r = String::new();
        r.push_str("Gigabyte TAMG\n\n");

        if !self.marker_found {
            let _ = writeln!(r, "Unrecognized layout ({} bytes)", self.table_len);
            r.push('\n');
            r.push_str(&hex_dump(table));
            r.push('\n');
            return r;
        }

        for (i, sensor) in self.sensors.iter().enumerate() {
            let _ = writeln!(r, " Sensor Name[{}]: {}", i, sensor.name);
            let _ = writeln!(r, " Sensor Type[{}]: {}", i, sensor.sensor_type);
            let _ = writeln!(r, " Sensor Channel[{}]: 0x{:08X}", i, sensor.channel);
            let _ = writeln!(r, " Sensor Value[{}]: {}", i, sensor.value);
            r.push('\n');
        }
        r
    }
}

pub(super) fn render(table: &[u8]) -> String {
    GigabyteTamg::parse(table).report(table)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn parse_sensors(payload: &[u8]) -> Option<Vec<TamgSensor>> {
    let header = payload.get(..HEADER_LEN)?;
    let count = i32::from_le_bytes(header[8..12].try_into().ok()?);
    let count = usize::try_from(count).ok()?;

    let records = &payload[HEADER_LEN..];
    if records.len() / RECORD_LEN < count {
        return None;
    }

    records
        .chunks_exact(RECORD_LEN)
        .take(count)
        .map(parse_record)
        .collect()
}

fn parse_record(record: &[u8]) -> Option<TamgSensor> {
    let name_bytes = record.get(..NAME_LEN)?;
    let name_end = name_bytes.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    let name = String::from_utf8_lossy(&name_bytes[..name_end]).trim().to_string();

    let mut offset = NAME_LEN;
    let sensor_type = TamgSensorType::from(record[offset]);
    offset += 1;
    let channel_lo = u16::from_le_bytes(record[offset..offset + 2].try_into().ok()?) as u32;
    offset += 2;
    let channel = channel_lo | (record[offset] as u32) << 24;
    offset += 1 + 8;
    let raw = i32::from_le_bytes(record[offset..offset + 4].try_into().ok()?);

    let value = match sensor_type {
        TamgSensorType::Voltage => raw as f32 / 1000.0,
        _ => raw as f32,
    };

    Some(TamgSensor {
        name,
        sensor_type,
        channel,
        value,
    })
}
