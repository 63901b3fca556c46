//! Super-I/O detection
//!
//! A `ChipProbe` enumerates the monitoring chips on the LPC bus once, at
//! startup. Each detected chip is handed out as a boxed `ChipHandle` that the
//! owning `SuperIoHardware` node keeps for the rest of the run.
//!
//! The default probe, `HwmonProbe`, relies on the kernel drivers (`nct6775`,
//! `it87`, `f71882fg`, `w83627ehf`) having already claimed the chips, and reads
//! their hwmon attributes instead of touching I/O ports.

mod chip;
mod hwmon;

pub use chip::Chip;
pub use hwmon::{HwmonChip, HwmonProbe};

use crate::hardware::SensorType;

/// One readable channel on a chip
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub sensor_type: SensorType,
    pub index: usize,
    /// Label published by the driver, if any
    pub label: Option<String>,
}

impl Channel {
    pub fn new(sensor_type: SensorType, index: usize, label: Option<String>) -> Self {
        Self {
            sensor_type,
            index,
            label,
        }
    }
}

/// A detected chip instance
#[cfg_attr(test, mockall::automock)]
pub trait ChipHandle {
    fn chip(&self) -> Chip;

    /// Channels in a stable order
    fn channels(&self) -> Vec<Channel>;

    /// Current value of one channel in display units, `None` if unreadable
    fn read(&self, sensor_type: SensorType, index: usize) -> Option<f32>;

    /// Verbatim register / attribute dump
    fn report(&self) -> String;

    /// Release the chip. Safe to call more than once.
    fn close(&mut self);
}

/// A chip detection mechanism
#[cfg_attr(test, mockall::automock)]
pub trait ChipProbe {
    /// Detect chips, in detection order. An empty list is a valid result.
    fn enumerate(&mut self) -> Vec<Box<dyn ChipHandle>>;

    /// Detection log, `None` when the probe has nothing to say
    fn report(&self) -> Option<String>;

    /// Release the probe session. Safe to call more than once.
    fn close(&mut self);
}
