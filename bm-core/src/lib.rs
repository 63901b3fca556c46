//! Boardmon Core Library
//!
//! Identifies the mainboard from its SMBIOS strings, detects the Super-I/O
//! monitoring chips behind it and assembles a diagnostic report of the whole
//! hardware tree.
//!
//! # Module Structure
//!
//! - `identification` - manufacturer / model classification
//! - `identity`, `naming`, `settings` - stable identifiers and persisted names
//! - `hardware`, `mainboard`, `superio` - the node tree
//! - `visitor`, `report` - traversal and whole-tree reporting
//! - `smbios`, `lpc`, `firmware` - detection sources
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bm_core::{HwmonProbe, JsonSettings, Mainboard, Report, Smbios, SysfsFirmwareTables};
//!
//! let settings = Arc::new(JsonSettings::open_default().unwrap());
//! let board = Mainboard::new(
//!     Box::new(Smbios::from_sysfs()),
//!     Box::new(HwmonProbe::new()),
//!     Box::new(SysfsFirmwareTables::new()),
//!     settings,
//! );
//! println!("{}", Report::assemble(&board, board.extensions(), board.firmware()));
//! ```

pub mod firmware;
pub mod lpc;
pub mod superio;

pub mod constants;
pub mod error;
pub mod hardware;
pub mod identification;
pub mod identity;
pub mod mainboard;
pub mod naming;
pub mod report;
pub mod settings;
pub mod smbios;
pub mod visitor;

// Re-export error types
pub use error::{BoardmonError, Result};

// Re-export the node tree
pub use hardware::{Hardware, HardwareType, Sensor, SensorType};
pub use mainboard::Mainboard;
pub use superio::SuperIoHardware;

// Re-export identification and naming
pub use identification::{resolve_manufacturer, resolve_model, Manufacturer, Model};
pub use identity::Identifier;
pub use naming::{default_name, NameSetting};
pub use settings::{default_settings_path, JsonSettings, MemorySettings, Settings};

// Re-export detection sources
pub use firmware::{FirmwareExtension, FirmwareProvider, FirmwareTables, SysfsFirmwareTables, TableSignature};
pub use lpc::{Channel, Chip, ChipHandle, ChipProbe, HwmonProbe};
pub use smbios::{BoardInfo, InventorySource, Smbios};

// Re-export traversal
pub use report::Report;
pub use visitor::{accept, find, find_mut, flatten, update_all, walk, walk_mut, Visitor};
