//! Platform inventory (SMBIOS / DMI)
//!
//! The kernel decodes the SMBIOS tables and exports the strings under
//! `/sys/class/dmi/id`. This module only reads those already-parsed values.
//! Every field is optional; firmware routinely leaves them blank or fills them
//! with placeholders such as "To Be Filled By O.E.M.".

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::constants::paths;

/// Board strings as reported by the inventory source
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardInfo {
    pub manufacturer_name: Option<String>,
    pub product_name: Option<String>,
    pub version: Option<String>,
    pub serial_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BiosInfo {
    pub vendor: Option<String>,
    pub version: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemInfo {
    pub manufacturer_name: Option<String>,
    pub product_name: Option<String>,
    pub version: Option<String>,
}

/// Source of board identification data
#[cfg_attr(test, mockall::automock)]
pub trait InventorySource {
    /// Board strings, `None` when the source has no board record at all
    fn board_info(&self) -> Option<BoardInfo>;

    /// Verbatim diagnostic dump of everything the source knows
    fn report(&self) -> String;
}

/// DMI values read from sysfs
#[derive(Debug, Clone, Default)]
pub struct Smbios {
    base: PathBuf,
    bios: Option<BiosInfo>,
    system: Option<SystemInfo>,
    board: Option<BoardInfo>,
}

impl Smbios {
    /// Read from the live system
    pub fn from_sysfs() -> Self {
        Self::from_root(Path::new(paths::SYSFS_ROOT))
    }

    /// Read from a sysfs tree mounted under `root`
    pub fn from_root(root: &Path) -> Self {
        Self::from_path(paths::under(root, paths::DMI_ID_DIR))
    }

    /// Read from a DMI id directory directly
    pub fn from_path(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        if !base.is_dir() {
            debug!(path = %base.display(), "No DMI directory, inventory unavailable");
            return Self {
                base,
                ..Self::default()
            };
        }

        let bios = BiosInfo {
            vendor: read_dmi_field(&base, "bios_vendor"),
            version: read_dmi_field(&base, "bios_version"),
            date: read_dmi_field(&base, "bios_date"),
        };
        let system = SystemInfo {
            manufacturer_name: read_dmi_field(&base, "sys_vendor"),
            product_name: read_dmi_field(&base, "product_name"),
            version: read_dmi_field(&base, "product_version"),
        };
        let board = BoardInfo {
            manufacturer_name: read_dmi_field(&base, "board_vendor"),
            product_name: read_dmi_field(&base, "board_name"),
            version: read_dmi_field(&base, "board_version"),
            serial_number: read_dmi_field(&base, "board_serial"),
        };

        debug!(
            board_vendor = ?board.manufacturer_name,
            board_name = ?board.product_name,
            "Read DMI inventory"
        );

        Self {
            base,
            bios: (bios != BiosInfo::default()).then_some(bios),
            system: (system != SystemInfo::default()).then_some(system),
            board: (board != BoardInfo::default()).then_some(board),
        }
    }

    pub fn bios(&self) -> Option<&BiosInfo> {
        self.bios.as_ref()
    }

    pub fn system(&self) -> Option<&SystemInfo> {
        self.system.as_ref()
    }

    pub fn board(&self) -> Option<&BoardInfo> {
        self.board.as_ref()
    }
}

impl InventorySource for Smbios {
    fn board_info(&self) -> Option<BoardInfo> {
        self.board.clone()
    }

    fn report(&self) -> String {
        let mut r = String::new();

        if let Some(bios) = &self.bios {
            push_field(&mut r, "BIOS Vendor", &bios.vendor);
            push_field(&mut r, "BIOS Version", &bios.version);
            push_field(&mut r, "BIOS Date", &bios.date);
            r.push('\n');
        }

        if let Some(system) = &self.system {
            push_field(&mut r, "System Manufacturer", &system.manufacturer_name);
            push_field(&mut r, "System Name", &system.product_name);
            push_field(&mut r, "System Version", &system.version);
            r.push('\n');
        }

        if let Some(board) = &self.board {
            push_field(&mut r, "Mainboard Manufacturer", &board.manufacturer_name);
            push_field(&mut r, "Mainboard Name", &board.product_name);
            push_field(&mut r, "Mainboard Version", &board.version);
            r.push('\n');
        }

        if r.is_empty() {
            let _ = writeln!(r, "No SMBIOS data available ({}).", self.base.display());
        }
        r
    }
}

fn push_field(r: &mut String, label: &str, value: &Option<String>) {
    if let Some(value) = value {
        let _ = writeln!(r, "{}: {}", label, value);
    }
}

/// Read one DMI attribute; unreadable (root-only serials) and blank fields are `None`
fn read_dmi_field(base: &Path, name: &str) -> Option<String> {
    match fs::read_to_string(base.join(name)) {
        Ok(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Err(e) => {
            trace!(field = name, error = %e, "DMI field unavailable");
            None
        }
    }
}
