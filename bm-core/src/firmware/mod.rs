//! Firmware tables
//!
//! Vendor-specific ACPI tables are looked up by their 4-character signature.
//! A table that is not present is the normal case on most boards and is never
//! treated as an error.
//!
//! Extensions describe which tables carry diagnostic data, which node kind
//! they belong to, and how to render them. Nodes of the matching kind include
//! the rendered table in their own report; the aggregated report picks up any
//! extension whose kind has no node in the tree.

mod tamg;

pub use tamg::{GigabyteTamg, TamgSensor, TamgSensorType};

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, trace, warn};

use crate::constants::{limits, paths};
use crate::error::{BoardmonError, Result};
use crate::hardware::HardwareType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirmwareProvider {
    /// ACPI tables
    Acpi,
}

/// Four printable ASCII characters, e.g. `TAMG`
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableSignature([u8; 4]);

impl TableSignature {
    /// Const constructor for built-in signatures; callers guarantee the bytes
    /// are printable ASCII
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }

    pub fn new(signature: &str) -> Result<Self> {
        let bytes = signature.as_bytes();
        if bytes.len() != 4 || !bytes.iter().all(|b| b.is_ascii_graphic()) {
            return Err(BoardmonError::invalid_argument(
                "signature",
                format!("{:?} is not 4 printable ASCII characters", signature),
            ));
        }
        Ok(Self([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl fmt::Display for TableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TableSignature({})", self.as_str())
    }
}

/// Lookup of raw firmware tables
#[cfg_attr(test, mockall::automock)]
pub trait FirmwareTables {
    /// Raw table bytes, `None` when the table does not exist or is unreadable
    fn lookup(&self, provider: FirmwareProvider, signature: TableSignature) -> Option<Vec<u8>>;
}

/// ACPI tables exported under `/sys/firmware/acpi/tables`
#[derive(Debug, Clone)]
pub struct SysfsFirmwareTables {
    base: PathBuf,
}

impl SysfsFirmwareTables {
    pub fn new() -> Self {
        Self::from_root(Path::new(paths::SYSFS_ROOT))
    }

    pub fn from_root(root: &Path) -> Self {
        Self {
            base: paths::under(root, paths::ACPI_TABLES_DIR),
        }
    }
}

impl Default for SysfsFirmwareTables {
    fn default() -> Self {
        Self::new()
    }
}

impl FirmwareTables for SysfsFirmwareTables {
    fn lookup(&self, provider: FirmwareProvider, signature: TableSignature) -> Option<Vec<u8>> {
        let FirmwareProvider::Acpi = provider;
        let path = self.base.join(signature.as_str());
        let size = match fs::metadata(&path) {
            Ok(meta) => meta.len(),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                trace!(%signature, "Firmware table not present");
                return None;
            }
            Err(e) => {
                debug!(%signature, error = %e, "Firmware table not accessible");
                return None;
            }
        };
        if size > limits::MAX_FIRMWARE_TABLE_SIZE {
            warn!(%signature, size, "Firmware table too large, skipping");
            return None;
        }

        match fs::read(&path) {
            Ok(bytes) => {
                debug!(%signature, len = bytes.len(), "Read firmware table");
                Some(bytes)
            }
            Err(e) => {
                // ACPI tables are root-only on most distributions
                debug!(%signature, error = %e, "Firmware table not readable");
                None
            }
        }
    }
}

/// A firmware table that contributes a report section
#[derive(Clone)]
pub struct FirmwareExtension {
    pub provider: FirmwareProvider,
    pub signature: TableSignature,
    /// Node kind whose report carries this table
    pub target: HardwareType,
    render: fn(&[u8]) -> String,
}

impl FirmwareExtension {
    pub fn new(
        provider: FirmwareProvider,
        signature: TableSignature,
        target: HardwareType,
        render: fn(&[u8]) -> String,
    ) -> Self {
        Self {
            provider,
            signature,
            target,
            render,
        }
    }

    /// Rendered table, `None` when the table is absent
    pub fn report(&self, tables: &dyn FirmwareTables) -> Option<String> {
        tables
            .lookup(self.provider, self.signature)
            .map(|bytes| (self.render)(&bytes))
    }
}

impl fmt::Debug for FirmwareExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirmwareExtension")
            .field("provider", &self.provider)
            .field("signature", &self.signature)
            .field("target", &self.target)
            .finish()
    }
}

/// Extensions known to boardmon
pub fn default_extensions() -> Vec<FirmwareExtension> {
    vec![FirmwareExtension::new(
        FirmwareProvider::Acpi,
        tamg::SIGNATURE,
        HardwareType::Mainboard,
        tamg::render,
    )]
}

/// Classic 16-bytes-per-line hex dump with offsets
pub fn hex_dump(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut r = String::new();
    for (line, chunk) in bytes.chunks(crate::constants::report::HEX_DUMP_WIDTH).enumerate() {
        let _ = write!(r, " {:04X} ", line * crate::constants::report::HEX_DUMP_WIDTH);
        for b in chunk {
            let _ = write!(r, " {:02X}", b);
        }
        r.push('\n');
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_signature_validation() {
        assert_eq!(TableSignature::new("TAMG").unwrap().as_str(), "TAMG");
        assert!(TableSignature::new("TAM").is_err());
        assert!(TableSignature::new("TAMGX").is_err());
        assert!(TableSignature::new("TA G").is_err());
    }

    #[test]
    fn test_sysfs_lookup_present_and_absent() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(paths::ACPI_TABLES_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("TAMG"), [1u8, 2, 3]).unwrap();

        let tables = SysfsFirmwareTables::from_root(tmp.path());
        let tamg = TableSignature::new("TAMG").unwrap();
        let ssdt = TableSignature::new("SSDT").unwrap();

        assert_eq!(tables.lookup(FirmwareProvider::Acpi, tamg), Some(vec![1, 2, 3]));
        assert_eq!(tables.lookup(FirmwareProvider::Acpi, ssdt), None);
    }

    #[test]
    fn test_extension_absent_table_has_no_report() {
        let mut tables = MockFirmwareTables::new();
        tables.expect_lookup().returning(|_, _| None);

        let ext = &default_extensions()[0];
        assert_eq!(ext.target, HardwareType::Mainboard);
        assert!(ext.report(&tables).is_none());
    }

    #[test]
    fn test_hex_dump_layout() {
        let bytes: Vec<u8> = (0u8..18).collect();
        let dump = hex_dump(&bytes);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with(" 0000  00 01 02"));
        assert_eq!(lines[1], " 0010  10 11");
    }
}
