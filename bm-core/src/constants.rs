//! Constants and configuration values for boardmon
//!
//! Centralizes paths, environment variables and report layout values.

/// System paths, all relative to a sysfs root so captured trees can be replayed
pub mod paths {
    use std::path::{Path, PathBuf};

    /// Default root that every sysfs path is resolved under
    pub const SYSFS_ROOT: &str = "/";

    /// DMI attributes exported by the kernel's SMBIOS decoder
    pub const DMI_ID_DIR: &str = "sys/class/dmi/id";

    /// Base path for hwmon devices
    pub const HWMON_BASE: &str = "sys/class/hwmon";

    /// Raw ACPI tables, one file per signature
    pub const ACPI_TABLES_DIR: &str = "sys/firmware/acpi/tables";

    /// Name of the settings directory under the user config dir
    pub const APP_DIR: &str = "boardmon";

    /// Settings file name
    pub const SETTINGS_FILE: &str = "settings.json";

    /// Join a relative sysfs path under `root`
    pub fn under(root: &Path, relative: &str) -> PathBuf {
        root.join(relative)
    }

    /// User configuration directory.
    ///
    /// Order: `$BOARDMON_CONFIG_DIR`, `$XDG_CONFIG_HOME/boardmon`,
    /// `$HOME/.config/boardmon`, then the platform default from `dirs`.
    pub fn user_config_dir() -> Option<PathBuf> {
        if let Ok(dir) = std::env::var(super::env::CONFIG_DIR) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }

        let config_base = if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            Some(PathBuf::from(xdg))
        } else if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".config"))
        } else {
            dirs::config_dir()
        };

        config_base.map(|p| p.join(APP_DIR))
    }
}

/// Environment variables
pub mod env {
    /// Overrides the settings directory
    pub const CONFIG_DIR: &str = "BOARDMON_CONFIG_DIR";

    /// Log filter for the binary (tracing EnvFilter syntax)
    pub const LOG: &str = "BOARDMON_LOG";
}

/// Identifier segments
pub mod ids {
    /// Root board node
    pub const MAINBOARD: &str = "mainboard";

    /// Bus prefix for Super-I/O chips
    pub const LPC: &str = "lpc";

    /// Attribute key holding the display name
    pub const NAME: &str = "name";
}

/// Report layout
pub mod report {
    /// Rule printed between node sections in the aggregated report
    pub const SECTION_RULE: &str =
        "--------------------------------------------------------------------------------";

    /// Bytes per line in hex dumps
    pub const HEX_DUMP_WIDTH: usize = 16;
}

/// Limits
pub mod limits {
    /// Maximum settings file size (1MB)
    pub const MAX_SETTINGS_SIZE: u64 = 1024 * 1024;

    /// Maximum length of a user supplied display name
    pub const MAX_NAME_LEN: usize = 128;

    /// Largest ACPI table that will be read (16MB)
    pub const MAX_FIRMWARE_TABLE_SIZE: u64 = 16 * 1024 * 1024;
}
