//! Known Super-I/O chips

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Chip {
    // Nuvoton
    NCT6771F,
    NCT6776F,
    NCT6779D,
    NCT6791D,
    NCT6792D,
    NCT6793D,
    NCT6795D,
    NCT6796D,
    NCT6797D,
    NCT6798D,
    NCT6799D,

    // ITE
    IT8620E,
    IT8628E,
    IT8686E,
    IT8688E,
    IT8705F,
    IT8712F,
    IT8716F,
    IT8718F,
    IT8720F,
    IT8721F,
    IT8728F,
    IT8771E,
    IT8772E,
    IT8792E,

    // Fintek
    F71808E,
    F71858,
    F71862,
    F71869,
    F71869A,
    F71882,
    F71889AD,
    F71889ED,
    F71889F,

    // Winbond
    W83627DHG,
    W83627EHF,
    W83667HG,
}

/// hwmon `name` attribute values published by the kernel Super-I/O drivers
const HWMON_NAMES: &[(&str, Chip)] = &[
    // nct6775
    ("nct6775", Chip::NCT6771F),
    ("nct6776", Chip::NCT6776F),
    ("nct6779", Chip::NCT6779D),
    ("nct6791", Chip::NCT6791D),
    ("nct6792", Chip::NCT6792D),
    ("nct6793", Chip::NCT6793D),
    ("nct6795", Chip::NCT6795D),
    ("nct6796", Chip::NCT6796D),
    ("nct6797", Chip::NCT6797D),
    ("nct6798", Chip::NCT6798D),
    ("nct6799", Chip::NCT6799D),
    // it87
    ("it8620", Chip::IT8620E),
    ("it8628", Chip::IT8628E),
    ("it8686", Chip::IT8686E),
    ("it8688", Chip::IT8688E),
    ("it8705", Chip::IT8705F),
    ("it8712", Chip::IT8712F),
    ("it8716", Chip::IT8716F),
    ("it8718", Chip::IT8718F),
    ("it8720", Chip::IT8720F),
    ("it8721", Chip::IT8721F),
    ("it8728", Chip::IT8728F),
    ("it8771", Chip::IT8771E),
    ("it8772", Chip::IT8772E),
    ("it8792", Chip::IT8792E),
    // f71882fg
    ("f71808e", Chip::F71808E),
    ("f71858fg", Chip::F71858),
    ("f71862fg", Chip::F71862),
    ("f71869", Chip::F71869),
    ("f71869a", Chip::F71869A),
    ("f71882fg", Chip::F71882),
    ("f71889a", Chip::F71889AD),
    ("f71889ed", Chip::F71889ED),
    ("f71889fg", Chip::F71889F),
    // w83627ehf
    ("w83627dhg", Chip::W83627DHG),
    ("w83627ehf", Chip::W83627EHF),
    ("w83667hg", Chip::W83667HG),
];

impl Chip {
    /// Map a hwmon driver name to a chip. Exact match only: `it8720` and
    /// `it87952` are different parts.
    pub fn from_hwmon_name(name: &str) -> Option<Chip> {
        let name = name.trim().to_ascii_lowercase();
        HWMON_NAMES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, chip)| *chip)
    }

    /// Vendor-qualified display name, also the default node name
    pub fn name(&self) -> String {
        format!("{} {:?}", self.vendor(), self)
    }

    pub fn vendor(&self) -> &'static str {
        match self {
            Self::NCT6771F
            | Self::NCT6776F
            | Self::NCT6779D
            | Self::NCT6791D
            | Self::NCT6792D
            | Self::NCT6793D
            | Self::NCT6795D
            | Self::NCT6796D
            | Self::NCT6797D
            | Self::NCT6798D
            | Self::NCT6799D => "Nuvoton",
            Self::IT8620E
            | Self::IT8628E
            | Self::IT8686E
            | Self::IT8688E
            | Self::IT8705F
            | Self::IT8712F
            | Self::IT8716F
            | Self::IT8718F
            | Self::IT8720F
            | Self::IT8721F
            | Self::IT8728F
            | Self::IT8771E
            | Self::IT8772E
            | Self::IT8792E => "ITE",
            Self::F71808E
            | Self::F71858
            | Self::F71862
            | Self::F71869
            | Self::F71869A
            | Self::F71882
            | Self::F71889AD
            | Self::F71889ED
            | Self::F71889F => "Fintek",
            Self::W83627DHG | Self::W83627EHF | Self::W83667HG => "Winbond",
        }
    }

    /// Lowercase identifier segment, e.g. `nct6798d`
    pub fn id(&self) -> String {
        format!("{:?}", self).to_ascii_lowercase()
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
