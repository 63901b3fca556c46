//! Whole-tree report
//!
//! Concatenates every node's own section in pre-order, then appends firmware
//! extensions that no node in the tree claimed.

use std::collections::HashSet;
use std::fmt::{self, Write as _};

use crate::constants::report::SECTION_RULE;
use crate::firmware::{FirmwareExtension, FirmwareTables};
use crate::hardware::{Hardware, HardwareType};
use crate::visitor::{flatten, walk};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    text: String,
}

impl Report {
    pub fn assemble(
        root: &dyn Hardware,
        extensions: &[FirmwareExtension],
        tables: &dyn FirmwareTables,
    ) -> Self {
        let mut r = String::new();
        let _ = writeln!(r, "{}", SECTION_RULE);
        let _ = writeln!(r, "boardmon {} Report", env!("CARGO_PKG_VERSION"));
        let _ = writeln!(r, "{}", SECTION_RULE);
        r.push('\n');

        r.push_str("Sensors\n\n");
        write_sensors(&mut r, root);
        r.push('\n');

        let mut kinds = HashSet::new();
        walk(root, &mut |node: &dyn Hardware| {
            kinds.insert(node.hardware_type());
            let _ = writeln!(r, "{}", SECTION_RULE);
            r.push('\n');
            r.push_str(&node.report());
            r.push('\n');
        });

        for extension in extensions.iter().filter(|e| !kinds.contains(&e.target)) {
            if let Some(section) = extension.report(tables) {
                let _ = writeln!(r, "{}", SECTION_RULE);
                r.push('\n');
                r.push_str(&section);
                r.push('\n');
            }
        }

        Self { text: r }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Indented `name  value  (min / max)` table of every sensor in the tree
fn write_sensors(r: &mut String, root: &dyn Hardware) {
    for node in flatten(root) {
        let depth = node_depth(node.hardware_type());
        let _ = writeln!(r, "{}+- {} ({})", "|  ".repeat(depth), node.name(), node.identifier());
        for sensor in node.sensors() {
            let range = match (sensor.min(), sensor.max()) {
                (Some(min), Some(max)) => format!("({:.1}, {:.1})", min, max),
                _ => String::new(),
            };
            let _ = writeln!(
                r,
                "{}|  +- {:<24} : {:>12} {} {}",
                "|  ".repeat(depth),
                sensor.name(),
                sensor.format_value(),
                range,
                sensor.identifier()
            );
        }
    }
}

fn node_depth(kind: HardwareType) -> usize {
    match kind {
        HardwareType::Mainboard => 0,
        HardwareType::SuperIO => 1,
    }
}
