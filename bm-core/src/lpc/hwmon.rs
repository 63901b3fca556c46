//! hwmon-backed Super-I/O probe
//!
//! Scans `/sys/class/hwmon/hwmon*` for devices whose `name` attribute belongs
//! to a known Super-I/O driver. Units follow the hwmon ABI:
//! - **Voltage**: `inN_input` in millivolts
//! - **Temperature**: `tempN_input` in millidegrees Celsius
//! - **Fan**: `fanN_input` in RPM
//! - **Control**: `pwmN` duty cycle 0-255

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info, trace, warn};

use super::{Channel, Chip, ChipHandle, ChipProbe};
use crate::constants::paths;
use crate::hardware::SensorType;

/// Probe that enumerates Super-I/O chips from hwmon
#[derive(Debug)]
pub struct HwmonProbe {
    base: PathBuf,
    log: Option<String>,
}

impl HwmonProbe {
    pub fn new() -> Self {
        Self::from_root(Path::new(paths::SYSFS_ROOT))
    }

    /// Probe a sysfs tree mounted under `root`
    pub fn from_root(root: &Path) -> Self {
        Self {
            base: paths::under(root, paths::HWMON_BASE),
            log: None,
        }
    }
}

impl Default for HwmonProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipProbe for HwmonProbe {
    fn enumerate(&mut self) -> Vec<Box<dyn ChipHandle>> {
        let mut chips: Vec<Box<dyn ChipHandle>> = Vec::new();

        let entries = match fs::read_dir(&self.base) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %self.base.display(), error = %e, "No hwmon class directory");
                self.log = None;
                return chips;
            }
        };

        // hwmonN order is the kernel's registration order; sort so that
        // hwmon10 follows hwmon9
        let mut dirs: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
        dirs.sort_by_key(|p| hwmon_number(p));

        let mut log = String::new();
        let _ = writeln!(log, "LPC (hwmon {})", self.base.display());
        log.push('\n');

        for path in dirs {
            let dir = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            let tag = hwmon_tag(&path);
            let name = match read_trimmed(dir.join("name")) {
                Ok(name) => name,
                Err(e) => {
                    trace!(path = %dir.display(), error = %e, "hwmon device without name");
                    continue;
                }
            };

            match Chip::from_hwmon_name(&name) {
                Some(chip) => {
                    let handle = HwmonChip::open(chip, &name, dir);
                    info!(
                        chip = %chip,
                        hwmon = %tag,
                        channels = handle.channels().len(),
                        "Found Super-I/O chip"
                    );
                    let _ = writeln!(log, "{}: {} -> {}", tag, name, chip);
                    chips.push(Box::new(handle));
                }
                None => {
                    let _ = writeln!(log, "{}: {} (not a Super-I/O chip)", tag, name);
                }
            }
        }

        if chips.is_empty() {
            log.push_str("\nNo Super-I/O chip detected.\n");
        }
        log.push('\n');
        self.log = Some(log);

        info!("Total Super-I/O chips found: {}", chips.len());
        chips
    }

    fn report(&self) -> Option<String> {
        self.log.clone()
    }

    fn close(&mut self) {
        self.log = None;
    }
}

/// One chip bound to its hwmon directory
#[derive(Debug)]
pub struct HwmonChip {
    chip: Chip,
    driver_name: String,
    /// `None` once closed
    dir: Option<PathBuf>,
    channels: Vec<Channel>,
}

impl HwmonChip {
    pub fn open(chip: Chip, driver_name: &str, dir: PathBuf) -> Self {
        let channels = scan_channels(&dir);
        Self {
            chip,
            driver_name: driver_name.to_string(),
            dir: Some(dir),
            channels,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

impl ChipHandle for HwmonChip {
    fn chip(&self) -> Chip {
        self.chip
    }

    fn channels(&self) -> Vec<Channel> {
        self.channels.clone()
    }

    fn read(&self, sensor_type: SensorType, index: usize) -> Option<f32> {
        let dir = self.dir.as_ref()?;
        let raw: f32 = read_trimmed(dir.join(attribute_name(sensor_type, index)))
            .ok()?
            .parse()
            .ok()?;
        Some(match sensor_type {
            SensorType::Voltage => raw / 1000.0,
            SensorType::Temperature => raw / 1000.0,
            SensorType::Fan => raw,
            SensorType::Control => raw * 100.0 / 255.0,
        })
    }

    fn report(&self) -> String {
        let mut r = String::new();
        let _ = writeln!(r, "Chip: {}", self.chip);
        let _ = writeln!(r, "Driver Name: {}", self.driver_name);

        let dir = match &self.dir {
            Some(dir) => dir,
            None => {
                r.push_str("Closed\n");
                return r;
            }
        };
        let _ = writeln!(r, "Path: {}", dir.display());
        r.push('\n');

        let mut attributes: Vec<(String, String)> = match fs::read_dir(dir) {
            Ok(entries) => entries
                .flatten()
                .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
                .filter_map(|e| {
                    let fname = e.file_name().to_string_lossy().to_string();
                    if fname == "uevent" {
                        return None;
                    }
                    read_trimmed(e.path()).ok().map(|v| (fname, v))
                })
                .collect(),
            Err(e) => {
                warn!(path = %dir.display(), error = %e, "Failed to list hwmon attributes");
                Vec::new()
            }
        };
        attributes.sort();

        for (name, value) in attributes {
            let _ = writeln!(r, "{:<20} {}", name, value);
        }
        r.push('\n');
        r
    }

    fn close(&mut self) {
        if let Some(dir) = self.dir.take() {
            debug!(chip = %self.chip, path = %dir.display(), "Closed Super-I/O chip");
        }
    }
}

fn attribute_name(sensor_type: SensorType, index: usize) -> String {
    match sensor_type {
        SensorType::Voltage => format!("in{}_input", index),
        SensorType::Temperature => format!("temp{}_input", index),
        SensorType::Fan => format!("fan{}_input", index),
        SensorType::Control => format!("pwm{}", index),
    }
}

fn label_name(sensor_type: SensorType, index: usize) -> String {
    match sensor_type {
        SensorType::Voltage => format!("in{}_label", index),
        SensorType::Temperature => format!("temp{}_label", index),
        SensorType::Fan => format!("fan{}_label", index),
        SensorType::Control => format!("pwm{}_label", index),
    }
}

/// Enumerate channels from attribute file names, ordered by type then index
fn scan_channels(dir: &Path) -> Vec<Channel> {
    let mut channels = Vec::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %dir.display(), error = %e, "Failed to scan hwmon channels");
            return channels;
        }
    };

    for entry in entries.flatten() {
        let fname = entry.file_name();
        let fname = fname.to_string_lossy();
        let found = if let Some(idx) = extract_index(&fname, "in", "_input") {
            Some((SensorType::Voltage, idx))
        } else if let Some(idx) = extract_index(&fname, "temp", "_input") {
            Some((SensorType::Temperature, idx))
        } else if let Some(idx) = extract_index(&fname, "fan", "_input") {
            Some((SensorType::Fan, idx))
        } else {
            extract_index(&fname, "pwm", "").map(|idx| (SensorType::Control, idx))
        };

        if let Some((sensor_type, index)) = found {
            let label = read_trimmed(dir.join(label_name(sensor_type, index)))
                .ok()
                .filter(|l| !l.is_empty());
            channels.push(Channel::new(sensor_type, index, label));
        }
    }

    channels.sort_by_key(|c| (c.sensor_type, c.index));
    channels
}

fn read_trimmed<P: AsRef<Path>>(p: P) -> io::Result<String> {
    let mut s = String::new();
    fs::File::open(p)?.read_to_string(&mut s)?;
    Ok(s.trim().to_string())
}

/// `fan3_input` with prefix `fan` and suffix `_input` gives 3
pub fn extract_index(fname: &str, prefix: &str, suffix: &str) -> Option<usize> {
    if fname.len() > prefix.len() + suffix.len() && fname.starts_with(prefix) && fname.ends_with(suffix) {
        let mid = &fname[prefix.len()..fname.len() - suffix.len()];
        mid.parse().ok()
    } else {
        None
    }
}

fn hwmon_tag(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("hwmon?")
        .to_string()
}

fn hwmon_number(path: &Path) -> (usize, String) {
    let tag = hwmon_tag(path);
    let number = extract_index(&tag, "hwmon", "").unwrap_or(usize::MAX);
    (number, tag)
}
