/*
 * This file is part of boardmon.
 *
 * Copyright (C) 2025 boardmon contributors
 *
 * boardmon is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * boardmon is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with boardmon. If not, see <https://www.gnu.org/licenses/>.
 */

//! Command line interface

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use bm_core::constants::paths;
use bm_core::{
    find_mut, update_all, walk_mut, BoardmonError, Hardware, HardwareType, HwmonProbe, Identifier,
    JsonSettings, Mainboard, MemorySettings, Report, SensorType, Settings, Smbios, SysfsFirmwareTables,
};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "boardmon")]
#[command(version)]
#[command(about = "boardmon - mainboard identification and Super-I/O reports")]
#[command(long_about = "boardmon - mainboard identification and Super-I/O reports

Identifies the mainboard from its SMBIOS strings, lists the Super-I/O
monitoring chips the kernel has bound and prints a diagnostic report.

EXAMPLES:
    boardmon                                   Print the full report (default)
    boardmon tree                              Show the hardware tree with sensors
    boardmon tree --json                       Same, as JSON
    boardmon rename /mainboard \"Workbench\"     Rename a node
    boardmon rename /lpc/nct6798d/0/fan/2 Pump Rename a sensor
    boardmon rename /mainboard                 Reset to the detected name

ENVIRONMENT VARIABLES:
    BOARDMON_LOG=debug          Log level (stderr)
    BOARDMON_CONFIG_DIR=<dir>   Override the settings directory

FILES:
    ~/.config/boardmon/settings.json   Custom names")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Settings file (default: ~/.config/boardmon/settings.json)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not read or write the settings file
    #[arg(long)]
    pub no_save: bool,

    /// Log level or filter directive, e.g. `debug` or `bm_core=trace`
    #[arg(long, value_name = "LEVEL", env = "BOARDMON_LOG")]
    pub log_level: Option<String>,

    /// Root of the sysfs tree to read, for captured trees
    #[arg(long, value_name = "PATH", default_value = paths::SYSFS_ROOT)]
    pub sysfs_root: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the full diagnostic report (default)
    Report,

    /// Show the hardware tree and current sensor values
    Tree {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Set or reset the display name of a node or sensor
    Rename {
        /// Identifier, e.g. /mainboard or /lpc/it8688e/0/temperature/3
        identifier: String,

        /// New name; omit to reset to the detected default
        name: Option<String>,
    },
}

/// Run one command and return what should go to stdout
pub fn run(cli: &Cli) -> Result<String> {
    let settings = open_settings(cli)?;
    let mut board = detect(&cli.sysfs_root, settings);
    execute(&mut board, cli.command.clone().unwrap_or(Commands::Report))
}

/// Run `command` against a detected tree. The tree is closed whether or not
/// the command succeeds.
pub fn execute(board: &mut Mainboard, command: Commands) -> Result<String> {
    let output = dispatch(board, command);
    board.close();
    output
}

fn dispatch(board: &mut Mainboard, command: Commands) -> Result<String> {
    match command {
        Commands::Report => {
            update_all(board);
            Ok(Report::assemble(&*board, board.extensions(), board.firmware()).into_string())
        }
        Commands::Tree { json } => {
            update_all(board);
            if json {
                render_tree_json(&*board)
            } else {
                Ok(render_tree(&*board))
            }
        }
        Commands::Rename { identifier, name } => {
            let identifier: Identifier = identifier
                .parse()
                .with_context(|| format!("Invalid identifier {:?}", identifier))?;
            let new_name = rename(board, &identifier, name.as_deref())?;
            Ok(format!("{}: {}\n", identifier, new_name))
        }
    }
}

/// Open the settings store selected on the command line
pub fn open_settings(cli: &Cli) -> Result<Arc<dyn Settings>> {
    if cli.no_save {
        debug!("Using in-memory settings");
        return Ok(Arc::new(MemorySettings::new()));
    }

    let settings = match &cli.config {
        Some(path) => JsonSettings::open(path)
            .with_context(|| format!("Failed to open settings {}", path.display()))?,
        None => JsonSettings::open_default().context("Failed to open default settings")?,
    };
    info!(path = %settings.path().display(), "Using settings file");
    Ok(Arc::new(settings))
}

/// Build the hardware tree from a sysfs tree rooted at `root`
pub fn detect(root: &Path, settings: Arc<dyn Settings>) -> Mainboard {
    debug!(root = %root.display(), "Detecting hardware");
    Mainboard::new(
        Box::new(Smbios::from_root(root)),
        Box::new(HwmonProbe::from_root(root)),
        Box::new(SysfsFirmwareTables::from_root(root)),
        settings,
    )
}

/// Rename the node or sensor at `identifier`, returning the resulting name
pub fn rename(root: &mut dyn Hardware, identifier: &Identifier, name: Option<&str>) -> Result<String> {
    if let Some(node) = find_mut(root, identifier) {
        node.set_name(name)
            .with_context(|| format!("Failed to save name for {}", identifier))?;
        return Ok(node.name().to_string());
    }

    let mut outcome = None;
    walk_mut(root, &mut |node| {
        if outcome.is_some() {
            return;
        }
        if let Some(sensor) = node
            .sensors_mut()
            .iter_mut()
            .find(|s| s.identifier() == identifier)
        {
            outcome = Some(sensor.set_name(name).map(|()| sensor.name().to_string()));
        }
    });

    match outcome {
        Some(result) => result.with_context(|| format!("Failed to save name for {}", identifier)),
        None => Err(BoardmonError::HardwareNotFound(identifier.to_string()).into()),
    }
}

/// Indented text view of the tree
pub fn render_tree(root: &dyn Hardware) -> String {
    let mut out = String::new();
    write_node(&mut out, root, 0);
    out
}

fn write_node(out: &mut String, node: &dyn Hardware, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{}{} [{}] {}", indent, node.name(), node.hardware_type(), node.identifier());
    for sensor in node.sensors() {
        let _ = writeln!(
            out,
            "{}  {:<24} {:>12}  {}",
            indent,
            sensor.name(),
            sensor.format_value(),
            sensor.identifier()
        );
    }
    for child in node.sub_hardware() {
        write_node(out, child, depth + 1);
    }
}

#[derive(Debug, Serialize)]
struct NodeView {
    identifier: String,
    name: String,
    kind: HardwareType,
    parent: Option<String>,
    sensors: Vec<SensorView>,
    children: Vec<NodeView>,
}

#[derive(Debug, Serialize)]
struct SensorView {
    identifier: String,
    name: String,
    kind: SensorType,
    value: Option<f32>,
    min: Option<f32>,
    max: Option<f32>,
}

impl NodeView {
    fn from_node(node: &dyn Hardware) -> Self {
        Self {
            identifier: node.identifier().to_string(),
            name: node.name().to_string(),
            kind: node.hardware_type(),
            parent: node.parent().map(Identifier::to_string),
            sensors: node
                .sensors()
                .iter()
                .map(|s| SensorView {
                    identifier: s.identifier().to_string(),
                    name: s.name().to_string(),
                    kind: s.sensor_type(),
                    value: s.value(),
                    min: s.min(),
                    max: s.max(),
                })
                .collect(),
            children: node.sub_hardware().into_iter().map(Self::from_node).collect(),
        }
    }
}

/// Pretty JSON view of the tree
pub fn render_tree_json(root: &dyn Hardware) -> Result<String> {
    let view = NodeView::from_node(root);
    let mut json = serde_json::to_string_pretty(&view).context("Failed to serialize tree")?;
    json.push('\n');
    Ok(json)
}
