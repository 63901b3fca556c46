/*
 * Integration tests for boardmon
 *
 * These tests build a fake sysfs tree on disk and drive detection, naming
 * and reporting end to end through the public API.
 */

use std::fs;
use std::path::Path;
use std::sync::Arc;

use bm_core::{
    update_all, Chip, Hardware, HardwareType, JsonSettings, Manufacturer, Model, Report, Settings,
};
use boardmon::cli::{self, Cli, Commands};
use clap::Parser;
use tempfile::TempDir;

// Test utilities
fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn tamg_table() -> Vec<u8> {
    let mut record = vec![0u8; 56];
    record[..5].copy_from_slice(b"VCORE");
    record[32] = 2;
    record[33..35].copy_from_slice(&0x0010u16.to_le_bytes());
    record[44..48].copy_from_slice(&1200i32.to_le_bytes());

    let mut table = b"TAMG\x40\x00\x00\x00".to_vec();
    table.extend_from_slice(b"$HEALTH$");
    table.extend_from_slice(&[0u8; 8]);
    table.extend_from_slice(&1i32.to_le_bytes());
    table.extend_from_slice(&[0u8; 12]);
    table.extend_from_slice(&record);
    table
}

/// Gigabyte Z390 board with an IT8688E, an IT8792E and a non Super-I/O sensor
fn gigabyte_sysfs() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    let dmi = "sys/class/dmi/id";
    write(root, &format!("{}/board_vendor", dmi), "Gigabyte Technology Co., Ltd.\n");
    write(root, &format!("{}/board_name", dmi), "Z390 AORUS PRO WIFI\n");
    write(root, &format!("{}/board_version", dmi), "x.x\n");
    write(root, &format!("{}/bios_vendor", dmi), "American Megatrends Inc.\n");
    write(root, &format!("{}/bios_version", dmi), "F12\n");

    let hwmon = "sys/class/hwmon";
    write(root, &format!("{}/hwmon0/name", hwmon), "acpitz\n");
    write(root, &format!("{}/hwmon0/temp1_input", hwmon), "27800\n");

    write(root, &format!("{}/hwmon2/name", hwmon), "it8688\n");
    write(root, &format!("{}/hwmon2/in0_input", hwmon), "1188\n");
    write(root, &format!("{}/hwmon2/temp1_input", hwmon), "33000\n");
    write(root, &format!("{}/hwmon2/temp3_input", hwmon), "45000\n");
    write(root, &format!("{}/hwmon2/fan1_input", hwmon), "1250\n");
    write(root, &format!("{}/hwmon2/pwm1", hwmon), "255\n");

    write(root, &format!("{}/hwmon3/name", hwmon), "it8792\n");
    write(root, &format!("{}/hwmon3/temp1_input", hwmon), "38000\n");
    write(root, &format!("{}/hwmon3/temp1_label", hwmon), "PCIEX8\n");

    let path = root.join("sys/firmware/acpi/tables/TAMG");
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, tamg_table()).unwrap();

    tmp
}

fn settings_at(dir: &TempDir) -> Arc<dyn Settings> {
    Arc::new(JsonSettings::open(dir.path().join("settings.json")).unwrap())
}

#[test]
fn test_detection_from_sysfs() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let board = cli::detect(sysfs.path(), settings_at(&config));

    assert_eq!(board.manufacturer(), Manufacturer::Gigabyte);
    assert_eq!(board.model(), Model::Z390_AORUS_PRO_WIFI);
    assert_eq!(board.name(), "Gigabyte Z390 AORUS PRO WIFI");

    let chips: Vec<Chip> = board.super_io().iter().map(|c| c.chip()).collect();
    assert_eq!(chips, vec![Chip::IT8688E, Chip::IT8792E]);

    let ids: Vec<String> = board
        .sub_hardware()
        .iter()
        .map(|c| c.identifier().to_string())
        .collect();
    assert_eq!(ids, vec!["/lpc/it8688e/0", "/lpc/it8792e/1"]);
}

#[test]
fn test_sensor_labels_and_values() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    update_all(&mut board);

    let it8688 = &board.super_io()[0];
    let names: Vec<&str> = it8688.sensors().iter().map(|s| s.name()).collect();
    assert_eq!(names, vec!["Vcore", "System #1", "CPU", "CPU Fan", "CPU Fan"]);

    let cpu = &it8688.sensors()[2];
    assert_eq!(cpu.identifier().to_string(), "/lpc/it8688e/0/temperature/3");
    assert_eq!(cpu.value(), Some(45.0));
    assert_eq!(it8688.sensors()[4].value(), Some(100.0));

    // no board table for the second chip, driver label wins
    let it8792 = &board.super_io()[1];
    assert_eq!(it8792.sensors()[0].name(), "PCIEX8");
}

#[test]
fn test_full_report() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    update_all(&mut board);

    let report = Report::assemble(&board, board.extensions(), board.firmware()).into_string();

    let root = report.find("Mainboard\n\nName: Gigabyte Z390 AORUS PRO WIFI").unwrap();
    let bios = report.find("BIOS Vendor: American Megatrends Inc.").unwrap();
    let lpc = report.find("hwmon2: it8688 -> ITE IT8688E").unwrap();
    let tamg = report.find("Gigabyte TAMG").unwrap();
    let first = report.find("SuperIO\n\nName: ITE IT8688E").unwrap();
    let second = report.find("SuperIO\n\nName: ITE IT8792E").unwrap();

    assert!(root < bios && bios < lpc && lpc < tamg && tamg < first && first < second);
    assert!(report.contains("hwmon0: acpitz (not a Super-I/O chip)"));
    assert!(report.contains(" Sensor Name[0]: VCORE"));
    assert_eq!(report.matches("Gigabyte TAMG").count(), 1);
    assert!(report.contains("temp3_input          45000"));
}

#[test]
fn test_empty_sysfs() {
    let sysfs = TempDir::new().unwrap();
    let config = TempDir::new().unwrap();
    let board = cli::detect(sysfs.path(), settings_at(&config));

    assert_eq!(board.name(), "Unknown");
    assert_eq!(board.manufacturer(), Manufacturer::Unknown);
    assert!(board.sub_hardware().is_empty());

    let report = board.report();
    assert!(report.contains("No SMBIOS data available"));
    assert!(!report.contains("LPC (hwmon"));
    assert!(!report.contains("TAMG"));
}

#[test]
fn test_renames_persist_across_runs() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();

    {
        let mut board = cli::detect(sysfs.path(), settings_at(&config));
        let name = cli::rename(&mut board, &"/mainboard".parse().unwrap(), Some("Workbench")).unwrap();
        assert_eq!(name, "Workbench");

        let sensor = "/lpc/it8688e/0/temperature/3".parse().unwrap();
        let name = cli::rename(&mut board, &sensor, Some("CPU Socket")).unwrap();
        assert_eq!(name, "CPU Socket");
        board.close();
    }

    let saved = fs::read_to_string(config.path().join("settings.json")).unwrap();
    assert!(saved.contains("\"/mainboard/name\": \"Workbench\""));

    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    assert_eq!(board.name(), "Workbench");
    assert_eq!(board.super_io()[0].sensors()[2].name(), "CPU Socket");

    let name = cli::rename(&mut board, &"/mainboard".parse().unwrap(), None).unwrap();
    assert_eq!(name, "Gigabyte Z390 AORUS PRO WIFI");
    let reopened = settings_at(&config);
    assert_eq!(reopened.get_value("/mainboard/name", ""), "Gigabyte Z390 AORUS PRO WIFI");
}

#[test]
fn test_rename_unknown_identifier() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let mut board = cli::detect(sysfs.path(), settings_at(&config));

    let err = cli::rename(&mut board, &"/lpc/nct6798d/0".parse().unwrap(), Some("x")).unwrap_err();
    assert!(err.to_string().contains("/lpc/nct6798d/0"));
}

#[test]
fn test_tree_json() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let board = cli::detect(sysfs.path(), settings_at(&config));

    let json: serde_json::Value = serde_json::from_str(&cli::render_tree_json(&board).unwrap()).unwrap();
    assert_eq!(json["identifier"], "/mainboard");
    assert_eq!(json["kind"], "Mainboard");
    assert_eq!(json["children"].as_array().unwrap().len(), 2);
    assert_eq!(json["children"][0]["parent"], "/mainboard");
    assert_eq!(json["children"][0]["kind"], "SuperIO");

    let text = cli::render_tree(&board);
    assert!(text.starts_with("Gigabyte Z390 AORUS PRO WIFI [Mainboard] /mainboard\n"));
    assert!(text.contains("  ITE IT8688E [SuperIO] /lpc/it8688e/0\n"));
}

#[test]
fn test_close_releases_chips() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let mut board = cli::detect(sysfs.path(), settings_at(&config));

    board.close();
    board.close();
    assert!(board.super_io().iter().all(|c| c.is_closed()));
    assert!(!board.report().contains("LPC (hwmon"));
    assert_eq!(board.super_io()[0].hardware_type(), HardwareType::SuperIO);
}

#[test]
fn test_failed_rename_still_closes_chips() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();

    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    let bad_identifier = Commands::Rename {
        identifier: "not-an-identifier".to_string(),
        name: Some("Rig".to_string()),
    };
    assert!(cli::execute(&mut board, bad_identifier).is_err());
    assert!(!board.super_io().is_empty());
    assert!(board.super_io().iter().all(|c| c.is_closed()));

    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    let unknown_node = Commands::Rename {
        identifier: "/lpc/nct6798d/0".to_string(),
        name: None,
    };
    assert!(cli::execute(&mut board, unknown_node).is_err());
    assert!(board.super_io().iter().all(|c| c.is_closed()));
}

#[test]
fn test_successful_command_closes_chips() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();

    let mut board = cli::detect(sysfs.path(), settings_at(&config));
    let text = cli::execute(&mut board, Commands::Tree { json: false }).unwrap();
    assert!(text.starts_with("Gigabyte Z390 AORUS PRO WIFI [Mainboard] /mainboard\n"));
    assert!(board.super_io().iter().all(|c| c.is_closed()));
}

#[test]
fn test_cli_run_end_to_end() {
    let sysfs = gigabyte_sysfs();
    let config = TempDir::new().unwrap();
    let settings = config.path().join("settings.json");
    let sysfs_arg = sysfs.path().to_str().unwrap();
    let settings_arg = settings.to_str().unwrap();

    let cli = Cli::try_parse_from([
        "boardmon",
        "--sysfs-root",
        sysfs_arg,
        "--config",
        settings_arg,
        "rename",
        "/mainboard",
        "Rig",
    ])
    .unwrap();
    assert_eq!(cli::run(&cli).unwrap(), "/mainboard: Rig\n");

    let cli = Cli::try_parse_from(["boardmon", "--sysfs-root", sysfs_arg, "--config", settings_arg]).unwrap();
    let report = cli::run(&cli).unwrap();
    assert!(report.contains("Name: Rig"));
    assert!(report.contains("Sensors\n"));

    let cli = Cli::try_parse_from([
        "boardmon",
        "--sysfs-root",
        sysfs_arg,
        "--no-save",
        "rename",
        "not-an-identifier",
    ])
    .unwrap();
    assert!(cli::run(&cli).is_err());
}
