//! Simulation Integration Tests
//!
//! Drives the simulator from a configuration file the way the binary does.

use std::io::Write;

use clap::Parser;
use motion_cli::{CliArgs, SimSettings, Simulator};
use motion_core::{LayoutMode, MotionConfig, TypewriterPhase};

fn config_file(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write config");
    file
}

#[test]
fn test_config_file_drives_simulation() {
    let file = config_file(
        r#"{"variant":"static","description":"ok","typewriter":{"generating_delay_ms":500}}"#,
    );
    let config = MotionConfig::from_path(file.path()).expect("load config");

    let mut sim = Simulator::new(&config, SimSettings::default());
    let mut out = Vec::new();
    sim.run(1000, 100, &mut out).expect("run");

    assert_eq!(sim.page().typewriter().phase(), TypewriterPhase::Done);
    assert_eq!(sim.page().typewriter().prefix(), "ok");
    assert!(sim.page().connectors().is_none());
}

#[test]
fn test_invalid_config_file_is_rejected() {
    let file = config_file(r#"{"stagger":{"trigger_fraction":-0.5}}"#);
    assert!(MotionConfig::from_path(file.path()).is_err());
}

#[test]
fn test_cli_resize_schedule_flips_layout() {
    let args = CliArgs::try_parse_from([
        "portfolio-motion",
        "--width",
        "1280",
        "--resize",
        "300:500",
        "--resize",
        "600:1280",
    ])
    .expect("valid args");

    let mut sim = Simulator::new(&MotionConfig::default(), SimSettings::from(&args));
    assert_eq!(sim.step(0).page.mode, LayoutMode::Wide);
    assert_eq!(sim.step(300).page.mode, LayoutMode::Narrow);
    let frame = sim.step(600);
    assert_eq!(frame.page.mode, LayoutMode::Wide);
    assert_eq!(frame.page.connectors.len(), 6);
}
