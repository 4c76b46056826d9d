use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// A stand-in for /sys/class/gpio with the control nodes the kernel would
/// present once `pin` has been exported.
fn fake_sysfs(pin: u32, with_value: bool) -> Result<TempDir, Box<dyn std::error::Error>> {
    let root = tempdir()?;
    fs::write(root.path().join("export"), "")?;
    fs::write(root.path().join("unexport"), "")?;
    let pin_dir = root.path().join(format!("gpio{}", pin));
    fs::create_dir(&pin_dir)?;
    fs::write(pin_dir.join("direction"), "in")?;
    if with_value {
        fs::write(pin_dir.join("value"), "")?;
    }
    Ok(root)
}

#[allow(deprecated)]
fn blinky(root: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("blinky")?;
    cmd.env("XDG_CONFIG_HOME", root.join("xdg"))
        .env("XDG_CONFIG_DIRS", root.join("xdg-dirs"))
        .env_remove("BLINKY_CONFIG")
        .env_remove("BLINKY_PIN")
        .env_remove("BLINKY_CYCLES")
        .env_remove("BLINKY_PERIOD_MS")
        .env_remove("BLINKY_SYSFS_ROOT")
        .arg("--sysfs-root")
        .arg(root)
        .arg("--period-ms")
        .arg("0");
    Ok(cmd)
}

#[test]
fn blinks_default_pin_and_releases_it() -> Result<(), Box<dyn std::error::Error>> {
    let root = fake_sysfs(12, true)?;

    blinky(root.path())?.assert().success();

    assert_eq!(fs::read_to_string(root.path().join("export"))?, "12");
    assert_eq!(fs::read_to_string(root.path().join("gpio12/direction"))?, "out");
    assert_eq!(fs::read_to_string(root.path().join("gpio12/value"))?, "0");
    assert_eq!(fs::read_to_string(root.path().join("unexport"))?, "12");
    Ok(())
}

#[test]
fn missing_export_node_fails_fast() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;

    blinky(root.path())?
        .assert()
        .code(1)
        .stderr(predicate::str::contains("export of gpio12 failed"));

    assert!(!root.path().join("export").exists());
    Ok(())
}

#[test]
fn value_failure_leaves_pin_exported() -> Result<(), Box<dyn std::error::Error>> {
    let root = fake_sysfs(12, false)?;

    blinky(root.path())?
        .assert()
        .code(1)
        .stderr(predicate::str::contains("set value high of gpio12 failed"));

    assert_eq!(fs::read_to_string(root.path().join("export"))?, "12");
    assert_eq!(fs::read_to_string(root.path().join("unexport"))?, "");
    Ok(())
}

#[test]
fn pin_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let root = fake_sysfs(5, true)?;
    let config = root.path().join("blinky.toml");
    fs::write(&config, "pin = 5\ncycles = 2\n")?;

    blinky(root.path())?
        .arg("--config")
        .arg(&config)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(root.path().join("export"))?, "5");
    assert_eq!(fs::read_to_string(root.path().join("unexport"))?, "5");
    Ok(())
}

#[test]
fn flag_overrides_environment() -> Result<(), Box<dyn std::error::Error>> {
    let root = fake_sysfs(9, true)?;

    blinky(root.path())?
        .env("BLINKY_PIN", "4")
        .arg("--pin")
        .arg("9")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(root.path().join("export"))?, "9");
    Ok(())
}

#[test]
fn invalid_configuration_is_rejected_before_any_write() -> Result<(), Box<dyn std::error::Error>> {
    let root = fake_sysfs(12, true)?;

    blinky(root.path())?
        .env("BLINKY_CYCLES", "many")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid configuration"));

    assert_eq!(fs::read_to_string(root.path().join("export"))?, "");
    Ok(())
}
