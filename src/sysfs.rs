//! The sysfs GPIO control surface.
//!
//! Every control action on a sysfs GPIO is "open a control node, write a short
//! ASCII token, close it". [`ControlFile`] is that one primitive, so the rest of
//! the program can run against a recording fake instead of `/sys/class/gpio`.

use crate::error::AccessError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::trace;

pub const DEFAULT_ROOT: &str = "/sys/class/gpio";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    High,
    Low,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::High => "1",
            Level::Low => "0",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::High => write!(f, "high"),
            Level::Low => write!(f, "low"),
        }
    }
}

/// Only output is ever configured.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Out,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Out => "out",
        }
    }
}

/// Control node paths for one pin under a sysfs GPIO root.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GpioPaths {
    root: PathBuf,
    pin: u32,
}

impl GpioPaths {
    pub fn new(root: impl Into<PathBuf>, pin: u32) -> Self {
        Self {
            root: root.into(),
            pin,
        }
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn export(&self) -> PathBuf {
        self.root.join("export")
    }

    pub fn unexport(&self) -> PathBuf {
        self.root.join("unexport")
    }

    /// The per-pin directory the kernel creates on export.
    pub fn pin_dir(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.pin))
    }

    pub fn direction(&self) -> PathBuf {
        self.pin_dir().join("direction")
    }

    pub fn value(&self) -> PathBuf {
        self.pin_dir().join("value")
    }
}

pub trait ControlFile {
    fn write_to_file(&mut self, path: &Path, value: &str) -> Result<(), AccessError>;
}

impl<T: ControlFile + ?Sized> ControlFile for &mut T {
    fn write_to_file(&mut self, path: &Path, value: &str) -> Result<(), AccessError> {
        (**self).write_to_file(path, value)
    }
}

/// Writes straight to the filesystem.
///
/// Control nodes are opened write-only and never created; a missing node is an
/// error, just as the kernel would report for an unexported pin.
#[derive(Debug, Default)]
pub struct Sysfs;

impl ControlFile for Sysfs {
    fn write_to_file(&mut self, path: &Path, value: &str) -> Result<(), AccessError> {
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|source| AccessError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        file.write_all(value.as_bytes())
            .map_err(|source| AccessError::Write {
                path: path.to_path_buf(),
                value: value.to_string(),
                source,
            })?;
        trace!("Wrote {:?} to {}", value, path.display());
        Ok(())
    }
}
