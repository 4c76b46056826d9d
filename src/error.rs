use crate::sysfs::Level;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure to access a sysfs control file.
///
/// Opening and writing are the only two ways a control action can fail, and
/// both are treated as fatal.
#[derive(Debug, Error)]
pub enum AccessError {
    #[error("error opening {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error writing {value:?} to {}", path.display())]
    Write {
        path: PathBuf,
        value: String,
        #[source]
        source: io::Error,
    },
}

/// The step of the blink sequence that was being performed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Step {
    Export,
    Direction,
    Value(Level),
    Unexport,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Export => write!(f, "export"),
            Step::Direction => write!(f, "set direction"),
            Step::Value(level) => write!(f, "set value {}", level),
            Step::Unexport => write!(f, "unexport"),
        }
    }
}

#[derive(Debug, Error)]
#[error("{step} of gpio{pin} failed")]
pub struct Error {
    pub pin: u32,
    pub step: Step,
    #[source]
    pub source: AccessError,
}
