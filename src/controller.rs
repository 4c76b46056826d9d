use crate::config::BlinkConfig;
use crate::delay::Delay;
use crate::error::{Error, Result, Step};
use crate::sysfs::{ControlFile, Direction, GpioPaths, Level};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, span};

/// Drives one pin through export, output configuration, a fixed number of
/// high/low cycles and unexport.
///
/// The controller keeps no record of the pin's state; that lives in the
/// kernel. The first failed write ends the sequence and nothing is rolled
/// back, so a failure after export leaves the pin exported.
pub struct PinController<F, D> {
    paths: GpioPaths,
    cycles: u32,
    period: Duration,
    files: F,
    delay: D,
}

impl<F: ControlFile, D: Delay> PinController<F, D> {
    pub fn new(config: &BlinkConfig, files: F, delay: D) -> Self {
        Self {
            paths: GpioPaths::new(&config.sysfs_root, config.pin),
            cycles: config.cycles,
            period: config.period,
            files,
            delay,
        }
    }

    pub fn pin(&self) -> u32 {
        self.paths.pin()
    }

    fn write(&mut self, step: Step, path: &Path, value: &str) -> Result<()> {
        debug!("{}: writing {:?} to {}", step, value, path.display());
        self.files
            .write_to_file(path, value)
            .map_err(|source| Error {
                pin: self.paths.pin(),
                step,
                source,
            })
    }

    pub fn export(&mut self) -> Result<()> {
        let pin = self.pin().to_string();
        self.write(Step::Export, &self.paths.export(), &pin)
    }

    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.write(Step::Direction, &self.paths.direction(), direction.as_str())
    }

    pub fn set_value(&mut self, level: Level) -> Result<()> {
        self.write(Step::Value(level), &self.paths.value(), level.as_str())
    }

    pub fn blink(&mut self) -> Result<()> {
        for cycle in 0..self.cycles {
            debug!("Cycle {}/{}", cycle + 1, self.cycles);
            self.set_value(Level::High)?;
            self.delay.delay(self.period);
            self.set_value(Level::Low)?;
            self.delay.delay(self.period);
        }
        Ok(())
    }

    pub fn unexport(&mut self) -> Result<()> {
        let pin = self.pin().to_string();
        self.write(Step::Unexport, &self.paths.unexport(), &pin)
    }

    pub fn run(&mut self) -> Result<()> {
        let _span_ =
            span!(tracing::Level::INFO, "PinController::run", pin = self.pin()).entered();
        self.export()?;
        info!("Exported gpio{}", self.pin());
        self.set_direction(Direction::Out)?;
        info!(
            "Blinking {} cycles with a {:?} period",
            self.cycles, self.period
        );
        self.blink()?;
        self.unexport()?;
        info!("Unexported gpio{}", self.pin());
        Ok(())
    }
}
