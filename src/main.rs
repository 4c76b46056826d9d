// Toggle a GPIO pin through the sysfs interface, then release it.
mod config;
mod controller;
mod delay;
mod error;
mod sysfs;

use clap::Parser;
use config::Overrides;
use controller::PinController;
use delay::ThreadSleep;
use eyre::{Result, WrapErr};
use std::path::PathBuf;
use std::process::ExitCode;
use sysfs::Sysfs;
use tracing::{error, info};

use git_version::git_version;
const GIT_VERSION: &str = git_version!(args = ["--always", "--dirty"], fallback = "unknown");

#[derive(Parser, Debug)]
#[command(
    name = "blinky",
    about = "Blink a GPIO pin using the Linux sysfs GPIO interface.",
    version
)]
struct Opts {
    /// The GPIO number to blink.
    #[arg(short, long)]
    pin: Option<u32>,

    /// Number of high/low cycles.
    #[arg(short, long)]
    cycles: Option<u32>,

    /// Time spent at each level, in milliseconds.
    #[arg(long, value_name = "MS")]
    period_ms: Option<u64>,

    /// Root of the sysfs GPIO class directory.
    #[arg(long, value_name = "DIR")]
    sysfs_root: Option<PathBuf>,

    /// Configuration file, instead of the one found in the XDG config dirs.
    #[arg(long, value_name = "FILE", env = "BLINKY_CONFIG")]
    config: Option<PathBuf>,

    /// Log more; repeat for more detail.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opts {
    fn overrides(&self) -> Overrides {
        Overrides {
            pin: self.pin,
            cycles: self.cycles,
            period_ms: self.period_ms,
            sysfs_root: self.sysfs_root.clone(),
        }
    }
}

fn init_logging(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting default subscriber failed")
}

fn run(opts: &Opts) -> Result<()> {
    let config = config::load_config(opts.config.as_deref(), &opts.overrides())?;
    let mut controller = PinController::new(&config, Sysfs, ThreadSleep);
    controller
        .run()
        .wrap_err_with(|| format!("blinking gpio{} aborted", config.pin))?;
    Ok(())
}

fn main() -> ExitCode {
    let opts = Opts::parse();
    if let Err(e) = init_logging(opts.verbose) {
        eprintln!("{:#}", e);
        return ExitCode::FAILURE;
    }
    info!("Starting blinky version {}", GIT_VERSION);

    match run(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
