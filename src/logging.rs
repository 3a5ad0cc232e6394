use anyhow::{Context, Result};
use log::LevelFilter;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::config::Config;

pub fn level_for(config: &Config) -> LevelFilter {
    if config.debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

pub fn open_log_file<P: AsRef<Path>>(path: P) -> Result<File> {
    let path = path.as_ref();
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("error opening log file {}", path.display()))
}

/// Routes the `log` facade to `LogPath`, or stderr when no path is set.
/// Debug lines only appear when the config has `Debug` on.
pub fn init(config: &Config) -> Result<()> {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level_for(config))
        .filter_module("hyper", LevelFilter::Info)
        .filter_module("hyper_util", LevelFilter::Info)
        .filter_module("reqwest", LevelFilter::Info)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                chrono::Local::now().format("%Y/%m/%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        });

    if !config.log_path.is_empty() {
        let file = open_log_file(&config.log_path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")?;
    Ok(())
}
