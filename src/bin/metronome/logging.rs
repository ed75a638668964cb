//! Log setup. The terminal belongs to the TUI, so logs go to a file.

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use env_logger::{Builder, Env, Target};
use std::fs::File;
use std::path::PathBuf;

const DEFAULT_LOG_FILTER: &str = "info";

pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("saavy-metronome.log")
}

pub fn init() -> EyreResult<()> {
    let path = log_path();
    let file = File::create(&path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .target(Target::Pipe(Box::new(file)))
        .init();

    Ok(())
}
