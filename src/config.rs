use anyhow::{Context, Result};
use std::path::PathBuf;

pub(crate) const DB_FILE_NAME: &str = "expensetui.db";

/// Global command-line options. Anything not recognized here is handed to
/// the CLI dispatcher untouched; an empty `command` launches the TUI.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Config {
    pub(crate) db_path: Option<PathBuf>,
    pub(crate) verbose: bool,
    pub(crate) command: Vec<String>,
}

impl Config {
    /// Parse `std::env::args()`-style input (program name first).
    pub(crate) fn from_args(args: &[String]) -> Result<Self> {
        let mut config = Self::default();
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--db" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--db requires a path"))?;
                    config.db_path = Some(PathBuf::from(expand_home(value)));
                }
                "--verbose" => config.verbose = true,
                _ => config.command.push(arg.clone()),
            }
        }
        Ok(config)
    }

    /// The database to use: `--db` if given, else the platform data directory.
    pub(crate) fn resolve_db_path(&self) -> Result<PathBuf> {
        match &self.db_path {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join(DB_FILE_NAME)),
        }
    }
}

fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

fn home_dir() -> PathBuf {
    directories::UserDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand a leading `~/` to the user's home directory.
pub(crate) fn expand_home(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest).display().to_string(),
        None => path.to_string(),
    }
}

/// Where `export` writes when no path is given.
pub(crate) fn default_export_path() -> PathBuf {
    home_dir().join(crate::report::export::DEFAULT_FILE_NAME)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
