use dirs::home_dir;
use std::{env, fs, path::Path, path::PathBuf};

use crate::errors::Result;

const DEFAULT_DIR_NAME: &str = ".budgeteer";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "BUDGETEER_HOME";

/// Resolves the on-disk locations used by the client.
pub struct PathResolver;

impl PathResolver {
    /// Application data directory, `$BUDGETEER_HOME` or `~/.budgeteer`.
    pub fn base_dir() -> PathBuf {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return PathBuf::from(custom);
        }
        home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME)
    }

    pub fn config_file_in(base: &Path) -> PathBuf {
        base.join(CONFIG_FILE)
    }
}

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}
