use serde::{Deserialize, Serialize};
use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    core::utils::{ensure_dir, PathResolver},
    errors::{BudgetError, Result},
};

pub const DEFAULT_API_URL: &str = "https://budgeteer.x01r.xyz";
const API_URL_ENV: &str = "BUDGETEER_API_URL";
const TOKEN_ENV: &str = "BUDGETEER_TOKEN";
const TMP_SUFFIX: &str = "tmp";

/// Client settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub locale: String,
    pub currency: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            token: None,
            locale: "en-US".into(),
            currency: "USD".into(),
        }
    }
}

impl ClientConfig {
    /// Applies `BUDGETEER_API_URL` / `BUDGETEER_TOKEN` on top of the stored values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(url) = non_empty_env(API_URL_ENV) {
            self.api_url = url;
        }
        if let Some(token) = non_empty_env(TOKEN_ENV) {
            self.token = Some(token);
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.api_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(BudgetError::Config(format!(
                "api_url `{}` must start with http:// or https://",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Loads and stores [`ClientConfig`] as JSON inside the application directory.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<ClientConfig> {
        if !self.path.exists() {
            return Ok(ClientConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: ClientConfig = serde_json::from_str(&data)
            .map_err(|err| BudgetError::Config(format!("{}: {err}", self.path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_all(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_all(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn save_then_load_returns_same_settings() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();
        let config = ClientConfig {
            api_url: "http://localhost:3000".into(),
            token: Some("abc".into()),
            ..ClientConfig::default()
        };
        manager.save(&config).unwrap();
        assert!(manager.path().exists());
        assert!(!tmp_path(manager.path()).exists());
        assert_eq!(manager.load().unwrap(), config);
    }

    #[test]
    fn rejects_urls_without_scheme() {
        let config = ClientConfig {
            api_url: "budgeteer.local".into(),
            ..ClientConfig::default()
        };
        let err = config.validate().expect_err("scheme required");
        assert!(matches!(err, BudgetError::Config(_)));
    }

    #[test]
    fn corrupt_file_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), "{ not json").unwrap();
        assert!(matches!(manager.load(), Err(BudgetError::Config(_))));
    }
}
