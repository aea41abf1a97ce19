mod theme;

pub use theme::Theme;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use directories::BaseDirs;
use url::Url;

use crate::dispatch::Platform;
use crate::error::{Result, YoovaError};

const CONFIG_DIR: &str = "yoova";
const MAIN_CONFIG_FILE: &str = "config.toml";
const THEME_FILE: &str = "theme.toml";
const LOG_FILE: &str = "yoova.log";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub tick_interval_ms: u64,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    /// Tab shown on startup
    pub initial_platform: Platform,
    /// Built-in theme used when there is no theme.toml
    pub theme: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            log_level: "info".to_string(),
            log_file: None,
            initial_platform: Platform::Video,
            theme: "default".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Origin of the generation service; action paths are appended to it
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Check that `raw` is an http(s) origin and return it without a trailing slash
pub fn validate_base_url(raw: &str) -> Result<String> {
    let invalid = |reason: &str| YoovaError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query strings and fragments are not allowed"));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

pub struct ConfigManager {
    config_dir: PathBuf,
    config_path: PathBuf,
    app_config: AppConfig,
    theme: Theme,
    /// Problems found while loading, reported once logging is up
    warnings: Vec<String>,
}

impl ConfigManager {
    /// Load from the user config directory, or from `config_path` when given
    pub fn new(config_path: Option<&Path>) -> Result<Self> {
        let (config_dir, config_path) = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(YoovaError::ConfigNotFound { path: path.to_path_buf() });
                }
                let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
                (dir, path.to_path_buf())
            }
            None => {
                let dir = Self::get_config_dir()?;
                let path = dir.join(MAIN_CONFIG_FILE);
                (dir, path)
            }
        };

        Ok(Self::load_from(config_dir, config_path))
    }

    fn load_from(config_dir: PathBuf, config_path: PathBuf) -> Self {
        let mut warnings = Vec::new();
        let app_config: AppConfig = Self::load_toml_file(&config_path, &mut warnings).unwrap_or_default();
        let theme = match Self::load_toml_file(&config_dir.join(THEME_FILE), &mut warnings) {
            Some(theme) => theme,
            None => Theme::named(&app_config.general.theme).unwrap_or_else(|| {
                warnings.push(format!("Unknown theme '{}', using default", app_config.general.theme));
                Theme::default()
            }),
        };

        Self {
            config_dir,
            config_path,
            app_config,
            theme,
            warnings,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app_config
    }

    pub fn app_config_mut(&mut self) -> &mut AppConfig {
        &mut self.app_config
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Log file path: configured value, else the platform data directory
    pub fn log_file(&self) -> PathBuf {
        if let Some(path) = &self.app_config.general.log_file {
            return path.clone();
        }
        BaseDirs::new()
            .map(|dirs| dirs.data_local_dir().join(CONFIG_DIR).join(LOG_FILE))
            .unwrap_or_else(|| self.config_dir.join(LOG_FILE))
    }

    fn get_config_dir() -> Result<PathBuf> {
        BaseDirs::new()
            .map(|dirs| dirs.config_dir().join(CONFIG_DIR))
            .ok_or_else(|| YoovaError::Config("Could not determine config directory".to_string()))
    }

    fn load_toml_file<T: for<'de> Deserialize<'de>>(path: &Path, warnings: &mut Vec<String>) -> Option<T> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => Some(config),
                Err(e) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), e));
                    None
                }
            },
            Err(e) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), e));
                None
            }
        }
    }

    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)
                .map_err(|e| YoovaError::Config(format!("Failed to create config dir: {}", e)))?;
        }
        Ok(())
    }

    /// Write default config and theme files that do not exist yet.
    /// Returns the paths that were created.
    pub fn write_default_configs(&self) -> Result<Vec<PathBuf>> {
        self.ensure_config_dir()?;
        let mut written = Vec::new();

        if !self.config_path.exists() {
            let content = toml::to_string_pretty(&AppConfig::default())
                .map_err(|e| YoovaError::Config(format!("Failed to serialize config: {}", e)))?;
            std::fs::write(&self.config_path, content)
                .map_err(|e| YoovaError::Config(format!("Failed to write config: {}", e)))?;
            written.push(self.config_path.clone());
        }

        let theme_path = self.config_dir.join(THEME_FILE);
        if !theme_path.exists() {
            let content = toml::to_string_pretty(&Theme::default())
                .map_err(|e| YoovaError::Config(format!("Failed to serialize theme: {}", e)))?;
            std::fs::write(&theme_path, content)
                .map_err(|e| YoovaError::Config(format!("Failed to write theme: {}", e)))?;
            written.push(theme_path);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_app_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.general.initial_platform, Platform::Video);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_app_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.api.base_url, config.api.base_url);
        assert_eq!(parsed.general.tick_interval_ms, config.general.tick_interval_ms);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let parsed: AppConfig = toml::from_str(
            "[api]\nbase_url = \"https://gen.example.com\"\n\n[general]\ninitial_platform = \"email\"\n",
        )
        .unwrap();
        assert_eq!(parsed.api.base_url, "https://gen.example.com");
        assert_eq!(parsed.general.initial_platform, Platform::Email);
        assert_eq!(parsed.general.log_level, "info");
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(validate_base_url("http://127.0.0.1:8000").unwrap(), "http://127.0.0.1:8000");
        assert_eq!(validate_base_url("https://gen.example.com/").unwrap(), "https://gen.example.com");
        assert_eq!(validate_base_url("http://host/api/").unwrap(), "http://host/api");
        assert!(validate_base_url("ftp://host").is_err());
        assert!(validate_base_url("not a url").is_err());
        assert!(validate_base_url("http://host/?q=1").is_err());
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[api]\nbase_url = \"http://10.0.0.5:9000\"\n").unwrap();
        std::fs::write(dir.path().join(THEME_FILE), "name = \"mine\"\n").unwrap();

        let manager = ConfigManager::new(Some(&path)).unwrap();
        assert_eq!(manager.app_config().api.base_url, "http://10.0.0.5:9000");
        assert_eq!(manager.theme().name, "mine");
        assert_eq!(manager.config_dir(), dir.path());
    }

    #[test]
    fn test_builtin_theme_without_theme_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MAIN_CONFIG_FILE);
        std::fs::write(&path, "[general]\ntheme = \"vibrant\"\n").unwrap();

        let manager = ConfigManager::load_from(dir.path().to_path_buf(), path.clone());
        assert_eq!(manager.theme().name, "vibrant");
        assert!(manager.warnings().is_empty());

        std::fs::write(&path, "[general]\ntheme = \"neon\"\n").unwrap();
        let manager = ConfigManager::load_from(dir.path().to_path_buf(), path);
        assert_eq!(manager.theme().name, "default");
        assert_eq!(manager.warnings().len(), 1);
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        let dir = TempDir::new().unwrap();
        let result = ConfigManager::new(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(YoovaError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_unparsable_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(MAIN_CONFIG_FILE);
        std::fs::write(&path, "[api\nbase_url = ").unwrap();

        let manager = ConfigManager::load_from(dir.path().to_path_buf(), path);
        assert_eq!(manager.app_config().api.base_url, DEFAULT_BASE_URL);
        assert_eq!(manager.warnings().len(), 1);
        assert!(manager.warnings()[0].starts_with("Failed to parse"));
    }

    #[test]
    fn test_write_default_configs_only_once() {
        let dir = TempDir::new().unwrap();
        let config_dir = dir.path().join("yoova");
        let manager = ConfigManager::load_from(config_dir.clone(), config_dir.join(MAIN_CONFIG_FILE));

        let written = manager.write_default_configs().unwrap();
        assert_eq!(written.len(), 2);
        assert!(config_dir.join(MAIN_CONFIG_FILE).exists());
        assert!(config_dir.join(THEME_FILE).exists());

        assert!(manager.write_default_configs().unwrap().is_empty());
    }

    #[test]
    fn test_configured_log_file_wins() {
        let dir = TempDir::new().unwrap();
        let mut manager = ConfigManager::load_from(dir.path().to_path_buf(), dir.path().join(MAIN_CONFIG_FILE));
        manager.app_config_mut().general.log_file = Some(dir.path().join("x.log"));
        assert_eq!(manager.log_file(), dir.path().join("x.log"));
    }
}
