use super::rendering::RenderConfig;
use super::window::WindowConfig;
use crate::utils::error::ConfigError;
use directories::ProjectDirs;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub window: WindowConfig,
    pub rendering: RenderConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            window: WindowConfig::default(),
            rendering: RenderConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads `config.toml` from the platform config directory.
    pub fn load_or_create() -> Result<Self, ConfigError> {
        Self::load_or_create_at(&Self::config_path()?)
    }

    /// Loads the config at `path`, writing the defaults there first if the
    /// file does not exist yet.
    pub fn load_or_create_at(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let default_config = Self::default();
            fs::write(path, toml::to_string_pretty(&default_config)?)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(default_config);
        }

        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let proj_dirs =
            ProjectDirs::from("com", "MetroManDevTeam", "quadshader").ok_or(ConfigError::NoConfigDir)?;
        Ok(proj_dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = AppConfig::load_or_create_at(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        // Second load reads back what was written.
        assert_eq!(AppConfig::load_or_create_at(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
log_level = "debug"

[rendering]
clear_colour = [0.0, 0.0, 0.0, 1.0]

[rendering.shaders]
fragment = "shaders/quad.frag"
"#,
        )
        .unwrap();

        let config = AppConfig::load_or_create_at(&path).unwrap();
        assert_eq!(config.log_level().unwrap(), LevelFilter::Debug);
        assert_eq!(config.rendering.clear_colour, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(config.rendering.gl_version, [4, 1]);
        assert_eq!(config.rendering.shaders.vertex, None);
        assert_eq!(
            config.rendering.shaders.fragment,
            Some(PathBuf::from("shaders/quad.frag"))
        );
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(
            AppConfig::load_or_create_at(&path),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_log_level() {
        let config = AppConfig {
            log_level: "loud".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.log_level(),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
