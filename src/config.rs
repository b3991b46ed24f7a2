// ABOUTME: Optional user configuration loaded from ~/.enterthematrix/config.toml
// Every field has a default so a missing file or section behaves like an empty one

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

const CONFIG_DIR_NAME: &str = ".enterthematrix";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub docker: DockerConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// Overrides socket discovery, e.g. `unix:///var/run/docker.sock` or `tcp://host:2375`.
    pub host: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Command started inside the container.
    pub command: Vec<String>,
    /// Delay before the first resize is sent to the remote TTY.
    pub resize_settle_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            command: vec!["/bin/bash".to_string()],
            resize_settle_ms: 100,
        }
    }
}

impl SessionConfig {
    pub const fn resize_settle_delay(&self) -> Duration {
        Duration::from_millis(self.resize_settle_ms)
    }
}

impl AppConfig {
    /// Directory holding the config file and logs.
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .map(|home| home.join(CONFIG_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join(CONFIG_FILE_NAME)
    }

    /// Load the user config, falling back to defaults when the file is absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        if config.session.command.is_empty() {
            warn!("Config has an empty session command, using /bin/bash");
            config.session.command = SessionConfig::default().command;
        }

        Ok(config)
    }

    /// Like [`AppConfig::load`], but a broken file only costs a warning.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config: {:#}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&temp_dir.path().join("config.toml")).unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.session.command, vec!["/bin/bash".to_string()]);
        assert_eq!(
            config.session.resize_settle_delay(),
            Duration::from_millis(100)
        );
        assert!(config.docker.host.is_none());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[docker]\nhost = \"tcp://10.0.0.2:2375\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.docker.host.as_deref(), Some("tcp://10.0.0.2:2375"));
        assert_eq!(config.session, SessionConfig::default());
    }

    #[test]
    fn test_session_section_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[session]\ncommand = [\"/bin/sh\", \"-l\"]\nresize_settle_ms = 250\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(
            config.session.command,
            vec!["/bin/sh".to_string(), "-l".to_string()]
        );
        assert_eq!(
            config.session.resize_settle_delay(),
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_empty_command_falls_back_to_bash() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ncommand = []\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.session.command, vec!["/bin/bash".to_string()]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session\ncommand = ").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
