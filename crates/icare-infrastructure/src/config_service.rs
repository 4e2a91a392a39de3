//! Configuration service.
//!
//! Loads `care.toml` through the versioned config migrator. A missing file
//! yields the defaults; nothing is written until [`ConfigService::save`].

use crate::dto::create_care_config_migrator;
use crate::paths::CarePaths;
use crate::storage::AtomicTomlFile;
use icare_core::config::CareConfig;
use icare_core::error::{CareError, Result};
use std::path::{Path, PathBuf};

pub struct ConfigService {
    file: AtomicTomlFile<toml::Value>,
}

impl ConfigService {
    /// Uses the platform config location.
    pub fn new() -> Result<Self> {
        let path = CarePaths::config_file().map_err(|e| CareError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Uses an explicit config file (for `--config` and tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Loads the configuration, migrating older schema versions.
    ///
    /// Files written by hand without a `version` key are read as the
    /// current schema.
    pub fn load(&self) -> Result<CareConfig> {
        let Some(mut value) = self
            .file
            .load()
            .map_err(|e| CareError::config(format!("{}: {}", self.path().display(), e)))?
        else {
            tracing::debug!(path = %self.path().display(), "No config file, using defaults");
            return Ok(CareConfig::default());
        };

        if let toml::Value::Table(table) = &mut value {
            table
                .entry("version")
                .or_insert(toml::Value::String("1.1.0".to_string()));
        }

        let migrator = create_care_config_migrator();
        migrator
            .load_flat_from("care_config", value)
            .map_err(|e| {
                CareError::config(format!(
                    "Failed to migrate config '{}': {}",
                    self.path().display(),
                    e
                ))
            })
    }

    /// Writes the configuration in the latest schema version.
    pub fn save(&self, config: &CareConfig) -> Result<()> {
        let migrator = create_care_config_migrator();
        let json_str = migrator
            .save_domain_flat("care_config", config.clone())
            .map_err(|e| CareError::config(format!("Failed to serialize config: {}", e)))?;
        let value: toml::Value = serde_json::from_str(&json_str)?;

        let _lock = self.file.lock()?;
        self.file.save(&value)?;

        tracing::info!(path = %self.path().display(), "Config saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use icare_core::config::LogFormat;
    use icare_core::event::TransitionPolicy;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("care.toml"));

        assert_eq!(service.load().unwrap(), CareConfig::default());
        assert!(!service.path().exists());
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("care.toml"));
        let config = CareConfig {
            data_dir: Some(PathBuf::from("/srv/icare")),
            log_level: "debug".to_string(),
            log_format: LogFormat::Json,
            event_transitions: TransitionPolicy::Permissive,
        };

        service.save(&config).unwrap();

        assert_eq!(service.load().unwrap(), config);
        let raw = fs::read_to_string(service.path()).unwrap();
        assert!(raw.contains("version = \"1.1.0\""));
    }

    #[test]
    fn test_hand_written_file_without_version() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.toml");
        fs::write(&path, "event_transitions = \"permissive\"\n").unwrap();

        let config = ConfigService::with_path(path).load().unwrap();

        assert_eq!(config.event_transitions, TransitionPolicy::Permissive);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_old_file_is_migrated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.toml");
        fs::write(&path, "version = \"1.0.0\"\nlog_format = \"json\"\n").unwrap();

        let config = ConfigService::with_path(path).load().unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.event_transitions, TransitionPolicy::Strict);
    }

    #[test]
    fn test_unparsable_file_is_a_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("care.toml");
        fs::write(&path, "log_level = ").unwrap();

        let err = ConfigService::with_path(path).load().unwrap_err();
        assert!(matches!(err, CareError::Config(_)));
    }
}
