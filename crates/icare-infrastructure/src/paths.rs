//! Path management for iCare files.
//!
//! Paths are resolved via `AppPaths` from the version-migrate crate, so the
//! platform conventions (XDG on Linux, Application Support on macOS) match
//! the other storage.
//!
//! ```text
//! ~/.config/icare/          # Config directory
//! └── care.toml             # Application configuration
//!
//! ~/.local/share/icare/     # Default data directory
//! ├── checkins.toml
//! ├── vitals.toml
//! └── ...
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use version_migrate::AppPaths;

const APP_NAME: &str = "icare";
const CONFIG_FILE: &str = "care.toml";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Home directory could not be determined.
    #[error("Cannot find home directory")]
    HomeDirNotFound,
}

pub struct CarePaths;

impl CarePaths {
    fn app_paths() -> AppPaths {
        AppPaths::new(APP_NAME)
    }

    /// Returns the configuration directory (e.g. `~/.config/icare/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the default data directory (e.g. `~/.local/share/icare/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| PathError::HomeDirNotFound)
    }

    /// Returns the path to `care.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Picks the data directory: an explicit one wins, then the default.
    ///
    /// A leading `~` in an explicit directory is expanded to the home
    /// directory.
    pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
        match explicit {
            Some(dir) => expand_home(dir),
            None => Self::data_dir(),
        }
    }
}

fn expand_home(path: &Path) -> Result<PathBuf, PathError> {
    match path.strip_prefix("~") {
        Ok(rest) => {
            let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
            Ok(home.join(rest))
        }
        Err(_) => Ok(path.to_path_buf()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_is_kept() {
        let dir = PathBuf::from("/var/lib/icare");
        assert_eq!(CarePaths::resolve_data_dir(Some(&dir)).unwrap(), dir);
    }

    #[test]
    fn test_tilde_is_expanded() {
        let Some(home) = dirs::home_dir() else {
            return;
        };

        let resolved = CarePaths::resolve_data_dir(Some(Path::new("~/care"))).unwrap();
        assert_eq!(resolved, home.join("care"));
    }

    #[test]
    fn test_config_file_name() {
        if let Ok(path) = CarePaths::config_file() {
            assert!(path.ends_with("icare/care.toml"));
        }
    }
}
