//! Atomic TOML file operations.
//!
//! Every record collection lives in its own TOML file. Writers take an
//! exclusive lock on a sibling `.lock` file, write a temporary file, fsync
//! it and rename it over the original, so a reader never sees a half
//! written collection.

use chrono::Local;
use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic TOML operations.
#[derive(Debug)]
pub enum AtomicTomlError {
    /// File I/O error.
    IoError(std::io::Error),
    /// TOML deserialization error.
    TomlError(toml::de::Error),
    /// TOML serialization error.
    TomlSerError(toml::ser::Error),
    /// File locking error.
    LockError(String),
}

impl AtomicTomlError {
    /// The file exists but its contents could not be parsed.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, AtomicTomlError::TomlError(_))
    }
}

impl std::fmt::Display for AtomicTomlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicTomlError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicTomlError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            AtomicTomlError::TomlSerError(e) => write!(f, "TOML serialization error: {}", e),
            AtomicTomlError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicTomlError {}

impl From<std::io::Error> for AtomicTomlError {
    fn from(e: std::io::Error) -> Self {
        AtomicTomlError::IoError(e)
    }
}

impl From<toml::de::Error> for AtomicTomlError {
    fn from(e: toml::de::Error) -> Self {
        AtomicTomlError::TomlError(e)
    }
}

impl From<toml::ser::Error> for AtomicTomlError {
    fn from(e: toml::ser::Error) -> Self {
        AtomicTomlError::TomlSerError(e)
    }
}

impl From<AtomicTomlError> for icare_core::CareError {
    fn from(e: AtomicTomlError) -> Self {
        match e {
            AtomicTomlError::IoError(e) => e.into(),
            AtomicTomlError::TomlError(e) => e.into(),
            AtomicTomlError::TomlSerError(e) => e.into(),
            AtomicTomlError::LockError(msg) => icare_core::CareError::io(msg),
        }
    }
}

/// A handle to one TOML file written with tmp file + rename.
pub struct AtomicTomlFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicTomlFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the TOML file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = toml::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the TOML file atomically.
    ///
    /// Does not lock. Callers doing read-modify-write hold [`Self::lock`]
    /// around the whole cycle.
    pub fn save(&self, data: &T) -> Result<(), AtomicTomlError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write cycle.
    ///
    /// `default_value` stands in for a missing or empty file. If `f` fails
    /// nothing is written.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), AtomicTomlError>
    where
        F: FnOnce(&mut T) -> Result<(), AtomicTomlError>,
    {
        let _lock = self.lock()?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)?;

        Ok(())
    }

    /// Acquires the exclusive writer lock for this file.
    pub fn lock(&self) -> Result<FileLock, AtomicTomlError> {
        FileLock::acquire(&self.path)
    }

    /// Moves an unreadable file aside as `<name>.corrupt-<timestamp>`.
    ///
    /// Returns the new location, or `None` when there was nothing to move.
    pub fn quarantine(&self) -> Result<Option<PathBuf>, AtomicTomlError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let file_name = self.file_name()?;
        let stamp = Local::now().format("%Y%m%d%H%M%S%3f");
        let target = self.parent()?.join(format!("{}.corrupt-{}", file_name, stamp));
        fs::rename(&self.path, &target)?;

        Ok(Some(target))
    }

    fn temp_path(&self) -> Result<PathBuf, AtomicTomlError> {
        let tmp_name = format!(".{}.tmp", self.file_name()?);
        Ok(self.parent()?.join(tmp_name))
    }

    fn parent(&self) -> Result<&Path, AtomicTomlError> {
        self.path.parent().ok_or_else(|| {
            AtomicTomlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Path has no parent directory",
            ))
        })
    }

    fn file_name(&self) -> Result<String, AtomicTomlError> {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                AtomicTomlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "Path has no file name",
                ))
            })
    }
}

/// Exclusive lock guard. Released when dropped.
///
/// The `.lock` file is never removed; every writer locks the same inode.
pub struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicTomlError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive().map_err(|e| {
                AtomicTomlError::LockError(format!(
                    "Failed to acquire lock on {}: {}",
                    lock_path.display(),
                    e
                ))
            })?;
        }

        Ok(FileLock { file })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tally {
        ward: String,
        count: u32,
    }

    fn tally(count: u32) -> Tally {
        Tally {
            ward: "icu".to_string(),
            count,
        }
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Tally>::new(temp_dir.path().join("tally.toml"));

        file.save(&tally(42)).unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded, tally(42));
    }

    #[test]
    fn test_missing_and_empty_files_load_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tally.toml");
        let file = AtomicTomlFile::<Tally>::new(path.clone());

        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_update_accumulates() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Tally>::new(temp_dir.path().join("tally.toml"));

        file.update(tally(0), |t| {
            t.count += 10;
            Ok(())
        })
        .unwrap();
        file.update(tally(0), |t| {
            t.count += 5;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap().unwrap().count, 15);
    }

    #[test]
    fn test_failed_update_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Tally>::new(temp_dir.path().join("tally.toml"));
        file.save(&tally(1)).unwrap();

        let result = file.update(tally(0), |t| {
            t.count = 99;
            Err(AtomicTomlError::LockError("rejected".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap().unwrap().count, 1);
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tally.toml");
        let file = AtomicTomlFile::<Tally>::new(path.clone());

        file.save(&tally(42)).unwrap();

        assert!(!temp_dir.path().join(".tally.toml.tmp").exists());
        assert!(path.exists());
    }

    #[test]
    fn test_corrupt_file_is_reported_and_quarantined() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tally.toml");
        fs::write(&path, "ward = [unterminated").unwrap();
        let file = AtomicTomlFile::<Tally>::new(path.clone());

        let err = file.load().unwrap_err();
        assert!(err.is_corrupt());

        let moved = file.quarantine().unwrap().unwrap();
        assert!(!path.exists());
        assert!(moved.exists());
        assert!(
            moved
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("tally.toml.corrupt-")
        );
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_quarantine_without_file_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicTomlFile::<Tally>::new(temp_dir.path().join("tally.toml"));

        assert!(file.quarantine().unwrap().is_none());
    }
}
