use crate::core::Storage;
use crate::utils::error::{PresetError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Files relative to the repository root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
    atomic: bool,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            atomic: true,
        }
    }

    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    fn write_atomic(&self, full_path: &Path, data: &str) -> Result<()> {
        let dir = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp = NamedTempFile::new_in(dir).map_err(|e| PresetError::file(dir, e))?;
        temp.write_all(data.as_bytes())?;
        temp.as_file().sync_all()?;

        // Keep the mode of the file being replaced.
        if let Ok(metadata) = fs::metadata(full_path) {
            temp.as_file().set_permissions(metadata.permissions())?;
        }

        temp.persist(full_path)
            .map_err(|e| PresetError::file(full_path, e.error))?;
        Ok(())
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }

    fn read_to_string(&self, path: &str) -> Result<String> {
        let full_path = self.resolve(path);
        fs::read_to_string(&full_path).map_err(|e| PresetError::file(full_path, e))
    }

    fn write_string(&self, path: &str, data: &str) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| PresetError::file(parent, e))?;
            }
        }

        if self.atomic {
            self.write_atomic(&full_path, data)
        } else {
            fs::write(&full_path, data).map_err(|e| PresetError::file(full_path, e))
        }
    }
}
