use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        tracing::debug!("Reading {}", full_path.display());
        let data = fs::read(full_path)?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        tracing::debug!("Writing {} bytes to {}", data.len(), full_path.display());
        fs::write(full_path, data)?;
        Ok(())
    }
}

/// Keeps files in a map. Writes to a path listed in `read_only` fail.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    files: RefCell<HashMap<String, Vec<u8>>>,
    read_only: Vec<String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.files.borrow_mut().insert(path.into(), data.into());
        self
    }

    pub fn with_read_only(mut self, path: impl Into<String>) -> Self {
        self.read_only.push(path.into());
        self
    }

    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }
}

impl Storage for InMemoryStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        self.files.borrow().get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path)).into()
        })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        if self.read_only.iter().any(|p| p == path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is read-only", path),
            )
            .into());
        }

        self.files.borrow_mut().insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
