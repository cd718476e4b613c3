use crate::domain::ports::Storage;
use crate::utils::error::{Result, ValidatorError};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Filesystem storage rooted at a base directory. Used by batch mode only.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }
}

/// Request-scoped storage that never touches the disk. Uploads go in, the
/// workbook comes out, and everything is dropped with the request.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: &str, data: Vec<u8>) -> Self {
        let files = HashMap::from([(path.to_string(), data)]);
        Self {
            files: Arc::new(RwLock::new(files)),
        }
    }

    pub fn put(&self, path: &str, data: Vec<u8>) -> Result<()> {
        let mut files = self
            .files
            .write()
            .map_err(|_| std::io::Error::other("memory storage lock poisoned"))?;
        files.insert(path.to_string(), data);
        Ok(())
    }

    /// Removes and returns a stored file.
    pub fn take(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().ok()?.remove(path)
    }

    pub fn len(&self) -> usize {
        self.files.read().map(|files| files.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Storage for MemoryStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let files = self
            .files
            .read()
            .map_err(|_| std::io::Error::other("memory storage lock poisoned"))?;
        files.get(path).cloned().ok_or_else(|| ValidatorError::NotFound {
            path: path.to_string(),
        })
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.put(path, data.to_vec())
    }
}
