use crate::core::Storage;
use crate::utils::error::{CallError, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        Path::new(&self.base_path).join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        fs::read(&full_path).map_err(|e| CallError::file(path, e))
    }

    /// 先寫到同目錄的暫存檔再改名，失敗時不會留下不完整的輸出
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        fs::create_dir_all(&parent).map_err(|e| CallError::file(path, e))?;

        let mut temp = NamedTempFile::new_in(&parent).map_err(|e| CallError::file(path, e))?;
        temp.write_all(data).map_err(|e| CallError::file(path, e))?;
        temp.flush().map_err(|e| CallError::file(path, e))?;
        temp.persist(&full_path)
            .map_err(|e| CallError::file(path, e.error))?;
        Ok(())
    }
}
