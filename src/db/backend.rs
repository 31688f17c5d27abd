use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::info;

use crate::errors::Result;

/// String-keyed blob storage, shaped like browser local storage.
pub trait KvBackend: Send {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Stores each key as `<dir>/<key>.json`.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!("File backend ready at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvBackend for FileBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        // Atomic replace through a temp file
        let target = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &target)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    items: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backend_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get_item("urlData").unwrap(), None);
    }

    #[test]
    fn file_backend_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        {
            let mut backend = FileBackend::open(dir.path()).unwrap();
            backend.set_item("urlMappings", r#"{"abc":"http://a"}"#).unwrap();
        }
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(
            backend.get_item("urlMappings").unwrap().as_deref(),
            Some(r#"{"abc":"http://a"}"#)
        );
        assert!(!dir.path().join("urlMappings.json.tmp").exists());
    }

    #[test]
    fn memory_backend_overwrites() {
        let mut backend = MemoryBackend::new();
        backend.set_item("k", "1").unwrap();
        backend.set_item("k", "2").unwrap();
        assert_eq!(backend.get_item("k").unwrap().as_deref(), Some("2"));
    }
}
