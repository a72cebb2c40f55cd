//! Input manager for reading resume and job description files

use crate::error::{Result, ResumeMatchError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::extract_by_type;
use log::info;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_type = FileType::from_path(path);
        if file_type == FileType::Unknown {
            return Err(ResumeMatchError::UnsupportedFormat(format!(
                "Unsupported file type for: {}",
                path.display()
            )));
        }

        info!("Reading {:?} file: {}", file_type, path.display());
        let bytes = fs::read(path).await?;
        let text = extract_by_type(file_type, &bytes)?;

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Read raw bytes, for callers that hand the document to the resume parser.
    pub async fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if !path.exists() {
            return Err(ResumeMatchError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(fs::read(path).await?)
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_cache_can_be_disabled() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.txt");
        std::fs::write(&path, "Rust engineer").unwrap();

        let mut manager = InputManager::new().with_cache(false);
        let text = manager.extract_text(&path).await.unwrap();
        assert_eq!(text, "Rust engineer");
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("job.md");
        std::fs::write(&path, "## Rust engineer").unwrap();

        let mut manager = InputManager::new();
        assert_eq!(manager.extract_text(&path).await.unwrap(), "Rust engineer");
        assert_eq!(manager.cache_size(), 1);
        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_read_bytes_missing_file() {
        let manager = InputManager::new();
        let result = manager.read_bytes(Path::new("does/not/exist.pdf")).await;
        assert!(matches!(result, Err(ResumeMatchError::InvalidInput(_))));
    }
}
