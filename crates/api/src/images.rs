//! Disk-backed image persistence.

use std::path::PathBuf;

use async_trait::async_trait;
use domain::{DomainError, ImageStore};

/// Image store writing uploads into a directory and handing back
/// `/uploads/<name>` references.
#[derive(Debug, Clone)]
pub struct DiskImageStore {
    dir: PathBuf,
}

impl DiskImageStore {
    /// Creates a disk store rooted at the given directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl ImageStore for DiskImageStore {
    async fn persist(&self, bytes: Vec<u8>) -> Result<String, DomainError> {
        let name = format!("{}.bin", uuid::Uuid::new_v4());

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| DomainError::ImageStorage(err.to_string()))?;
        tokio::fs::write(self.dir.join(&name), &bytes)
            .await
            .map_err(|err| DomainError::ImageStorage(err.to_string()))?;

        Ok(format!("/uploads/{name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn persist_writes_file_and_returns_reference() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", uuid::Uuid::new_v4()));
        let store = DiskImageStore::new(&dir);

        let reference = store.persist(vec![1, 2, 3]).await.unwrap();
        assert!(reference.starts_with("/uploads/"));

        let name = reference.trim_start_matches("/uploads/");
        let written = tokio::fs::read(dir.join(name)).await.unwrap();
        assert_eq!(written, vec![1, 2, 3]);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
