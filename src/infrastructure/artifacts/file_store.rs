use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::ports::{ArtifactKind, ArtifactStore, ArtifactStoreError};

/// Writes artifacts as files in one directory.
///
/// Files are created exclusively; an existing file is never replaced.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    dir: PathBuf,
}

impl FileArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, kind: &ArtifactKind, run_id: &str) -> PathBuf {
        self.dir.join(kind.file_name(run_id))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ArtifactStoreError {
    ArtifactStoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn save(
        &self,
        kind: &ArtifactKind,
        run_id: &str,
        contents: &str,
    ) -> Result<PathBuf, ArtifactStoreError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| io_error(&self.dir, err))?;

        let path = self.path_for(kind, run_id);
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => ArtifactStoreError::AlreadyExists(path.clone()),
                _ => io_error(&path, err),
            })?;

        file.write_all(contents.as_bytes())
            .await
            .map_err(|err| io_error(&path, err))?;
        file.flush().await.map_err(|err| io_error(&path, err))?;

        debug!(path = %path.display(), bytes = contents.len(), "artifact saved");
        Ok(path)
    }

    async fn load(&self, kind: &ArtifactKind, run_id: &str) -> Result<String, ArtifactStoreError> {
        let path = self.path_for(kind, run_id);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|err| io_error(&path, err))
    }

    async fn exists(&self, kind: &ArtifactKind, run_id: &str) -> bool {
        tokio::fs::try_exists(self.path_for(kind, run_id))
            .await
            .unwrap_or(false)
    }

    fn location(&self, kind: &ArtifactKind, run_id: &str) -> PathBuf {
        self.path_for(kind, run_id)
    }
}
