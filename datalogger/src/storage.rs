use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use crate::errors::Result;

/// Byte-level operations on the mounted storage medium. All calls come
/// from the single-threaded main loop; concurrent callers are not
/// supported.
pub trait BlockStorage {
    /// Idempotent. A mount failure at startup is fatal: there is no
    /// degraded mode without storage.
    async fn mount(&mut self) -> Result<()>;

    /// Append-mode open, write, flush. Partial writes on power loss are
    /// an accepted risk.
    async fn append(&mut self, name: &str, data: &[u8]) -> Result<()>;

    /// Whole-file read; an absent file yields an empty buffer, not an
    /// error.
    async fn read_all(&mut self, name: &str) -> Result<Vec<u8>>;

    /// Idempotent delete; an absent file is not an error.
    async fn delete(&mut self, name: &str) -> Result<()>;

    async fn list_dir(&mut self) -> Result<Vec<String>>;

    /// Called once on graceful shutdown only.
    async fn unmount(&mut self) -> Result<()>;
}

/// Filesystem-backed storage rooted at the card's mount point.
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl BlockStorage for FsStorage {
    async fn mount(&mut self) -> Result<()> {
        fs::create_dir_all(&self.root).await?;
        info!("Storage mounted at {}", self.root.display());
        Ok(())
    }

    async fn append(&mut self, name: &str, data: &[u8]) -> Result<()> {
        let path = self.path_of(name);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .await?;
        file.write_all(data).await?;
        file.flush().await?;
        debug!("Appended {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    async fn read_all(&mut self, name: &str) -> Result<Vec<u8>> {
        match fs::read(self.path_of(name)).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&mut self, name: &str) -> Result<()> {
        let path = self.path_of(name);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_dir(&mut self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    async fn unmount(&mut self) -> Result<()> {
        info!("Storage unmounted");
        Ok(())
    }
}
