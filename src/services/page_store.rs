use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::WikiError;
use crate::types::Page;

const PAGE_SUFFIX: &str = ".txt";
const TEMP_SUFFIX: &str = ".tmp";

/// One file per page under a fixed storage root.
///
/// Titles are not checked here; callers validate them first.
#[derive(Clone)]
pub struct PageStore {
    root: Arc<PathBuf>,
}

impl PageStore {
    pub fn new(root: PathBuf) -> Self {
        debug!("Creating PageStore with storage root: {:?}", root);
        Self { root: Arc::new(root) }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Backing file for `title`: `<root>/<title>.txt`
    pub fn page_path(&self, title: &str) -> PathBuf {
        self.root.join(format!("{title}{PAGE_SUFFIX}"))
    }

    /// Create the storage root if it is missing and clear out temp files
    /// left behind by saves that never finished.
    pub async fn ensure_root(&self) -> Result<(), WikiError> {
        tokio::fs::create_dir_all(self.root.as_path()).await?;

        let mut entries = tokio::fs::read_dir(self.root.as_path()).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if !(name.starts_with('.') && name.ends_with(TEMP_SUFFIX)) {
                continue;
            }
            match tokio::fs::remove_file(entry.path()).await {
                Ok(()) => info!("Removed stale temp file {:?}", entry.path()),
                Err(e) => warn!("Could not remove stale temp file {:?}: {}", entry.path(), e),
            }
        }
        Ok(())
    }

    pub async fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        match tokio::fs::read(&path).await {
            Ok(body) => {
                debug!("Loaded page '{}', {} bytes", title, body.len());
                Ok(Page::new(title, body))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No backing file for page '{}' at {:?}", title, path);
                Err(WikiError::PageNotFound(title.to_string()))
            }
            Err(e) => {
                error!("Failed to read page file {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    /// Replace the whole body of a page.
    ///
    /// The body goes to a hidden temp file that is then renamed over the
    /// target, so readers see either the old body or the new one.
    pub async fn save(&self, page: &Page) -> Result<(), WikiError> {
        let target = self.page_path(&page.title);
        let tmp = TempFile::new(self.root.join(format!(".{}{TEMP_SUFFIX}", Uuid::new_v4())));

        if let Err(e) = write_private(tmp.path(), &page.body).await {
            error!("Failed to write temp file {:?}: {}", tmp.path(), e);
            return Err(WikiError::StorageWrite(e));
        }
        if let Err(e) = tokio::fs::rename(tmp.path(), &target).await {
            error!("Failed to move {:?} into place at {:?}: {}", tmp.path(), target, e);
            return Err(WikiError::StorageWrite(e));
        }
        tmp.persisted();

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }
}

/// Removes the temp file on drop unless it was renamed into place. Covers
/// early returns and a save future that is dropped mid-write.
struct TempFile {
    path: PathBuf,
    armed: bool,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn persisted(mut self) {
        self.armed = false;
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if self.armed {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

async fn write_private(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut options = tokio::fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(body).await?;
    file.sync_all().await?;
    Ok(())
}
