//! Local filesystem storage rooted at the upload directory

use async_trait::async_trait;
use hyper::body::Bytes;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::{DavPath, DirEntry, EntryKind, Operation, Storage, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct LocalFs {
    root: PathBuf,
}

impl LocalFs {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn full_path(&self, path: &DavPath) -> PathBuf {
        path.join_onto(&self.root)
    }
}

#[async_trait]
impl Storage for LocalFs {
    async fn ensure_root(&self) -> StorageResult<()> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::new(Operation::CreateDir, e))
    }

    async fn stat(&self, path: &DavPath) -> StorageResult<Option<EntryKind>> {
        match fs::metadata(self.full_path(path)).await {
            Ok(meta) if meta.is_file() => Ok(Some(EntryKind::File)),
            Ok(meta) if meta.is_dir() => Ok(Some(EntryKind::Directory)),
            Ok(_) => Ok(None),
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                Ok(None)
            }
            Err(e) => Err(StorageError::new(Operation::Stat, e)),
        }
    }

    async fn read(&self, path: &DavPath) -> StorageResult<Bytes> {
        fs::read(self.full_path(path))
            .await
            .map(Bytes::from)
            .map_err(|e| StorageError::new(Operation::Read, e))
    }

    async fn write(&self, path: &DavPath, data: Bytes) -> StorageResult<()> {
        let target = self.full_path(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StorageError::new(Operation::CreateDir, e))?;
        }
        fs::write(&target, &data)
            .await
            .map_err(|e| StorageError::new(Operation::Write, e))
    }

    async fn list(&self, path: &DavPath) -> StorageResult<Vec<DirEntry>> {
        let list_err = |e: io::Error| StorageError::new(Operation::List, e);
        let mut dir = fs::read_dir(self.full_path(path)).await.map_err(list_err)?;

        let mut entries = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(list_err)? {
            // Follow symlinks so a linked directory is reported as a directory
            let meta = fs::metadata(entry.path()).await.map_err(list_err)?;
            let (kind, size) = if meta.is_dir() {
                (EntryKind::Directory, 0)
            } else {
                (EntryKind::File, meta.len())
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                kind,
                size,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    fn describe(&self, path: &DavPath) -> String {
        self.full_path(path).display().to_string()
    }
}
