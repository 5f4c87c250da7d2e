//! File-backed store: one file per key under a root directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::{KvError, KvStore};

/// Durable store that keeps each key in its own file.
///
/// File names are the URL-safe base64 of the key, so any key string maps to
/// a valid file name. Writes land in a temporary sibling first and are then
/// renamed over the target, so readers see either the old or the new value.
/// The temporary file is synced before the rename.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, KvError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| KvError::Open {
                path: root.clone(),
                source,
            })?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!("{}.json", URL_SAFE_NO_PAD.encode(key.as_bytes())))
    }
}

#[async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let path = self.path_for(key);
        match tokio::fs::read(&path).await {
            // Invalid UTF-8 is the caller's decoding problem, not an I/O failure.
            Ok(bytes) => Ok(Some(
                String::from_utf8(bytes)
                    .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()),
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(KvError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), KvError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let io_err = |source| KvError::Io {
            key: key.to_string(),
            source,
        };

        let mut file = tokio::fs::File::create(&tmp).await.map_err(io_err)?;
        file.write_all(value.as_bytes()).await.map_err(io_err)?;
        file.sync_all().await.map_err(io_err)?;
        drop(file);
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;

        debug!(key, path = %path.display(), bytes = value.len(), "wrote key");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), KvError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(KvError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}
