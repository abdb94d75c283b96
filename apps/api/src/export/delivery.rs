//! Download sinks: the only place a finished package leaves the pipeline.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::export::ExportError;

/// A complete archive ready to hand to the user.
#[derive(Debug, Clone)]
pub struct PackageFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// Where a saved package ended up.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReceipt {
    pub filename: String,
    pub bytes: usize,
    /// Present when the sink wrote to disk.
    pub path: Option<PathBuf>,
}

/// Host "trigger file download" primitive.
///
/// Implementations are only ever called with a fully built archive.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    async fn deliver(&self, package: PackageFile) -> Result<DeliveryReceipt, ExportError>;
}

// ────────────────────────────────────────────────────────────────────────────
// HTTP attachment
// ────────────────────────────────────────────────────────────────────────────

/// Holds one package until the HTTP handler turns it into an attachment response.
#[derive(Default)]
pub struct AttachmentSink {
    slot: Mutex<Option<PackageFile>>,
}

impl AttachmentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the package, leaving the sink empty.
    pub fn take(&self) -> Option<PackageFile> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }
}

#[async_trait]
impl DownloadSink for AttachmentSink {
    async fn deliver(&self, package: PackageFile) -> Result<DeliveryReceipt, ExportError> {
        let receipt = DeliveryReceipt {
            filename: package.filename.clone(),
            bytes: package.bytes.len(),
            path: None,
        };
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| ExportError::Delivery("attachment slot poisoned".to_string()))?;
        if slot.is_some() {
            return Err(ExportError::Delivery(
                "attachment sink already holds a package".to_string(),
            ));
        }
        *slot = Some(package);
        Ok(receipt)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Export directory
// ────────────────────────────────────────────────────────────────────────────

/// Saves packages into a directory. Writes go through a temp file in the same
/// directory and are renamed into place, so a failure never leaves a partial file.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, package: PackageFile) -> Result<DeliveryReceipt, ExportError> {
        let size = package.bytes.len();
        let filename = package.filename.clone();

        let path = self.dir.join(&package.filename);
        let target = path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&target, &package.bytes))
            .await
            .map_err(|e| ExportError::Delivery(format!("save task failed: {e}")))?
            .map_err(|e| ExportError::Delivery(format!("{e:#}")))?;

        info!("Saved website package to {}", path.display());
        Ok(DeliveryReceipt {
            filename,
            bytes: size,
            path: Some(path),
        })
    }
}

/// Writes `bytes` to `target` through a temp file in the same directory, then
/// renames it into place. On error the temp file is removed and `target` is untouched.
pub fn write_atomically(target: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("creating directory {}", dir.display()))?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(bytes).context("writing temp file")?;
    tmp.as_file().sync_all().context("syncing temp file")?;
    tmp.persist(target)
        .with_context(|| format!("moving file into {}", target.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str) -> PackageFile {
        PackageFile {
            filename: name.to_string(),
            bytes: Bytes::from_static(b"PK\x05\x06 fake archive"),
        }
    }

    #[tokio::test]
    async fn test_attachment_sink_hands_out_package_once() {
        let sink = AttachmentSink::new();
        let receipt = sink.deliver(package("a.zip")).await.unwrap();
        assert_eq!(receipt.filename, "a.zip");
        assert!(receipt.path.is_none());

        assert_eq!(sink.take().unwrap().filename, "a.zip");
        assert!(sink.take().is_none());
    }

    #[tokio::test]
    async fn test_attachment_sink_rejects_second_package() {
        let sink = AttachmentSink::new();
        sink.deliver(package("a.zip")).await.unwrap();
        let err = sink.deliver(package("b.zip")).await.unwrap_err();
        assert!(matches!(err, ExportError::Delivery(_)));
        assert_eq!(sink.take().unwrap().filename, "a.zip");
    }

    #[tokio::test]
    async fn test_directory_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exports = dir.path().join("exports");
        let sink = DirectorySink::new(&exports);
        let receipt = sink.deliver(package("Alex_Website_Package.zip")).await.unwrap();

        let path = receipt.path.unwrap();
        assert_eq!(path, dir.path().join("exports/Alex_Website_Package.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x05\x06 fake archive");

        let leftovers = std::fs::read_dir(&exports).unwrap().count();
        assert_eq!(leftovers, 1, "temp files must not remain");
    }

    #[tokio::test]
    async fn test_directory_sink_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let sink = DirectorySink::new(&blocker);
        let err = sink.deliver(package("x.zip")).await.unwrap_err();
        assert!(matches!(err, ExportError::Delivery(_)));
    }
}
