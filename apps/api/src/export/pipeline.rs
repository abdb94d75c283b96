//! Export orchestration.
//!
//! Flow: snapshot → render_resume_html → compose_styles → build_bundle →
//!       package_archive (spawn_blocking) → DownloadSink::deliver.
//!
//! One export runs at a time per service. The in-flight flag is released on
//! every exit path, success or failure.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::export::archive::{archive_filename, package_archive};
use crate::export::bundle::{build_bundle, display_name, render_document, AssetBundle};
use crate::export::delivery::{DeliveryReceipt, DownloadSink, PackageFile};
use crate::export::html::render_resume_html;
use crate::export::styles::compose_styles;
use crate::export::ExportError;
use crate::models::resume::ResumeData;
use crate::models::theme::Theme;
use crate::notices::{NoticeLevel, Notifier};

// ────────────────────────────────────────────────────────────────────────────
// Snapshots
// ────────────────────────────────────────────────────────────────────────────

/// Owned copy of the resume and theme taken when an export starts.
/// Later edits to the source never reach an export already underway.
#[derive(Debug, Clone, PartialEq)]
pub struct ResumeSnapshot {
    pub resume: ResumeData,
    pub theme: Theme,
}

/// Supplies the "current resume" and "current theme" to the exporter.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn snapshot(&self) -> Result<ResumeSnapshot, ExportError>;
}

/// Request body for exporting a resume supplied inline.
///
/// `resume` stays untyped until the export runs so that shape errors surface as
/// export failures (and notices) instead of bare extractor rejections.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub resume: Value,
    #[serde(default)]
    pub theme: Option<String>,
}

#[async_trait]
impl SnapshotSource for ExportRequest {
    async fn snapshot(&self) -> Result<ResumeSnapshot, ExportError> {
        if self.resume.is_null() {
            return Err(ExportError::InputUnavailable(
                "no resume data was supplied".to_string(),
            ));
        }
        let resume = ResumeData::deserialize(&self.resume)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        let theme = match self.theme.as_deref() {
            Some(id) => id.parse::<Theme>()?,
            None => Theme::default(),
        };
        Ok(ResumeSnapshot { resume, theme })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pure stages
// ────────────────────────────────────────────────────────────────────────────

/// Runs the serializer, style composer and bundle builder.
pub fn assemble_bundle(snapshot: &ResumeSnapshot) -> AssetBundle {
    let fragment = render_resume_html(&snapshot.resume, snapshot.theme);
    let styles = compose_styles(snapshot.theme);
    build_bundle(
        &fragment,
        &styles,
        snapshot.resume.owner_name(),
        snapshot.theme,
    )
}

/// Full `index.html` for the in-app preview. Identical to the exported page.
pub fn render_preview(snapshot: &ResumeSnapshot) -> String {
    let fragment = render_resume_html(&snapshot.resume, snapshot.theme);
    render_document(
        &fragment,
        display_name(snapshot.resume.owner_name()),
        snapshot.theme,
    )
}

/// Builds the archive for a snapshot. Compression runs on the blocking pool.
pub async fn build_package(snapshot: &ResumeSnapshot) -> Result<PackageFile, ExportError> {
    let filename = archive_filename(snapshot.resume.owner_name());
    let bundle = assemble_bundle(snapshot);
    info!(
        "Bundle assembled for '{}': [{}], {} bytes",
        bundle.display_name,
        bundle.paths().collect::<Vec<_>>().join(", "),
        bundle.total_bytes()
    );

    let bytes = tokio::task::spawn_blocking(move || package_archive(&bundle))
        .await
        .map_err(|e| ExportError::Packaging(format!("compression task failed: {e}")))??;

    Ok(PackageFile {
        filename,
        bytes: Bytes::from(bytes),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Service
// ────────────────────────────────────────────────────────────────────────────

/// The "export website package" trigger shared by all export endpoints.
pub struct ExportService {
    notifier: Arc<dyn Notifier>,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ExportService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Runs one export end to end and hands the archive to `sink`.
    ///
    /// Rejects with [`ExportError::InProgress`] while another export is running;
    /// the rejected call never touches `source` or `sink`.
    pub async fn export(
        &self,
        source: &dyn SnapshotSource,
        sink: &dyn DownloadSink,
    ) -> Result<DeliveryReceipt, ExportError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            let err = ExportError::InProgress;
            self.notifier.notify(NoticeLevel::Info, &err.user_message());
            return Err(err);
        };

        self.notifier
            .notify(NoticeLevel::Info, "Generating website package...");

        match self.run(source, sink).await {
            Ok(receipt) => {
                self.notifier.notify(
                    NoticeLevel::Success,
                    &format!("Website package ready: {}", receipt.filename),
                );
                Ok(receipt)
            }
            Err(e) => {
                error!("Export failed: {e}");
                self.notifier.notify(NoticeLevel::Error, &e.user_message());
                Err(e)
            }
        }
    }

    async fn run(
        &self,
        source: &dyn SnapshotSource,
        sink: &dyn DownloadSink,
    ) -> Result<DeliveryReceipt, ExportError> {
        let snapshot = source.snapshot().await?;
        if snapshot.resume.is_blank() {
            return Err(ExportError::InputUnavailable(
                "the resume has no content yet".to_string(),
            ));
        }

        let package = build_package(&snapshot).await?;
        info!(
            "Archive {} built ({} bytes, theme {})",
            package.filename,
            package.bytes.len(),
            snapshot.theme
        );

        sink.deliver(package).await
    }
}
