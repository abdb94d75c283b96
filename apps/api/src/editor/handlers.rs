//! Axum route handlers for the editor draft.

use axum::{
    extract::{Path, State},
    response::{Html, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::editor::store::{Draft, EntrySection};
use crate::errors::AppError;
use crate::export::delivery::{AttachmentSink, DeliveryReceipt, DirectorySink};
use crate::export::handlers::attachment_response;
use crate::export::pipeline::render_preview;
use crate::export::SnapshotSource;
use crate::models::resume::ResumeData;
use crate::models::theme::Theme;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ThemeUpdate {
    pub theme: String,
}

/// GET /api/v1/draft
pub async fn handle_get_draft(State(state): State<AppState>) -> Json<Draft> {
    Json(state.drafts.current().await)
}

/// PUT /api/v1/draft
///
/// Replaces the resume wholesale. Entries without an id get one.
pub async fn handle_replace_draft(
    State(state): State<AppState>,
    Json(resume): Json<ResumeData>,
) -> Result<Json<Draft>, AppError> {
    Ok(Json(state.drafts.replace_resume(resume).await?))
}

/// PUT /api/v1/draft/theme
pub async fn handle_set_theme(
    State(state): State<AppState>,
    Json(req): Json<ThemeUpdate>,
) -> Result<Json<Draft>, AppError> {
    let theme: Theme = req
        .theme
        .parse()
        .map_err(|e| AppError::Validation(format!("{e}")))?;
    Ok(Json(state.drafts.set_theme(theme).await?))
}

/// POST /api/v1/draft/sample
pub async fn handle_load_sample(State(state): State<AppState>) -> Result<Json<Draft>, AppError> {
    Ok(Json(state.drafts.load_sample().await?))
}

/// POST /api/v1/draft/reset
pub async fn handle_reset(State(state): State<AppState>) -> Result<Json<Draft>, AppError> {
    Ok(Json(state.drafts.reset().await?))
}

/// POST /api/v1/draft/entries/:section
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(entry): Json<Value>,
) -> Result<Json<Draft>, AppError> {
    let section: EntrySection = section.parse()?;
    Ok(Json(state.drafts.add_entry(section, entry).await?))
}

/// DELETE /api/v1/draft/entries/:section/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, u64)>,
) -> Result<Json<Draft>, AppError> {
    let section: EntrySection = section.parse()?;
    Ok(Json(state.drafts.remove_entry(section, id).await?))
}

/// GET /api/v1/draft/preview
pub async fn handle_preview_draft(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.drafts.snapshot().await?;
    Ok(Html(render_preview(&snapshot)))
}

/// POST /api/v1/draft/export
///
/// The editor's "export website package" action: snapshots the current draft
/// and returns the archive as a download.
pub async fn handle_export_draft(State(state): State<AppState>) -> Result<Response, AppError> {
    let sink = AttachmentSink::new();
    state.exporter.export(state.drafts.as_ref(), &sink).await?;
    attachment_response(&sink)
}

/// POST /api/v1/draft/export/save
///
/// Same as `handle_export_draft`, but the archive is written into `EXPORT_DIR`.
pub async fn handle_save_draft_export(
    State(state): State<AppState>,
) -> Result<Json<DeliveryReceipt>, AppError> {
    let dir = state.config.export_dir.clone().ok_or_else(|| {
        AppError::Validation("Server-side export is disabled (EXPORT_DIR is not set)".to_string())
    })?;
    let sink = DirectorySink::new(dir);
    let receipt = state.exporter.export(state.drafts.as_ref(), &sink).await?;
    Ok(Json(receipt))
}
