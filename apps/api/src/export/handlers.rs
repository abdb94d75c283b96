//! Axum route handlers for the export pipeline.

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::export::delivery::AttachmentSink;
use crate::export::pipeline::render_preview;
use crate::export::{ExportRequest, SnapshotSource};
use crate::models::resume::SKILL_CATEGORIES;
use crate::models::theme::Theme;
use crate::state::AppState;

pub const ZIP_CONTENT_TYPE: &str = "application/zip";

#[derive(Debug, Serialize)]
pub struct ThemeInfo {
    pub id: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ThemesResponse {
    pub themes: Vec<ThemeInfo>,
    pub skill_categories: Vec<&'static str>,
}

/// Turns the package held by `sink` into a download response.
pub fn attachment_response(sink: &AttachmentSink) -> Result<Response, AppError> {
    let package = sink
        .take()
        .ok_or_else(|| anyhow::anyhow!("export finished without delivering a package"))?;
    let disposition = content_disposition(&package.filename);

    Ok((
        [
            (header::CONTENT_TYPE, ZIP_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        package.bytes,
    )
        .into_response())
}

/// `attachment` disposition for `filename`. Non-ASCII names get an ASCII
/// `filename` fallback plus an RFC 5987 `filename*` carrying the real name.
fn content_disposition(filename: &str) -> String {
    if filename.is_ascii() {
        return format!("attachment; filename=\"{filename}\"");
    }
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() { c } else { '_' })
        .collect();
    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        encode_rfc5987(filename)
    )
}

fn encode_rfc5987(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'.' | b'-' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// POST /api/v1/export
///
/// Body: `{ "resume": ResumeData, "theme": "dark" }`. Responds with the zip.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let sink = AttachmentSink::new();
    state.exporter.export(&req, &sink).await?;
    attachment_response(&sink)
}

/// POST /api/v1/export/preview
///
/// Renders the page that `index.html` would contain, without packaging it.
pub async fn handle_export_preview(
    Json(req): Json<ExportRequest>,
) -> Result<Html<String>, AppError> {
    let snapshot = req.snapshot().await?;
    Ok(Html(render_preview(&snapshot)))
}

/// GET /api/v1/themes
pub async fn handle_list_themes() -> Json<ThemesResponse> {
    Json(ThemesResponse {
        themes: Theme::ALL
            .iter()
            .map(|t| ThemeInfo {
                id: t.id(),
                label: t.label(),
            })
            .collect(),
        skill_categories: SKILL_CATEGORIES.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_filename_is_plain() {
        assert_eq!(
            content_disposition("Alex_Johnson_Website_Package.zip"),
            "attachment; filename=\"Alex_Johnson_Website_Package.zip\""
        );
    }

    #[test]
    fn test_unicode_filename_gets_rfc5987_parameter() {
        let value = content_disposition("José_Website_Package.zip");
        assert_eq!(
            value,
            "attachment; filename=\"Jos__Website_Package.zip\"; \
             filename*=UTF-8''Jos%C3%A9_Website_Package.zip"
        );
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }
}
