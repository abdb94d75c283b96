pub mod health;
pub mod notices;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::editor::handlers as editor;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API
        .route("/api/v1/export", post(export::handle_export))
        .route("/api/v1/export/preview", post(export::handle_export_preview))
        .route("/api/v1/themes", get(export::handle_list_themes))
        .route("/api/v1/notices", get(notices::handle_list_notices))
        // Editor draft API
        .route(
            "/api/v1/draft",
            get(editor::handle_get_draft).put(editor::handle_replace_draft),
        )
        .route("/api/v1/draft/theme", put(editor::handle_set_theme))
        .route("/api/v1/draft/sample", post(editor::handle_load_sample))
        .route("/api/v1/draft/reset", post(editor::handle_reset))
        .route(
            "/api/v1/draft/entries/:section",
            post(editor::handle_add_entry),
        )
        .route(
            "/api/v1/draft/entries/:section/:id",
            delete(editor::handle_remove_entry),
        )
        .route("/api/v1/draft/preview", get(editor::handle_preview_draft))
        .route("/api/v1/draft/export", post(editor::handle_export_draft))
        .route(
            "/api/v1/draft/export/save",
            post(editor::handle_save_draft_export),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use std::path::PathBuf;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use zip::ZipArchive;

    use super::*;
    use crate::config::Config;

    fn app_with(export_dir: Option<PathBuf>) -> Router {
        let config = Config {
            export_dir,
            ..Config::default()
        };
        build_router(AppState::new(config))
    }

    fn app() -> Router {
        app_with(None)
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn alex() -> Value {
        json!({
            "personalInfo": { "fullName": "Alex Johnson", "email": "alex@example.com" },
            "summary": "Builds things.",
            "skills": [{ "id": 1, "name": "Rust", "category": "Programming Languages" }]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&app(), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["service"], "vitae-api");
    }

    #[tokio::test]
    async fn test_list_themes() {
        let response = send(&app(), "GET", "/api/v1/themes", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["themes"].as_array().unwrap().len(), 5);
        assert_eq!(body["themes"][0]["id"], "professional");
        assert!(!body["skill_categories"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_export_returns_zip_attachment() {
        let app = app();
        let response = send(
            &app,
            "POST",
            "/api/v1/export",
            Some(json!({ "resume": alex(), "theme": "google" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/zip"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Alex_Johnson_Website_Package.zip\""
        );

        let bytes = body_bytes(response).await;
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut index = String::new();
        archive
            .by_name("index.html")
            .unwrap()
            .read_to_string(&mut index)
            .unwrap();
        assert!(index.contains("theme-google"));

        let notices = body_json(send(&app, "GET", "/api/v1/notices", None).await).await;
        let last = notices.as_array().unwrap().last().unwrap().clone();
        assert_eq!(last["level"], "success");
    }

    #[tokio::test]
    async fn test_export_rejects_blank_and_unknown_theme() {
        let app = app();
        let blank = send(
            &app,
            "POST",
            "/api/v1/export",
            Some(json!({ "resume": {} })),
        )
        .await;
        assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(blank).await["error"]["code"],
            "EXPORT_INPUT_UNAVAILABLE"
        );

        let theme = send(
            &app,
            "POST",
            "/api/v1/export",
            Some(json!({ "resume": alex(), "theme": "neon" })),
        )
        .await;
        assert_eq!(theme.status(), StatusCode::BAD_REQUEST);

        let shape = send(
            &app,
            "POST",
            "/api/v1/export",
            Some(json!({ "resume": { "skills": "lots" } })),
        )
        .await;
        assert_eq!(shape.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_export_preview_is_html() {
        let response = send(
            &app(),
            "POST",
            "/api/v1/export/preview",
            Some(json!({ "resume": alex() })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Alex Johnson"));
    }

    #[tokio::test]
    async fn test_draft_editing_flow() {
        let app = app();

        let draft = body_json(send(&app, "POST", "/api/v1/draft/sample", None).await).await;
        assert_eq!(draft["resume"]["personalInfo"]["fullName"], "Alex Johnson");

        let draft = body_json(
            send(
                &app,
                "POST",
                "/api/v1/draft/entries/achievements",
                Some(json!({ "title": "Speaker" })),
            )
            .await,
        )
        .await;
        let achievements = draft["resume"]["achievements"].as_array().unwrap();
        let id = achievements.last().unwrap()["id"].as_u64().unwrap();

        let response = send(
            &app,
            "DELETE",
            &format!("/api/v1/draft/entries/achievements/{id}"),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let missing = send(
            &app,
            "DELETE",
            &format!("/api/v1/draft/entries/achievements/{id}"),
            None,
        )
        .await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let unknown = send(
            &app,
            "POST",
            "/api/v1/draft/entries/hobbies",
            Some(json!({})),
        )
        .await;
        assert_eq!(unknown.status(), StatusCode::NOT_FOUND);

        let themed = send(
            &app,
            "PUT",
            "/api/v1/draft/theme",
            Some(json!({ "theme": "dark" })),
        )
        .await;
        assert_eq!(body_json(themed).await["theme"], "dark");

        let bad = send(
            &app,
            "PUT",
            "/api/v1/draft/theme",
            Some(json!({ "theme": "neon" })),
        )
        .await;
        assert_eq!(bad.status(), StatusCode::BAD_REQUEST);

        let preview = send(&app, "GET", "/api/v1/draft/preview", None).await;
        let html = String::from_utf8(body_bytes(preview).await).unwrap();
        assert!(html.contains("<body class=\"theme-dark\">"));
    }

    #[tokio::test]
    async fn test_draft_export_download() {
        let app = app();
        let empty = send(&app, "POST", "/api/v1/draft/export", None).await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        send(&app, "POST", "/api/v1/draft/sample", None).await;
        let response = send(&app, "POST", "/api/v1/draft/export", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/zip"
        );
    }

    #[tokio::test]
    async fn test_draft_export_save() {
        let disabled = send(&app(), "POST", "/api/v1/draft/export/save", None).await;
        assert_eq!(disabled.status(), StatusCode::BAD_REQUEST);

        let dir = tempfile::tempdir().unwrap();
        let app = app_with(Some(dir.path().to_path_buf()));
        send(&app, "POST", "/api/v1/draft/sample", None).await;

        let response = send(&app, "POST", "/api/v1/draft/export/save", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let receipt = body_json(response).await;
        assert_eq!(receipt["filename"], "Alex_Johnson_Website_Package.zip");
        assert!(dir
            .path()
            .join("Alex_Johnson_Website_Package.zip")
            .exists());
    }
}
