// Static-site export pipeline.
// Stages run strictly in order: html → styles → bundle → archive → delivery.
// Only archive compression and directory saves leave the async executor (spawn_blocking).

pub mod archive;
pub mod bundle;
pub mod delivery;
pub mod handlers;
pub mod html;
pub mod pipeline;
pub mod styles;

use thiserror::Error;

use crate::models::theme::UnknownTheme;

pub use pipeline::{ExportRequest, ExportService, ResumeSnapshot, SnapshotSource};

/// Every way an export can fail. Messages from [`ExportError::user_message`] are
/// safe to show; the `Display` form may carry internal detail and is only logged.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("An export is already in progress")]
    InProgress,

    #[error("Resume unavailable: {0}")]
    InputUnavailable(String),

    #[error("Resume data has an unexpected shape: {0}")]
    Serialization(String),

    #[error(transparent)]
    UnknownTheme(#[from] UnknownTheme),

    #[error("Archive construction failed: {0}")]
    Packaging(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        ExportError::Packaging(e.to_string())
    }
}

impl ExportError {
    pub fn user_message(&self) -> String {
        match self {
            ExportError::InProgress => {
                "An export is already running. Please wait for it to finish.".to_string()
            }
            ExportError::InputUnavailable(reason) => {
                format!("Nothing to export yet: {reason}.")
            }
            ExportError::Serialization(_) => {
                "The resume data could not be read. Check the form fields and try again."
                    .to_string()
            }
            ExportError::UnknownTheme(e) => format!("{e}. Pick one of the listed themes."),
            ExportError::Packaging(_) => {
                "Could not build the website package. Please try again.".to_string()
            }
            ExportError::Delivery(_) => {
                "The website package could not be saved. Please try again.".to_string()
            }
        }
    }
}
