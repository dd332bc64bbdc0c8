use serde::{Deserialize, Serialize};

use crate::convert::RenderedSheet;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Multipart field the upload page sends the export under.
pub const UPLOAD_FIELD: &str = "xmlFile";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub max_upload_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

/// JSON envelope returned by `POST /upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UploadResponse {
    Converted {
        success: bool,
        html: String,
        filename: String,
        name: String,
    },
    Failed {
        success: bool,
        error: String,
    },
}

impl UploadResponse {
    pub fn converted(sheet: RenderedSheet) -> Self {
        UploadResponse::Converted {
            success: true,
            html: sheet.html,
            filename: sheet.filename,
            name: sheet.name,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        UploadResponse::Failed {
            success: false,
            error: error.into(),
        }
    }
}
