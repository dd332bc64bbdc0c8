use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::Json;

use crate::app::model::{UPLOAD_FIELD, UploadResponse};
use crate::convert;

type UploadResult = (StatusCode, Json<UploadResponse>);

pub async fn upload(mut multipart: Multipart) -> UploadResult {
    let (filename, bytes) = loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return reject(StatusCode::BAD_REQUEST, "No file uploaded"),
            Err(err) => return multipart_error(err),
        };
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        match field.bytes().await {
            Ok(bytes) => break (filename, bytes),
            Err(err) => return multipart_error(err),
        }
    };

    if !has_xml_extension(&filename) {
        return reject(StatusCode::BAD_REQUEST, "Only .xml files are allowed");
    }
    tracing::info!(%filename, bytes = bytes.len(), "received character export");

    let converted = tokio::task::spawn_blocking(move || convert::convert_xml(&bytes)).await;
    match converted {
        Ok(Ok(sheet)) => (StatusCode::OK, Json(UploadResponse::converted(sheet))),
        Ok(Err(err)) => {
            tracing::warn!(%filename, error = %format!("{err:#}"), "conversion failed");
            reject(
                StatusCode::BAD_REQUEST,
                format!("Failed to convert character: {err:#}"),
            )
        }
        Err(err) => {
            tracing::error!(%filename, ?err, "conversion task failed");
            reject(StatusCode::INTERNAL_SERVER_ERROR, "Conversion task failed")
        }
    }
}

pub fn has_xml_extension(filename: &str) -> bool {
    std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}

fn reject(status: StatusCode, error: impl Into<String>) -> UploadResult {
    (status, Json(UploadResponse::failed(error)))
}

fn multipart_error(err: MultipartError) -> UploadResult {
    let status = err.status();
    tracing::warn!(%status, error = %err.body_text(), "rejected upload");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return reject(status, "File is too large");
    }
    reject(status, format!("Invalid upload: {}", err.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_xml_extensions_pass() {
        assert!(has_xml_extension("hero.xml"));
        assert!(has_xml_extension("HERO.XML"));
        assert!(has_xml_extension("dir/hero.Xml"));
        assert!(!has_xml_extension("hero.json"));
        assert!(!has_xml_extension("xml"));
        assert!(!has_xml_extension("hero.xml.exe"));
    }
}
