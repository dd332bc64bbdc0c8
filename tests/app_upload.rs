use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt as _;
use tower::ServiceExt as _;

use charsheet::app::model::AppConfig;
use charsheet::app::router;

const BOUNDARY: &str = "charsheet-test-boundary";

static ELARA: &[u8] = include_bytes!("fixtures/elara.xml");

fn multipart_body(field: &str, filename: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/xml\r\n\r\n");
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("build request")
}

async fn send(
    config: &AppConfig,
    request: Request<Body>,
) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let response = router(config, None).oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();
    let json = serde_json::from_slice(&bytes)?;
    Ok((status, json))
}

#[tokio::test]
async fn upload_returns_rendered_sheet() -> anyhow::Result<()> {
    let request = upload_request(multipart_body("xmlFile", "elara.xml", ELARA));
    let (status, json) = send(&AppConfig::default(), request).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["filename"], "ElaraBrightwater.html");
    assert_eq!(json["name"], "Elara Brightwater");
    assert!(json["html"].as_str().unwrap_or_default().contains("Wizard 5"));
    Ok(())
}

#[tokio::test]
async fn upload_rejects_other_extensions() -> anyhow::Result<()> {
    let request = upload_request(multipart_body("xmlFile", "elara.json", ELARA));
    let (status, json) = send(&AppConfig::default(), request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap_or_default().contains(".xml"));
    assert!(json.get("html").is_none());
    Ok(())
}

#[tokio::test]
async fn upload_reports_malformed_xml() -> anyhow::Result<()> {
    let request = upload_request(multipart_body("xmlFile", "broken.xml", b"<root><oops>"));
    let (status, json) = send(&AppConfig::default(), request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert!(
        json["error"]
            .as_str()
            .unwrap_or_default()
            .contains("Failed to convert character")
    );
    Ok(())
}

#[tokio::test]
async fn upload_without_file_is_rejected() -> anyhow::Result<()> {
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );
    let (status, json) = send(&AppConfig::default(), upload_request(body.into_bytes())).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No file uploaded");
    Ok(())
}

#[tokio::test]
async fn file_under_another_field_is_ignored() -> anyhow::Result<()> {
    let request = upload_request(multipart_body("attachment", "elara.xml", ELARA));
    let (status, json) = send(&AppConfig::default(), request).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "No file uploaded");
    Ok(())
}

#[tokio::test]
async fn upload_over_limit_is_rejected() -> anyhow::Result<()> {
    let config = AppConfig {
        max_upload_bytes: 256,
    };
    let request = upload_request(multipart_body("xmlFile", "elara.xml", ELARA));
    let (status, json) = send(&config, request).await?;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(json["success"], false);
    Ok(())
}

#[tokio::test]
async fn healthz_and_upload_page() -> anyhow::Result<()> {
    let app = router(&AppConfig::default(), None);
    let response = app
        .clone()
        .oneshot(Request::get("/healthz").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await?.to_bytes();
    assert_eq!(&body[..], b"ok\n");

    let response = app.oneshot(Request::get("/").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await?.to_bytes();
    let page = String::from_utf8(body.to_vec())?;
    assert!(page.contains("name=\"xmlFile\""));
    assert!(page.contains("fetch('/upload'"));
    Ok(())
}

#[tokio::test]
async fn web_dir_with_index_is_served() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("index.html"), "<h1>custom upload page</h1>")?;

    let app = router(&AppConfig::default(), Some(dir.path()));
    let response = app.oneshot(Request::get("/").body(Body::empty())?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await?.to_bytes();
    assert!(String::from_utf8(body.to_vec())?.contains("custom upload page"));
    Ok(())
}
