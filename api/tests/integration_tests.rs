//! Integration tests for the API.
//!
//! These drive the real router end to end with a scripted vision backend,
//! so every test exercises the actual multipart intake, artifact
//! lifecycle, and error mapping.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{VerifyError, VerifyResult};
use labsafe_api::{build_router, ApiConfig, AppState};
use labsafe_inference::{EncodedImage, InferenceReply, VisionBackend};
use storage::ArtifactStore;
use tempfile::TempDir;
use tower::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "labsafe-test-boundary";

const COMPLIANT_REPLY: &str =
    "Helmet: Yes\nGreen safety coat: Yes\nSafety boots: Yes\nFinal Compliance: Safe";

/// Backend that always answers with a fixed reply.
struct ScriptedBackend(InferenceReply);

#[async_trait]
impl VisionBackend for ScriptedBackend {
    async fn infer(&self, _image: &EncodedImage) -> VerifyResult<InferenceReply> {
        Ok(self.0.clone())
    }
}

/// Backend that always fails at the transport level.
struct FailingBackend;

#[async_trait]
impl VisionBackend for FailingBackend {
    async fn infer(&self, _image: &EncodedImage) -> VerifyResult<InferenceReply> {
        Err(VerifyError::inference_status(503, "upstream unavailable"))
    }
}

fn scripted(reply: &str) -> Arc<dyn VisionBackend> {
    Arc::new(ScriptedBackend(InferenceReply::Text(reply.to_string())))
}

fn test_state(dir: &TempDir, backend: Arc<dyn VisionBackend>) -> Arc<AppState> {
    let artifacts = ArtifactStore::new(dir.path().join("uploads")).expect("upload area");
    Arc::new(AppState::new(artifacts, backend))
}

fn app(state: Arc<AppState>) -> Router {
    build_router(state, &ApiConfig::default())
}

fn upload_count(state: &AppState) -> usize {
    std::fs::read_dir(state.artifacts.root()).expect("upload area").count()
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a str, &'a [u8]),
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, mime, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let response = app(state)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "labsafe-server");
}

#[tokio::test]
async fn test_verify_safety_compliant_image() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request(
        "/verify-safety",
        &[Part::File("image", "worker.jpg", "image/jpeg", b"fake-jpeg")],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["result"], COMPLIANT_REPLY);
    assert_eq!(json["verdict"]["helmet"], "yes");
    assert_eq!(json["verdict"]["greenSafetyCoat"], "yes");
    assert_eq!(json["verdict"]["safetyBoots"], "yes");
    assert_eq!(json["verdict"]["overall"], "safe");

    // The temporary artifact must be gone once the response is out.
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_verify_safety_overrides_contradictory_claim() {
    let dir = TempDir::new().unwrap();
    let state = test_state(
        &dir,
        scripted("Helmet: No\nGreen safety coat: Yes\nSafety boots: Yes\nFinal Compliance: Safe"),
    );

    let request = multipart_request(
        "/verify-safety",
        &[Part::File("image", "worker.jpg", "image/jpeg", b"fake-jpeg")],
    );
    let response = app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["verdict"]["helmet"], "no");
    assert_eq!(json["verdict"]["overall"], "unsafe");
}

#[tokio::test]
async fn test_verify_safety_empty_reply_degrades() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(ScriptedBackend(InferenceReply::Empty)));

    let request = multipart_request(
        "/verify-safety",
        &[Part::File("image", "worker.jpg", "image/jpeg", b"fake-jpeg")],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["result"], "No result from Gemini");
    assert_eq!(json["verdict"]["overall"], "undetermined");
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_verify_safety_without_image_is_client_error() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request("/verify-safety", &[Part::Text("note", "no image here")]);
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "missing_image");

    // Nothing may have been written: the store is never touched.
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_verify_safety_empty_image_part_is_client_error() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request(
        "/verify-safety",
        &[Part::File("image", "empty.jpg", "image/jpeg", b"")],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_verify_safety_releases_artifact_on_inference_failure() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, Arc::new(FailingBackend));

    let request = multipart_request(
        "/verify-safety",
        &[Part::File("image", "worker.jpg", "image/jpeg", b"fake-jpeg")],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "inference_error");

    // The artifact was stored, then released on the failure path.
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_google_auth_creates_then_recognizes_user() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let body = serde_json::json!({
        "email": "ada@example.com",
        "name": "Ada",
        "googleId": "g-123",
    });

    let response = app(state.clone())
        .oneshot(json_request("/google-auth", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = json_body(response).await;
    assert_eq!(created["message"], "User created and login successful");
    let user_id = created["user"]["id"].as_str().unwrap().to_string();

    let response = app(state)
        .oneshot(json_request("/google-auth", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let existing = json_body(response).await;
    assert_eq!(existing["message"], "User exists, login successful");
    assert_eq!(existing["user"]["id"], user_id.as_str());
}

#[tokio::test]
async fn test_google_auth_requires_email_and_google_id() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let response = app(state)
        .oneshot(json_request(
            "/google-auth",
            serde_json::json!({"name": "Nameless"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_with_image_persists_upload() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request(
        "/report",
        &[
            Part::Text("userId", "u-1"),
            Part::Text("description", "chemical spill in lab 3"),
            Part::File("image", "spill.png", "image/png", b"png-bytes"),
        ],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "Report created successfully");
    let image_url = json["report"]["imageUrl"].as_str().unwrap().to_string();
    assert!(image_url.starts_with("/uploads/"));

    // Report photos are kept, not released.
    assert_eq!(upload_count(&state), 1);

    // And the kept file is served statically.
    let response = app(state)
        .oneshot(
            Request::builder()
                .uri(image_url.as_str())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"png-bytes");
}

#[tokio::test]
async fn test_report_without_image() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request(
        "/report",
        &[
            Part::Text("userId", "u-1"),
            Part::Text("description", "missing goggles"),
        ],
    );
    let response = app(state.clone()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert!(json["report"]["imageUrl"].is_null());
    assert_eq!(upload_count(&state), 0);
}

#[tokio::test]
async fn test_report_requires_user_and_description() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request("/report", &[Part::Text("userId", "u-1")]);
    let response = app(state).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"]["code"], "invalid_request");
}

#[tokio::test]
async fn test_get_reports_lists_created_reports() {
    let dir = TempDir::new().unwrap();
    let state = test_state(&dir, scripted(COMPLIANT_REPLY));

    let request = multipart_request(
        "/report",
        &[
            Part::Text("userId", "u-7"),
            Part::Text("description", "frayed wiring"),
        ],
    );
    app(state.clone()).oneshot(request).await.unwrap();

    let response = app(state)
        .oneshot(
            Request::builder()
                .uri("/get-reports")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0]["userId"], "u-7");
    assert_eq!(reports[0]["status"], "pending");
}
