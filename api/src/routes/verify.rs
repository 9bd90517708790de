//! The verification orchestrator.
//!
//! One request flows store → encode → infer → parse, and the stored
//! artifact is released on every path that reached storage, before any
//! response is produced.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::Json;
use common::{ComplianceVerdict, VerifyError, VerifyResult};
use labsafe_inference::{codec, parser, InferenceReply};
use serde::{Deserialize, Serialize};
use storage::ArtifactHandle;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extract;
use crate::state::AppState;

/// Legacy stand-in for an empty reply in the `result` field, kept for
/// callers of the original API.
const NO_RESULT_TEXT: &str = "No result from Gemini";

/// Verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifySafetyResponse {
    /// Raw reply text. Legacy field: existing callers parse this
    /// themselves; prefer `verdict`.
    pub result: String,
    /// Structured verdict derived from the reply.
    pub verdict: ComplianceVerdict,
}

/// `POST /verify-safety` — multipart field `image`.
pub async fn verify_safety(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<Json<VerifySafetyResponse>> {
    let request_id = Uuid::new_v4();

    let payload = extract::collect(multipart).await?;
    // A missing or empty image part never reaches the artifact store.
    let upload = payload
        .image_with_content()
        .ok_or(VerifyError::MissingInput)?;

    tracing::info!(
        request_id = %request_id,
        file = ?upload.file_name,
        mime = %upload.mime_type,
        "verification request received"
    );

    let handle = state
        .artifacts
        .acquire(&upload.data, upload.file_name.as_deref(), &upload.mime_type)
        .await?;

    let outcome = inspect(&state, &handle).await;

    // The release obligation holds on success, decode failure, and
    // inference failure alike; it is logged-only and cannot mask `outcome`.
    state.artifacts.release(&handle).await;

    let (reply, verdict) = outcome?;
    tracing::info!(
        request_id = %request_id,
        overall = ?verdict.overall,
        "verification complete"
    );

    Ok(Json(VerifySafetyResponse {
        result: reply.as_text().unwrap_or(NO_RESULT_TEXT).to_string(),
        verdict,
    }))
}

/// Encode → infer → parse. Parsing cannot fail; only transport and I/O can.
async fn inspect(
    state: &AppState,
    handle: &ArtifactHandle,
) -> VerifyResult<(InferenceReply, ComplianceVerdict)> {
    let image = codec::encode(handle.path(), handle.mime_type()).await?;
    let reply = state.backend.infer(&image).await?;
    let verdict = parser::parse(&reply);
    Ok((reply, verdict))
}
