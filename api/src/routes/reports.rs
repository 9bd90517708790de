//! Incident reports: creation with optional photo, admin listing.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use common::Report;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::extract;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
pub struct CreateReportResponse {
    pub report: Report,
    pub message: String,
}

/// `POST /report` — multipart: `userId`, `description`, optional `image`.
///
/// A report photo is stored through the artifact store but deliberately
/// never released: it persists and is served under `/uploads`.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<CreateReportResponse>)> {
    let request_id = Uuid::new_v4();
    let payload = extract::collect(multipart).await?;

    let (Some(user_id), Some(description)) = (
        payload.text_field("userId").map(str::to_string),
        payload.text_field("description").map(str::to_string),
    ) else {
        return Err(ApiError::InvalidRequest(
            "Missing userId or description".to_string(),
        ));
    };

    let image_url = match payload.image_with_content() {
        Some(upload) => {
            let handle = state
                .artifacts
                .acquire(&upload.data, upload.file_name.as_deref(), &upload.mime_type)
                .await?;
            Some(format!("/uploads/{}", handle.file_name()))
        }
        None => None,
    };

    let report = state.reports.create(user_id, description, image_url);
    tracing::info!(
        request_id = %request_id,
        report_id = %report.id,
        has_image = report.image_url.is_some(),
        "report created"
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            report,
            message: "Report created successfully".to_string(),
        }),
    ))
}

/// `GET /get-reports` — all reports, newest first.
pub async fn get_reports(State(state): State<Arc<AppState>>) -> Json<Vec<Report>> {
    Json(state.reports.list())
}
