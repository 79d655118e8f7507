use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;
use crate::utils::upload::read_import_upload;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use intake_core::models::{ImportAcceptedResponse, ImportRecord, SubmitterId};
use intake_core::AppError;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmitQuery {
    /// Opaque submitter identity; `anon` when absent or blank
    user_id: Option<String>,
}

#[utoipa::path(
    post,
    path = "/imports",
    tag = "imports",
    params(SubmitQuery),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 202, description = "Upload accepted (new or duplicate)", body = ImportAcceptedResponse),
        (status = 400, description = "Malformed multipart body or invalid user_id/filename", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
        (status = 503, description = "Import store unavailable", body = ErrorResponse)
    )
)]
pub async fn create_import(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SubmitQuery>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<ImportAcceptedResponse>), HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::InvalidInput(format!("Invalid multipart request: {}", rejection.body_text()))
    })?;

    let submitter = SubmitterId::from_optional(query.user_id.as_deref())?;

    let max_bytes = state.ledger.max_upload_bytes();
    let upload = read_import_upload(multipart, max_bytes).await?;

    let receipt = state
        .ledger
        .submit(&submitter, &upload.content, &upload.filename)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(ImportAcceptedResponse::from(receipt)),
    ))
}

#[utoipa::path(
    get,
    path = "/imports/{id}",
    tag = "imports",
    params(
        ("id" = String, Path, description = "Import ID")
    ),
    responses(
        (status = 200, description = "Import record", body = ImportRecord),
        (status = 404, description = "Import not found", body = ErrorResponse),
        (status = 503, description = "Import store unavailable", body = ErrorResponse)
    )
)]
pub async fn get_import(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ImportRecord>, HttpAppError> {
    let record = state.ledger.get(&id).await?;
    Ok(Json(record))
}
