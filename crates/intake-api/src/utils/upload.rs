//! Multipart upload extraction with a streaming size gate

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use intake_core::constants::UNKNOWN_FILENAME;
use intake_core::AppError;

use crate::constants::FILE_FIELD;

/// The single file part of an import upload.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Read the `file` field of a multipart form.
///
/// Content is consumed chunk by chunk and the request fails with
/// `PayloadTooLarge` as soon as more than `max_bytes` have arrived; the rest
/// of the body is never buffered. Fields other than `file` are skipped, and
/// more than one `file` field is rejected.
pub async fn read_import_upload(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<UploadedFile, AppError> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        if upload.is_some() {
            return Err(AppError::InvalidInput(
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string(),
            ));
        }

        let filename = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_FILENAME)
            .to_string();

        let mut content = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?
        {
            if content.len() + chunk.len() > max_bytes {
                tracing::debug!(
                    received = content.len() + chunk.len(),
                    limit = max_bytes,
                    "Upload exceeded size limit mid-stream"
                );
                return Err(AppError::PayloadTooLarge { limit: max_bytes });
            }
            content.extend_from_slice(&chunk);
        }

        upload = Some(UploadedFile { filename, content });
    }

    upload.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit: max_bytes }
    } else {
        AppError::InvalidInput(format!("Failed to read multipart: {}", err.body_text()))
    }
}
