//! Agenda upload endpoints.
//!
//! `POST /api/agenda/preview` parses the upload and returns what would be
//! generated. `POST /api/agenda/letters` runs the full pipeline and returns
//! the ZIP bundle. Both take the document in the multipart field `agenda`.

use axum::extract::{Multipart, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::pipeline::import::sanitize_filename;
use crate::pipeline::processor::{AgendaPreview, GenerationOutcome};

/// Multipart field carrying the agenda document.
pub const AGENDA_FIELD: &str = "agenda";

const ZIP_MIME: &str = "application/zip";

/// An uploaded agenda: sanitized client file name and raw bytes.
struct Upload {
    file_name: String,
    bytes: Vec<u8>,
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed upload: {e}")))?
    {
        if field.name() != Some(AGENDA_FIELD) {
            continue;
        }
        let file_name = sanitize_filename(field.file_name().unwrap_or_default());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {e}")))?;

        tracing::info!(
            file_name = %file_name,
            size_bytes = bytes.len(),
            "Agenda received"
        );

        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ApiError::BadRequest(format!(
        "Missing multipart field '{AGENDA_FIELD}'"
    )))
}

/// `POST /api/agenda/preview`
pub async fn preview(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Json<AgendaPreview>, ApiError> {
    let upload = read_upload(multipart).await?;
    let processor = ctx.processor.clone();

    let preview =
        tokio::task::spawn_blocking(move || processor.preview(&upload.bytes)).await??;

    Ok(Json(preview))
}

/// `POST /api/agenda/letters`
pub async fn letters(
    State(ctx): State<ApiContext>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = read_upload(multipart).await?;
    let source = upload.file_name.clone();
    let processor = ctx.processor.clone();

    let outcome =
        tokio::task::spawn_blocking(move || processor.generate(&upload.bytes)).await??;

    match outcome {
        GenerationOutcome::NoCases {
            meeting,
            discarded_headers,
        } => Err(ApiError::NoCases(format!(
            "{} has no planning-permission or building-plan cases ({} other headers skipped)",
            meeting.meeting_label,
            discarded_headers.len()
        ))),
        GenerationOutcome::Archive(archive) => {
            tracing::info!(
                source = %source,
                file_name = %archive.file_name,
                letters = archive.letters.len(),
                "Letter bundle sent"
            );
            let disposition = format!("attachment; filename=\"{}\"", archive.file_name);
            Ok((
                [
                    (header::CONTENT_TYPE, ZIP_MIME.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                archive.bytes,
            )
                .into_response())
        }
    }
}
