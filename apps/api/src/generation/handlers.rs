//! Axum route handlers for the Resume API.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::assembler::create_resume;
use crate::generation::profile::ResumeProfile;
use crate::generation::staging::{stage_image, validate_image};
use crate::render::DOCX_MIME_TYPE;
use crate::state::AppState;

pub const DOWNLOAD_FILE_NAME: &str = "Optimized_Resume.docx";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// Fields collected from the multipart generate form.
#[derive(Debug, Default)]
struct GenerateForm {
    resume_text: String,
    jd_text: String,
    image: Option<Vec<u8>>,
}

async fn read_generate_form(multipart: &mut Multipart) -> Result<GenerateForm, AppError> {
    let mut form = GenerateForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume_text" => form.resume_text = field.text().await?,
            "jd_text" => form.jd_text = field.text().await?,
            "image" => {
                let bytes = field.bytes().await?;
                // A file input submitted without a file arrives as an empty part.
                if !bytes.is_empty() {
                    form.image = Some(bytes.to_vec());
                }
            }
            other => warn!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

fn require_inputs(resume_text: &str, jd_text: &str) -> Result<(), AppError> {
    if resume_text.is_empty() || jd_text.is_empty() {
        return Err(AppError::MissingInput);
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/generate
///
/// Multipart form: `resume_text`, `jd_text`, optional `image` (PNG/JPEG).
/// Responds with the .docx as a download.
pub async fn handle_generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_generate_form(&mut multipart).await?;
    require_inputs(&form.resume_text, &form.jd_text)?;
    if let Some(bytes) = &form.image {
        validate_image(bytes)?;
    }

    let request_id = Uuid::new_v4();
    info!(
        "Generating resume {request_id} (resume {} chars, JD {} chars, image: {})",
        form.resume_text.len(),
        form.jd_text.len(),
        form.image.is_some()
    );

    let tokenizer = Arc::clone(&state.tokenizer);
    let staging_dir = state.config.staging_dir.clone();

    // Staging and zip packaging are blocking work. The staged file is dropped
    // (and deleted) inside the closure on every path.
    let buffer = tokio::task::spawn_blocking(move || -> Result<Cursor<Vec<u8>>, AppError> {
        let staged = form
            .image
            .as_deref()
            .map(|bytes| stage_image(&staging_dir, bytes))
            .transpose()?;
        create_resume(
            tokenizer.as_ref(),
            &form.resume_text,
            &form.jd_text,
            staged.as_ref().map(|s| s.path()),
        )
    })
    .await
    .map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "spawn_blocking failed in resume assembly: {e}"
        ))
    })??;

    let body = buffer.into_inner();
    info!("Resume {request_id} ready ({} bytes)", body.len());

    Ok((
        [
            (header::CONTENT_TYPE, DOCX_MIME_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/resumes/preview
///
/// Returns the extracted fields as JSON so a client can check them before
/// generating the document.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<ResumeProfile>, AppError> {
    require_inputs(&request.resume_text, &request.jd_text)?;

    let profile = ResumeProfile::extract(
        state.tokenizer.as_ref(),
        &request.resume_text,
        &request.jd_text,
    );
    Ok(Json(profile))
}
