//! The upload endpoint.
//!
//! One POST route carries the whole pipeline: multipart parsing, PIN and
//! directory checks, field sanitization, deterministic naming, then two
//! writes to the Object Store (the image and its JSON metadata sidecar).
//! Every rejection happens before the token fetch, so invalid requests
//! never touch the upstream provider.

use axum::{
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use chrono::Utc;
use photodrop_core::{naming, AppError, MetadataRecord};
use serde::Serialize;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::ip::client_ip;

/// Success body: the remote path of the stored image.
#[derive(Debug, Serialize)]
pub struct UploadOk {
    pub ok: bool,
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct UploadHint {
    pub ok: bool,
    pub hint: String,
    pub method: String,
}

/// One file part from the multipart body.
struct FilePart {
    filename: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Parsed multipart submission, raw fields as sent by the client.
#[derive(Default)]
struct Submission {
    pin: String,
    vet: String,
    patient: String,
    owner: String,
    title: String,
    file: Option<FilePart>,
}

pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadOk>, HttpAppError> {
    let submission = parse_submission(multipart).await?;

    let pin = naming::clean(&submission.pin);
    let vet = naming::clean(&submission.vet);
    let patient = naming::clean(&submission.patient);
    let owner = naming::clean(&submission.owner);
    let title = naming::clean(&submission.title);

    check_pin(&state, &pin)?;

    let folder = state
        .config
        .directory
        .folder_for(&vet)
        .ok_or_else(|| AppError::InvalidInput(format!("Unknown vet '{vet}'")))?
        .to_string();

    if patient.is_empty() {
        return Err(AppError::InvalidInput("Patient name is required".to_string()).into());
    }
    if title.is_empty() {
        return Err(AppError::InvalidInput("Title is required".to_string()).into());
    }

    let file = submission
        .file
        .ok_or_else(|| AppError::InvalidInput("File is required".to_string()))?;
    if file.data.len() > state.config.max_file_size_bytes {
        return Err(AppError::InvalidInput(format!(
            "File too large (max {} MiB)",
            state.config.max_file_size_mb()
        ))
        .into());
    }

    // The client filename only feeds the extension; the raw value is kept
    // verbatim as audit data in the metadata sidecar.
    let ext = naming::extension_of(file.filename.as_deref().unwrap_or(""));
    let original_filename = file.filename.clone().filter(|s| !s.is_empty());
    if !naming::is_allowed_extension(&ext) {
        return Err(
            AppError::InvalidInput(format!("Extension '.{ext}' is not allowed")).into(),
        );
    }

    let date = naming::today_ymd();
    let base = naming::artifact_base_name(&patient, &owner, &date, &title);
    let image_path = naming::join_remote_path(&folder, &format!("{base}.{ext}"));
    let metadata_path = naming::join_remote_path(&folder, &format!("{base}.json"));

    let record = MetadataRecord {
        uploaded_at: Utc::now(),
        vet,
        patient,
        owner,
        title,
        date,
        original_filename,
        size_bytes: file.data.len() as u64,
        mime: file.content_type,
        saved_path: image_path.clone(),
        client_ip: client_ip(&headers),
        user_agent: headers
            .get(axum::http::header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };
    let metadata_bytes = record.to_pretty_json().map_err(AppError::from)?;

    let token = state.auth.access_token().await?;
    state.store.put(&token, &image_path, file.data).await?;
    state.store.put(&token, &metadata_path, metadata_bytes).await?;

    tracing::info!(path = %image_path, "Upload stored");

    Ok(Json(UploadOk {
        ok: true,
        path: image_path,
    }))
}

/// GET on the upload route: a hint for someone poking the endpoint in a
/// browser, not an error worth logging.
pub async fn upload_hint() -> Json<UploadHint> {
    Json(UploadHint {
        ok: false,
        hint: "POST multipart/form-data with pin, vet, patient, owner, title and file".to_string(),
        method: "POST".to_string(),
    })
}

pub async fn upload_options() -> StatusCode {
    // Preflight headers are attached by the CORS layer.
    StatusCode::OK
}

pub async fn method_not_allowed() -> HttpAppError {
    AppError::MethodNotAllowed.into()
}

async fn parse_submission(mut multipart: Multipart) -> Result<Submission, HttpAppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "pin" => submission.pin = read_text(field).await?,
            "vet" => submission.vet = read_text(field).await?,
            "patient" => submission.patient = read_text(field).await?,
            "owner" => submission.owner = read_text(field).await?,
            "title" => submission.title = read_text(field).await?,
            _ => {
                // The part named "file" wins; otherwise the first part that
                // carries a filename is taken as the file. Anything else is
                // drained and ignored.
                let is_file_slot = name == "file"
                    || (submission.file.is_none() && field.file_name().is_some());
                if is_file_slot {
                    let filename = field.file_name().map(str::to_string);
                    let content_type = field.content_type().map(str::to_string);
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            AppError::InvalidInput(format!("Failed to read file part: {e}"))
                        })?
                        .to_vec();
                    submission.file = Some(FilePart {
                        filename,
                        content_type,
                        data,
                    });
                } else {
                    let _ = field.bytes().await;
                }
            }
        }
    }

    Ok(submission)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, HttpAppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart field: {e}")).into())
}

fn check_pin(state: &AppState, submitted: &str) -> Result<(), HttpAppError> {
    let expected = state
        .config
        .pin_code
        .as_deref()
        .ok_or_else(|| AppError::ServerConfig("PIN_CODE not set on server".to_string()))?;

    if submitted != expected {
        return Err(AppError::Unauthorized("PIN mismatch".to_string()).into());
    }
    Ok(())
}
