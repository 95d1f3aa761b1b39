use axum::{
    Extension, Json,
    extract::{Multipart, Path, State, multipart::MultipartError},
    http::header,
    response::IntoResponse,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use sentra_types::api::{Claims, UploadResponse};

use crate::error::ApiError;
use crate::pipeline::Upload;
use crate::state::AppState;

/// Name given to documents uploaded through the API without a file.
const FALLBACK_FILE_NAME: &str = "data.csv";

/// Pulls the `file` field out of a multipart body. A field with no filename and
/// no bytes is what browsers send for an empty file input, so it counts as absent.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Option<Upload>, MultipartError> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            continue;
        }
        upload = Some(Upload {
            file_name: if file_name.is_empty() {
                FALLBACK_FILE_NAME.to_string()
            } else {
                file_name
            },
            bytes,
        });
    }

    Ok(upload)
}

/// POST /api/upload_docs: stores the `file` field and returns its id.
pub async fn upload_docs(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let upload = read_upload(&mut multipart).await.map_err(|e| {
        warn!("Failed to read upload body: {}", e);
        ApiError::MalformedUpload
    })?;

    let (name, bytes) = match upload {
        Some(u) => (u.file_name, u.bytes),
        None => (FALLBACK_FILE_NAME.to_string(), Bytes::new()),
    };

    let doc_id = state.docs.put(&name, bytes)?;
    info!("User {} uploaded document {}", claims.sub, doc_id);

    Ok(Json(UploadResponse { task: true, doc_id }))
}

/// GET /api/docs/{doc_id}: returns the stored bytes. Ids that are not uuids
/// cannot name a stored document and are reported as not found.
pub async fn get_doc(
    State(state): State<AppState>,
    Path(doc_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let doc_id = Uuid::parse_str(&doc_id).map_err(|_| ApiError::NotFound)?;
    let doc = state.docs.get(&doc_id)?;
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        doc.content,
    ))
}
