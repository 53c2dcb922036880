use poem_openapi::payload::Json;
use poem_openapi_derive::{ApiResponse, Object};
use tokio::sync::Mutex;

use crate::pipeline::session::{Session, StagedFile};

/// An uploaded molecule list: whitespace-separated `<SMILES> <name>`
/// lines, as found in `.txt`/`.smi` files.
#[derive(Object, Debug)]
pub struct UploadRequest {
    pub file_name: String,
    pub contents: String,
}

#[derive(Object, Debug)]
pub struct StagedFileMeta {
    pub file_name: String,
    pub size_bytes: u64,
    pub phase: String,
}

#[derive(ApiResponse, Debug)]
pub enum UploadResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<StagedFileMeta>),
}

pub async fn v1_stage_file(session: &Mutex<Session>, upload: UploadRequest) -> UploadResponse {
    let size_bytes = upload.contents.len() as u64;
    let file_name = upload.file_name.clone();

    let mut session = session.lock().await;
    session.stage_upload(StagedFile {
        file_name: upload.file_name,
        contents: upload.contents,
    });

    log::info!("staged upload {} ({} bytes)", file_name, size_bytes);

    UploadResponse::Ok(Json(StagedFileMeta {
        file_name,
        size_bytes,
        phase: session.phase().as_str().to_string(),
    }))
}
