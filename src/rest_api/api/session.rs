use poem_openapi::payload::Json;
use poem_openapi_derive::{ApiResponse, Object};
use tokio::sync::Mutex;

use crate::pipeline::session::Session;

#[derive(Object, Debug)]
pub struct SessionSnapshot {
    pub phase: String,
    #[oai(skip_serializing_if_is_none)]
    pub file_name: Option<String>,
    pub has_predictions: bool,
}

#[derive(ApiResponse, Debug)]
pub enum GetSessionResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<SessionSnapshot>),
}

#[derive(ApiResponse, Debug)]
pub enum ResetSessionResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<SessionSnapshot>),
}

fn snapshot(session: &Session) -> SessionSnapshot {
    SessionSnapshot {
        phase: session.phase().as_str().to_string(),
        file_name: session.staged_file_name().map(str::to_string),
        has_predictions: session.outcome().is_some(),
    }
}

pub async fn v1_get_session(session: &Mutex<Session>) -> GetSessionResponse {
    let session = session.lock().await;
    GetSessionResponse::Ok(Json(snapshot(&session)))
}

pub async fn v1_reset_session(session: &Mutex<Session>) -> ResetSessionResponse {
    let mut session = session.lock().await;
    session.reset();
    ResetSessionResponse::Ok(Json(snapshot(&session)))
}
