use poem_openapi::payload::Json;
use poem_openapi_derive::ApiResponse;
use tokio::sync::Mutex;

use crate::rest_api::api::{render_report, PredictionReport, PredictionResponseError};
use crate::pipeline::session::Session;

#[derive(ApiResponse, Debug)]
pub enum GetPredictionsResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<PredictionReport>),
    /// No prediction has completed in this session yet.
    #[oai(status = "404")]
    NoPredictions,
    #[oai(status = "500", content_type = "application/json")]
    Err(Json<PredictionResponseError>),
}

/// Re-render of the last successful run. Never re-invokes the external
/// tool; it only reads the cached outcome.
pub async fn v1_get_predictions(session: &Mutex<Session>) -> GetPredictionsResponse {
    let session = session.lock().await;

    let Some(outcome) = session.outcome() else {
        return GetPredictionsResponse::NoPredictions;
    };

    match render_report(outcome) {
        Ok(report) => GetPredictionsResponse::Ok(Json(report)),
        Err(e) => GetPredictionsResponse::Err(Json(PredictionResponseError {
            error: e.to_string(),
        })),
    }
}
