use poem_openapi::payload::Json;
use poem_openapi_derive::{ApiResponse, Object};
use tokio::sync::Mutex;

use crate::pipeline::session::Session;
use crate::pipeline::{presenter, PipelineConfig, PipelineError, PredictionOutcome};

#[derive(Object, Debug, Clone)]
pub struct MoleculeEntry {
    pub smiles: String,
    pub name: String,
}

#[derive(Object, Debug, Clone)]
pub struct PredictedRow {
    pub molecule_name: String,
    pub p_ic50: f64,
}

#[derive(Object, Debug, Clone)]
pub struct DownloadPayload {
    pub file_name: String,
    /// `data:file/csv;base64,...` — the whole CSV rides in the link.
    pub href: String,
}

/// What the original UI showed: the input echo, both table shapes, the
/// prediction table and the download link.
#[derive(Object, Debug, Clone)]
pub struct PredictionReport {
    pub molecules: Vec<MoleculeEntry>,
    pub descriptor_rows: u64,
    pub descriptor_columns: u64,
    pub selected_rows: u64,
    pub selected_columns: u64,
    pub results: Vec<PredictedRow>,
    pub download: DownloadPayload,
}

#[derive(Object, Debug)]
pub struct PredictionWarning {
    pub warning: String,
}

#[derive(Object, Debug)]
pub struct PredictionResponseError {
    pub error: String,
}

#[derive(ApiResponse, Debug)]
pub enum PredictResponse {
    #[oai(status = "200", content_type = "application/json")]
    Ok(Json<PredictionReport>),
    /// Predict was pressed with no staged file; the pipeline did not run.
    #[oai(status = "400", content_type = "application/json")]
    NoFileStaged(Json<PredictionWarning>),
    /// PaDEL-Descriptor ran and exited non-zero; the error carries its
    /// captured stderr.
    #[oai(status = "502", content_type = "application/json")]
    DescriptorToolFailed(Json<PredictionResponseError>),
    #[oai(status = "500", content_type = "application/json")]
    Err(Json<PredictionResponseError>),
}

pub async fn v1_predict(session: &Mutex<Session>, config: &PipelineConfig) -> PredictResponse {
    let staged = {
        let mut session = session.lock().await;
        session.request_predict()
    };

    let Some(file) = staged else {
        return PredictResponse::NoFileStaged(Json(PredictionWarning {
            warning: "Please upload a `.txt` or `.smi` file to begin.".to_string(),
        }));
    };

    let run_config = config.clone();
    let run = tokio::task::spawn_blocking(move || {
        crate::pipeline::run(&run_config, &file.contents)
    })
    .await;

    let outcome = match run {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(e @ PipelineError::DescriptorCalculation { .. })) => {
            return PredictResponse::DescriptorToolFailed(Json(PredictionResponseError {
                error: e.to_string(),
            }));
        }
        Ok(Err(e)) => {
            return PredictResponse::Err(Json(PredictionResponseError {
                error: e.to_string(),
            }));
        }
        Err(e) => {
            return PredictResponse::Err(Json(PredictionResponseError {
                error: e.to_string(),
            }));
        }
    };

    let report = match render_report(&outcome) {
        Ok(report) => report,
        Err(e) => {
            return PredictResponse::Err(Json(PredictionResponseError {
                error: e.to_string(),
            }));
        }
    };

    session.lock().await.store_outcome(outcome);

    PredictResponse::Ok(Json(report))
}

/// Rebuild the user-facing report from a cached outcome. The download
/// link is regenerated fresh on every render.
pub(crate) fn render_report(
    outcome: &PredictionOutcome,
) -> Result<PredictionReport, PipelineError> {
    let download = presenter::download_link(&outcome.results)?;

    Ok(PredictionReport {
        molecules: outcome
            .molecules
            .iter()
            .map(|record| MoleculeEntry {
                smiles: record.smiles.clone(),
                name: record.name.clone(),
            })
            .collect(),
        descriptor_rows: outcome.descriptor_shape.0 as u64,
        descriptor_columns: outcome.descriptor_shape.1 as u64,
        selected_rows: outcome.selected_shape.0 as u64,
        selected_columns: outcome.selected_shape.1 as u64,
        results: outcome
            .results
            .iter()
            .map(|result| PredictedRow {
                molecule_name: result.molecule_name.clone(),
                p_ic50: result.p_ic50,
            })
            .collect(),
        download: DownloadPayload {
            file_name: download.file_name,
            href: download.href,
        },
    })
}
