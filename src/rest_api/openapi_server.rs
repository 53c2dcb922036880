use poem::{listener::TcpListener, Route, Server};
use poem_openapi::{ContactObject, OpenApiService};
use poem_openapi_derive::OpenApi;
use tokio::sync::Mutex;

use crate::pipeline::session::Session;
use crate::pipeline::PipelineConfig;
use crate::rest_api::api;

pub const API_PREFIX: &str = "/api";

pub struct Api {
    session: Mutex<Session>,
    config: PipelineConfig,
}

#[OpenApi]
impl Api {
    #[oai(path = "/v1/session/file", method = "post")]
    /// Stage an uploaded molecule list (`.txt`/`.smi` contents) for the
    /// next predict action
    async fn v1_stage_file(
        &self,
        upload: poem_openapi::payload::Json<api::UploadRequest>,
    ) -> api::UploadResponse {
        api::v1_stage_file(&self.session, upload.0).await
    }

    #[oai(path = "/v1/session/predict", method = "post")]
    /// Run the descriptor + prediction pipeline over the staged file
    async fn v1_predict(&self) -> api::PredictResponse {
        api::v1_predict(&self.session, &self.config).await
    }

    #[oai(path = "/v1/session/predictions", method = "get")]
    /// Re-render the last prediction report without re-running anything
    async fn v1_get_predictions(&self) -> api::GetPredictionsResponse {
        api::v1_get_predictions(&self.session).await
    }

    #[oai(path = "/v1/session", method = "get")]
    /// Inspect the session state machine
    async fn v1_get_session(&self) -> api::GetSessionResponse {
        api::v1_get_session(&self.session).await
    }

    #[oai(path = "/v1/session", method = "delete")]
    /// Reset the session to idle, dropping the staged file and results
    async fn v1_reset_session(&self) -> api::ResetSessionResponse {
        api::v1_reset_session(&self.session).await
    }
}

pub fn api_service(
    server_url: &str,
    config: PipelineConfig,
) -> eyre::Result<OpenApiService<Api, ()>> {
    let api = Api {
        session: Mutex::new(Session::default()),
        config,
    };
    let openapi_service = OpenApiService::new(api, "Éprouvette", "1.0")
        .server(server_url)
        .description("Éprouvette: Acetylcholinesterase Bioactivity Prediction")
        .contact(ContactObject::new());
    Ok(openapi_service)
}

pub async fn run_api_service(
    bind: &str,
    server_url: &str,
    config: PipelineConfig,
) -> eyre::Result<()> {
    let api_service = api_service(server_url, config)?;
    let ui = api_service.swagger_ui();

    let spec = api_service.spec();
    Server::new(TcpListener::bind(bind))
        .run(
            Route::new()
                .at(
                    "/api/v1/openapi.json",
                    poem::endpoint::make_sync(move |_| spec.clone()),
                )
                .nest(API_PREFIX, api_service)
                .nest("/", ui),
        )
        .await?;

    Ok(())
}
