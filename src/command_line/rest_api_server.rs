use crate::command_line::prelude::*;
use crate::command_line::{pipeline_args, pipeline_config};
use crate::rest_api::openapi_server::{api_service, run_api_service};

pub const NAME: &str = "rest-api-server";

pub fn command() -> Command {
    Command::new(NAME)
        .arg(
            Arg::new("bind")
                .num_args(1)
                .required(false)
                .short('b')
                .long("bind")
                .default_value("localhost:3000"),
        )
        .arg(
            Arg::new("server-url")
                .num_args(1)
                .required(false)
                .short('u')
                .long("server-url")
                .default_value("http://localhost:3000"),
        )
        .args(pipeline_args())
        .subcommand(
            Command::new("spec").arg(
                Arg::new("output")
                    .help("Write the OpenAPI JSON to a destination. Useful for building Éprouvette client implementations.")
                    .required(true)
                    .short('o')
                    .long("output")
                    .num_args(1),
            ),
        )
}

fn output_spec(server_url: &str, config: PipelineConfig, output: &str) -> eyre::Result<()> {
    let api_service = api_service(server_url, config)?;

    let spec = api_service.spec();

    std::fs::write(output, spec)?;

    Ok(())
}

pub async fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let server_url: &String = matches
        .get_one("server-url")
        .ok_or(eyre::eyre!("Failed to extract server url"))?;
    let config = pipeline_config(matches)?;

    match matches.subcommand() {
        None => {
            let bind: &String = matches
                .get_one("bind")
                .ok_or(eyre::eyre!("Failed to extract bind address"))?;
            log::info!("serving on {}", bind);
            run_api_service(bind, server_url, config).await?
        }
        Some(("spec", args)) => {
            let output = args
                .get_one::<String>("output")
                .ok_or(eyre::eyre!("Failed to extract output path"))?;
            output_spec(server_url, config, output)?
        }
        Some((other, _args)) => Err(eyre::eyre!("can't handle {}", other))?,
    }

    Ok(())
}
