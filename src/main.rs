use clap::Command;
use eprouvette::command_line::{predict, rest_api_server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let matches = Command::new("eprouvette")
        .subcommand_required(true)
        .subcommand(rest_api_server::command())
        .subcommand(predict::command())
        .get_matches();

    match matches.subcommand() {
        Some((rest_api_server::NAME, args)) => rest_api_server::action(args).await?,
        Some((predict::NAME, args)) => predict::action(args)?,
        Some((other, _args)) => Err(eyre::eyre!("can't handle {}", other))?,
        None => unreachable!("subcommand is required"),
    }

    Ok(())
}
