use crate::command_line::prelude::*;
use crate::command_line::{pipeline_args, pipeline_config};
use crate::pipeline::presenter;

pub const NAME: &str = "predict";

pub fn command() -> Command {
    Command::new(NAME)
        .arg(
            Arg::new("input-file")
                .required(true)
                .long("input-file")
                .short('i')
                .num_args(1),
        )
        .arg(
            Arg::new("output-file")
                .required(false)
                .long("output-file")
                .short('o')
                .num_args(1)
                .default_value("prediction.csv"),
        )
        .args(pipeline_args())
}

/// One-shot prediction over a molecule file, writing the same CSV the
/// service offers for download.
pub fn action(matches: &ArgMatches) -> eyre::Result<()> {
    let input_file = matches
        .get_one::<String>("input-file")
        .ok_or(eyre::eyre!("Failed to extract input file"))?;
    let output_file = matches
        .get_one::<String>("output-file")
        .ok_or(eyre::eyre!("Failed to extract output file"))?;
    let config = pipeline_config(matches)?;

    let input_text = std::fs::read_to_string(input_file)?;
    let outcome = crate::pipeline::run(&config, &input_text)?;

    let csv = presenter::prediction_csv(&outcome.results)?;
    std::fs::write(output_file, csv)?;

    log::info!(
        "wrote {} prediction(s) to {}",
        outcome.results.len(),
        output_file
    );
    Ok(())
}
