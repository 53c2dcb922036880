use std::path::PathBuf;

pub mod predict;
pub mod rest_api_server;

pub mod prelude {
    pub use clap::{Arg, ArgMatches, Command};

    pub use crate::pipeline::PipelineConfig;
}

use prelude::*;

/// Path arguments shared by every subcommand that runs the pipeline.
pub fn pipeline_args() -> Vec<Arg> {
    vec![
        Arg::new("work-dir")
            .required(false)
            .long("work-dir")
            .short('w')
            .num_args(1)
            .default_value("."),
        Arg::new("java-bin")
            .required(false)
            .long("java-bin")
            .num_args(1)
            .default_value("java"),
        Arg::new("padel-jar")
            .required(false)
            .long("padel-jar")
            .num_args(1)
            .default_value("./PaDEL-Descriptor/PaDEL-Descriptor.jar"),
        Arg::new("descriptor-types")
            .required(false)
            .long("descriptor-types")
            .num_args(1)
            .default_value("./PaDEL-Descriptor/PubchemFingerprinter.xml"),
        Arg::new("feature-list")
            .required(false)
            .long("feature-list")
            .num_args(1)
            .default_value("./descriptor_list.csv"),
        Arg::new("model")
            .required(false)
            .long("model")
            .short('m')
            .num_args(1)
            .default_value("./acetylcholinesterase_model.json"),
    ]
}

pub fn pipeline_config(matches: &ArgMatches) -> eyre::Result<PipelineConfig> {
    let path = |name: &str| -> eyre::Result<PathBuf> {
        matches
            .get_one::<String>(name)
            .map(PathBuf::from)
            .ok_or(eyre::eyre!("Failed to extract {}", name))
    };

    Ok(PipelineConfig {
        work_dir: path("work-dir")?,
        java_bin: path("java-bin")?,
        padel_jar: path("padel-jar")?,
        descriptor_types: path("descriptor-types")?,
        feature_list: path("feature-list")?,
        model_artifact: path("model")?,
    })
}
