use std::path::{Path, PathBuf};

pub mod descriptors;
pub mod features;
pub mod input;
pub mod model;
pub mod presenter;
pub mod session;

use crate::pipeline::input::MoleculeRecord;
use crate::pipeline::model::{predict_activities, PredictedActivity};

/// Name of the tab-separated intermediate file handed to PaDEL-Descriptor.
pub const MOLECULE_FILE_NAME: &str = "molecule.smi";
/// Name of the CSV that PaDEL-Descriptor writes into the work directory.
pub const DESCRIPTOR_OUTPUT_FILE_NAME: &str = "descriptors_output.csv";

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("input line {line}: expected `<SMILES> <name>`, found {found} field(s)")]
    Parse { line: usize, found: usize },
    #[error("failed to launch descriptor tool `{tool}`: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: std::io::Error,
    },
    #[error("descriptor calculation failed: {stderr}")]
    DescriptorCalculation { code: Option<i32>, stderr: String },
    #[error("descriptor output has no `{0}` column")]
    MissingFeature(String),
    #[error("descriptor output has {rows} row(s) for {molecules} molecule(s)")]
    RowCount { rows: usize, molecules: usize },
    #[error("failed to load model artifact `{path}`: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
    #[error("feature matrix has {actual} column(s) but the model expects {expected}")]
    PredictionShape { expected: usize, actual: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Everything needed to run one prediction: where the intermediates live
/// and where the external collaborators (PaDEL jar, reference feature
/// list, model artifact) are found. The PaDEL flag set itself is fixed.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub work_dir: PathBuf,
    pub java_bin: PathBuf,
    pub padel_jar: PathBuf,
    pub descriptor_types: PathBuf,
    pub feature_list: PathBuf,
    pub model_artifact: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            java_bin: PathBuf::from("java"),
            padel_jar: PathBuf::from("./PaDEL-Descriptor/PaDEL-Descriptor.jar"),
            descriptor_types: PathBuf::from("./PaDEL-Descriptor/PubchemFingerprinter.xml"),
            feature_list: PathBuf::from("./descriptor_list.csv"),
            model_artifact: PathBuf::from("./acetylcholinesterase_model.json"),
        }
    }
}

impl PipelineConfig {
    pub fn molecule_path(&self) -> PathBuf {
        self.work_dir.join(MOLECULE_FILE_NAME)
    }

    pub fn descriptor_output_path(&self) -> PathBuf {
        self.work_dir.join(DESCRIPTOR_OUTPUT_FILE_NAME)
    }

    pub fn with_work_dir(mut self, work_dir: impl AsRef<Path>) -> Self {
        self.work_dir = work_dir.as_ref().to_path_buf();
        self
    }
}

/// Outcome of one successful pipeline run, cached on the session so that
/// re-renders never re-invoke the external tool.
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub molecules: Vec<MoleculeRecord>,
    pub descriptor_shape: (usize, usize),
    pub selected_shape: (usize, usize),
    pub results: Vec<PredictedActivity>,
}

/// Run the whole prediction pipeline over the raw uploaded text:
/// parse, write the `.smi` intermediate, invoke PaDEL-Descriptor,
/// project onto the reference feature list, load the model and predict.
pub fn run(config: &PipelineConfig, input_text: &str) -> Result<PredictionOutcome, PipelineError> {
    let records = input::parse_molecule_list(input_text)?;
    input::write_smi_file(&records, &config.molecule_path())?;

    descriptors::run_descriptor_tool(config)?;

    let table = features::read_descriptor_table(&config.descriptor_output_path())?;
    if table.rows.len() != records.len() {
        return Err(PipelineError::RowCount {
            rows: table.rows.len(),
            molecules: records.len(),
        });
    }

    let reference = features::load_reference_features(&config.feature_list)?;
    let matrix = features::select(&table, &reference)?;

    let artifact = model::load_model(&config.model_artifact)?;
    let results = predict_activities(&artifact, &matrix, &records)?;

    log::info!(
        "predicted pIC50 for {} molecule(s) using {} feature(s)",
        results.len(),
        matrix.columns.len()
    );

    Ok(PredictionOutcome {
        descriptor_shape: (table.rows.len(), table.columns.len()),
        selected_shape: (matrix.rows.len(), matrix.columns.len()),
        molecules: records,
        results,
    })
}
