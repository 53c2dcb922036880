use std::process::Command;

use crate::pipeline::{PipelineConfig, PipelineError};

// JVM sizing and headless mode, exactly as the PaDEL authors recommend
// for batch runs.
const JAVA_ARGS: [&str; 3] = ["-Xms2G", "-Xmx2G", "-Djava.awt.headless=true"];

// Fixed PaDEL-Descriptor flag set: salt removal, nitro standardization,
// PubChem fingerprint descriptors. Not user-configurable.
const PADEL_FLAGS: [&str; 3] = ["-removesalt", "-standardizenitro", "-fingerprints"];

/// Invoke PaDEL-Descriptor over the work directory and wait for it to
/// exit. Synchronous, no timeout, no retry; a hung JVM hangs the request.
///
/// On success the `molecule.smi` intermediate is removed (best effort)
/// and `descriptors_output.csv` in the work directory is the hand-off to
/// feature selection. On a non-zero exit the intermediate is left on
/// disk for diagnosis and the captured stderr is surfaced to the caller.
pub fn run_descriptor_tool(config: &PipelineConfig) -> Result<(), PipelineError> {
    let output_path = config.descriptor_output_path();

    let output = Command::new(&config.java_bin)
        .args(JAVA_ARGS)
        .arg("-jar")
        .arg(&config.padel_jar)
        .args(PADEL_FLAGS)
        .arg("-descriptortypes")
        .arg(&config.descriptor_types)
        .arg("-dir")
        .arg(&config.work_dir)
        .arg("-file")
        .arg(&output_path)
        .output()
        .map_err(|source| PipelineError::ToolLaunch {
            tool: config.java_bin.display().to_string(),
            source,
        })?;

    if !output.status.success() {
        return Err(PipelineError::DescriptorCalculation {
            code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    log::debug!(
        "PaDEL-Descriptor finished, output at {}",
        output_path.display()
    );

    let molecule_path = config.molecule_path();
    if let Err(e) = std::fs::remove_file(&molecule_path) {
        log::warn!(
            "could not remove intermediate {}: {}",
            molecule_path.display(),
            e
        );
    }

    Ok(())
}
