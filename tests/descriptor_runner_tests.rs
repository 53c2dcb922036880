use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use eprouvette::pipeline::descriptors::run_descriptor_tool;
use eprouvette::pipeline::{PipelineConfig, PipelineError};
use tempdir::TempDir;

fn write_script(dir: &Path, name: &str, body: &str) -> eyre::Result<PathBuf> {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}"))?;
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

fn config_with_tool(dir: &Path, java_bin: PathBuf) -> eyre::Result<PipelineConfig> {
    let config = PipelineConfig {
        java_bin,
        ..PipelineConfig::default().with_work_dir(dir)
    };
    // the intermediate the parser would have written
    std::fs::write(config.molecule_path(), "CCO\tethanol\n")?;
    Ok(config)
}

#[test]
fn zero_exit_deletes_the_intermediate_file() -> eyre::Result<()> {
    let tempdir = TempDir::new("eprouvette-runner-tests-")?;
    let tool = write_script(
        tempdir.path(),
        "fake-java-ok",
        "out=\"\"\nfor arg in \"$@\"; do out=\"$arg\"; done\necho \"Name\" > \"$out\"\n",
    )?;
    let config = config_with_tool(tempdir.path(), tool)?;

    run_descriptor_tool(&config)?;

    assert!(!config.molecule_path().exists());
    assert!(config.descriptor_output_path().exists());

    Ok(())
}

#[test]
fn non_zero_exit_keeps_the_intermediate_and_carries_stderr() -> eyre::Result<()> {
    let tempdir = TempDir::new("eprouvette-runner-tests-")?;
    let tool = write_script(
        tempdir.path(),
        "fake-java-broken",
        "echo 'java.lang.OutOfMemoryError: GC overhead limit exceeded' 1>&2\nexit 1\n",
    )?;
    let config = config_with_tool(tempdir.path(), tool)?;

    match run_descriptor_tool(&config) {
        Err(PipelineError::DescriptorCalculation { code, stderr }) => {
            assert_eq!(code, Some(1));
            assert!(stderr.contains("OutOfMemoryError"), "stderr: {stderr}");
        }
        other => panic!("unexpected result: {other:?}"),
    }

    // left on disk for diagnosis
    assert!(config.molecule_path().exists());

    Ok(())
}

#[test]
fn missing_tool_is_a_launch_error() -> eyre::Result<()> {
    let tempdir = TempDir::new("eprouvette-runner-tests-")?;
    let config = config_with_tool(tempdir.path(), tempdir.path().join("no-such-java"))?;

    match run_descriptor_tool(&config) {
        Err(PipelineError::ToolLaunch { tool, .. }) => {
            assert!(tool.ends_with("no-such-java"));
        }
        other => panic!("unexpected result: {other:?}"),
    }

    Ok(())
}
