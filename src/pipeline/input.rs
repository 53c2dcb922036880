use std::path::Path;

use crate::pipeline::PipelineError;

/// One row of user-uploaded input. SMILES syntax is not validated here;
/// PaDEL-Descriptor rejects malformed structures on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoleculeRecord {
    pub smiles: String,
    pub name: String,
}

/// Parse whitespace-separated `<SMILES> <name>` lines, preserving input
/// order. Blank lines are skipped. When a line carries more than two
/// fields, the first is the SMILES and the rest re-join as the name.
pub fn parse_molecule_list(text: &str) -> Result<Vec<MoleculeRecord>, PipelineError> {
    let mut records = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let fields = line.split_whitespace().collect::<Vec<_>>();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 2 {
            return Err(PipelineError::Parse {
                line: idx + 1,
                found: fields.len(),
            });
        }
        records.push(MoleculeRecord {
            smiles: fields[0].to_string(),
            name: fields[1..].join(" "),
        });
    }

    Ok(records)
}

/// Re-encode the parsed records as the tab-separated, headerless file
/// PaDEL-Descriptor expects (`molecule.smi` in the work directory).
pub fn write_smi_file(records: &[MoleculeRecord], path: &Path) -> Result<(), PipelineError> {
    let mut contents = String::new();
    for record in records {
        contents.push_str(&record.smiles);
        contents.push('\t');
        contents.push_str(&record.name);
        contents.push('\n');
    }
    std::fs::write(path, contents)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_in_order() {
        let records = parse_molecule_list("CCO ethanol\nCCN ethylamine\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].smiles, "CCO");
        assert_eq!(records[0].name, "ethanol");
        assert_eq!(records[1].name, "ethylamine");
    }

    #[test]
    fn skips_blank_lines() {
        let records = parse_molecule_list("CCO ethanol\n\n  \nCCN ethylamine").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn extra_fields_fold_into_the_name() {
        let records = parse_molecule_list("CC(=O)O acetic acid").unwrap();
        assert_eq!(records[0].smiles, "CC(=O)O");
        assert_eq!(records[0].name, "acetic acid");
    }

    #[test]
    fn single_field_line_is_a_parse_error() {
        let err = parse_molecule_list("CCO ethanol\nCCN").unwrap_err();
        match err {
            PipelineError::Parse { line, found } => {
                assert_eq!(line, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
