use std::path::Path;

use crate::pipeline::PipelineError;

/// The full PaDEL output: one column per descriptor the tool emitted,
/// one row per molecule in input order.
#[derive(Debug, Clone)]
pub struct DescriptorTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// A DescriptorTable projected onto the reference feature list; the
/// column names equal the reference list, in order, for every row.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

/// Read the descriptor CSV written by PaDEL. Every field is parsed as
/// f64; PaDEL leaves the occasional field empty, which becomes NaN
/// (so does its leading `Name` column, which the reference list never
/// selects).
pub fn read_descriptor_table(path: &Path) -> Result<DescriptorTable, PipelineError> {
    let mut reader = csv::Reader::from_path(path)?;
    let columns = reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| field.parse::<f64>().unwrap_or(f64::NAN))
                .collect(),
        );
    }

    Ok(DescriptorTable { columns, rows })
}

/// The reference feature list is the header row of a CSV; the model was
/// trained on exactly these columns, in this order.
pub fn load_reference_features(path: &Path) -> Result<Vec<String>, PipelineError> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader.headers()?.iter().map(str::to_string).collect())
}

/// Pure column projection: keep exactly the reference columns, in
/// reference order, for every row. No numeric transformation.
pub fn select(
    table: &DescriptorTable,
    reference: &[String],
) -> Result<FeatureMatrix, PipelineError> {
    let mut indices = Vec::with_capacity(reference.len());
    for name in reference {
        let idx = table
            .columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| PipelineError::MissingFeature(name.clone()))?;
        indices.push(idx);
    }

    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&i| row[i]).collect())
        .collect();

    Ok(FeatureMatrix {
        columns: reference.to_vec(),
        rows,
    })
}
