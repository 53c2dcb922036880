use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::pipeline::model::PredictedActivity;
use crate::pipeline::PipelineError;

/// Fixed name the browser saves the payload under.
pub const DOWNLOAD_FILE_NAME: &str = "prediction.csv";

/// A self-contained download: the whole CSV rides inside the data URI,
/// so nothing is ever written server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub file_name: String,
    pub href: String,
}

/// Render the results as `Molecule Name,pIC50` CSV, one row per molecule
/// in prediction order.
pub fn prediction_csv(results: &[PredictedActivity]) -> Result<String, PipelineError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Molecule Name", "pIC50"])?;
    for result in results {
        writer.write_record([&result.molecule_name, &result.p_ic50.to_string()])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Build the download link. Regenerated from the in-memory results on
/// every render.
pub fn download_link(results: &[PredictedActivity]) -> Result<DownloadLink, PipelineError> {
    let csv = prediction_csv(results)?;

    Ok(DownloadLink {
        file_name: DOWNLOAD_FILE_NAME.to_string(),
        href: format!("data:file/csv;base64,{}", BASE64.encode(csv.as_bytes())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<PredictedActivity> {
        vec![
            PredictedActivity {
                molecule_name: "ethanol".to_string(),
                p_ic50: 6.0,
            },
            PredictedActivity {
                molecule_name: "ethylamine".to_string(),
                p_ic50: 4.5,
            },
        ]
    }

    #[test]
    fn csv_has_fixed_header_and_row_order() {
        let csv = prediction_csv(&results()).unwrap();
        assert_eq!(csv, "Molecule Name,pIC50\nethanol,6\nethylamine,4.5\n");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let csv = prediction_csv(&[PredictedActivity {
            molecule_name: "2-amino,3-methyl".to_string(),
            p_ic50: 5.0,
        }])
        .unwrap();
        assert_eq!(csv, "Molecule Name,pIC50\n\"2-amino,3-methyl\",5\n");
    }

    #[test]
    fn download_link_round_trips_through_base64() {
        let link = download_link(&results()).unwrap();
        assert_eq!(link.file_name, DOWNLOAD_FILE_NAME);

        let encoded = link
            .href
            .strip_prefix("data:file/csv;base64,")
            .expect("data URI prefix");
        let decoded = BASE64.decode(encoded).unwrap();
        assert_eq!(decoded, prediction_csv(&results()).unwrap().as_bytes());
    }
}
