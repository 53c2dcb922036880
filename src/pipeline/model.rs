use std::path::Path;

use serde::Deserialize;

use crate::pipeline::features::FeatureMatrix;
use crate::pipeline::input::MoleculeRecord;
use crate::pipeline::PipelineError;

/// One prediction, paired with the molecule it came from. Row i of the
/// feature matrix pairs with record i of the parsed input.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedActivity {
    pub molecule_name: String,
    pub p_ic50: f64,
}

/// Opaque capability over the pre-trained model: tests substitute a stub
/// without needing the real artifact.
pub trait BioactivityModel {
    fn expected_features(&self) -> usize;

    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, PipelineError>;
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

/// The serialized regression model. Trained elsewhere; this crate only
/// deserializes it and calls predict. Linear models carry one weight per
/// reference feature; forests average their trees.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegressionArtifact {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    Forest {
        n_features: usize,
        trees: Vec<DecisionTree>,
    },
}

impl RegressionArtifact {
    /// Tree node references are checked once here so prediction can
    /// index without further guards.
    fn validate(&self) -> Result<(), String> {
        match self {
            RegressionArtifact::Linear { coefficients, .. } => {
                if coefficients.is_empty() {
                    return Err("linear model has no coefficients".to_string());
                }
            }
            RegressionArtifact::Forest { n_features, trees } => {
                if trees.is_empty() {
                    return Err("forest model has no trees".to_string());
                }
                for (t, tree) in trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return Err(format!("tree {t} has no nodes"));
                    }
                    for node in &tree.nodes {
                        if let TreeNode::Split {
                            feature,
                            left,
                            right,
                            ..
                        } = node
                        {
                            if *feature >= *n_features {
                                return Err(format!(
                                    "tree {t} splits on feature {feature} but the model \
                                     declares {n_features} feature(s)"
                                ));
                            }
                            if *left >= tree.nodes.len() || *right >= tree.nodes.len() {
                                return Err(format!("tree {t} has an out-of-range child index"));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        match self {
            RegressionArtifact::Linear {
                intercept,
                coefficients,
            } => {
                intercept
                    + coefficients
                        .iter()
                        .zip(row)
                        .map(|(w, x)| w * x)
                        .sum::<f64>()
            }
            RegressionArtifact::Forest { trees, .. } => {
                let sum: f64 = trees.iter().map(|tree| walk(tree, row)).sum();
                sum / trees.len() as f64
            }
        }
    }
}

fn walk(tree: &DecisionTree, row: &[f64]) -> f64 {
    let mut node = &tree.nodes[0];
    loop {
        match node {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                // NaN comparisons are false, so missing values fall right.
                let next = if row[*feature] <= *threshold {
                    *left
                } else {
                    *right
                };
                node = &tree.nodes[next];
            }
        }
    }
}

impl BioactivityModel for RegressionArtifact {
    fn expected_features(&self) -> usize {
        match self {
            RegressionArtifact::Linear { coefficients, .. } => coefficients.len(),
            RegressionArtifact::Forest { n_features, .. } => *n_features,
        }
    }

    fn predict(&self, matrix: &FeatureMatrix) -> Result<Vec<f64>, PipelineError> {
        let expected = self.expected_features();
        let actual = matrix.columns.len();
        if actual != expected {
            return Err(PipelineError::PredictionShape { expected, actual });
        }

        Ok(matrix.rows.iter().map(|row| self.predict_row(row)).collect())
    }
}

/// Deserialize the model artifact. Loaded once per prediction request;
/// a missing, corrupt or self-inconsistent artifact is a ModelLoad error.
pub fn load_model(path: &Path) -> Result<RegressionArtifact, PipelineError> {
    let bytes = std::fs::read(path).map_err(|e| PipelineError::ModelLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let artifact: RegressionArtifact =
        serde_json::from_slice(&bytes).map_err(|e| PipelineError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    artifact.validate().map_err(|reason| PipelineError::ModelLoad {
        path: path.to_path_buf(),
        reason,
    })?;

    Ok(artifact)
}

/// Run the model over the whole matrix in one call and pair prediction i
/// with record i's name.
pub fn predict_activities(
    model: &dyn BioactivityModel,
    matrix: &FeatureMatrix,
    records: &[MoleculeRecord],
) -> Result<Vec<PredictedActivity>, PipelineError> {
    let predictions = model.predict(matrix)?;

    Ok(records
        .iter()
        .zip(predictions)
        .map(|(record, p_ic50)| PredictedActivity {
            molecule_name: record.name.clone(),
            p_ic50,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(columns: &[&str], rows: Vec<Vec<f64>>) -> FeatureMatrix {
        FeatureMatrix {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn linear_model_predicts_per_row() {
        let model = RegressionArtifact::Linear {
            intercept: 1.0,
            coefficients: vec![2.0, 3.0],
        };
        let m = matrix(&["a", "b"], vec![vec![1.0, 1.0], vec![0.0, 1.0]]);

        assert_eq!(model.predict(&m).unwrap(), vec![6.0, 4.0]);
    }

    #[test]
    fn forest_model_averages_trees() {
        let stump = |value| DecisionTree {
            nodes: vec![
                TreeNode::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 0.0 },
                TreeNode::Leaf { value },
            ],
        };
        let model = RegressionArtifact::Forest {
            n_features: 1,
            trees: vec![stump(4.0), stump(8.0)],
        };
        let m = matrix(&["a"], vec![vec![1.0], vec![0.0]]);

        assert_eq!(model.predict(&m).unwrap(), vec![6.0, 0.0]);
    }

    #[test]
    fn column_count_mismatch_is_a_shape_error() {
        let model = RegressionArtifact::Linear {
            intercept: 0.0,
            coefficients: vec![1.0, 1.0, 1.0],
        };
        let m = matrix(&["a", "b"], vec![vec![1.0, 1.0]]);

        match model.predict(&m).unwrap_err() {
            PipelineError::PredictionShape { expected, actual } => {
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn predictions_pair_with_names_in_order() {
        let model = RegressionArtifact::Linear {
            intercept: 0.0,
            coefficients: vec![1.0],
        };
        let m = matrix(&["a"], vec![vec![5.0], vec![6.0]]);
        let records = vec![
            MoleculeRecord {
                smiles: "CCO".to_string(),
                name: "ethanol".to_string(),
            },
            MoleculeRecord {
                smiles: "CCN".to_string(),
                name: "ethylamine".to_string(),
            },
        ];

        let results = predict_activities(&model, &m, &records).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].molecule_name, "ethanol");
        assert_eq!(results[0].p_ic50, 5.0);
        assert_eq!(results[1].molecule_name, "ethylamine");
        assert_eq!(results[1].p_ic50, 6.0);
    }
}
