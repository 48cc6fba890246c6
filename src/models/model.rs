//! Model evaluation for linear and boosted-tree regressors.
//!
//! The artifact is a tagged JSON object:
//!
//! ```json
//! { "kind": "linear", "intercept": 1200.0, "coefficients": [...], "feature_names": [...] }
//! { "kind": "tree_ensemble", "base_score": 0.5, "n_features": 129, "trees": [...] }
//! ```
//!
//! Each tree is a flat node array with the root at index 0. Traversal goes left
//! when `x < threshold`; NaN inputs follow `default_left`. This matches how
//! gradient-boosting libraries dump their trees.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::AlignedRow;

/// Failure raised while running inference on one row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    #[error("feature mismatch at {position}: model expects '{expected}', row has '{found}'")]
    FeatureName {
        position: usize,
        expected: String,
        found: String,
    },
    #[error("feature shape mismatch, expected: {expected}, got {found}")]
    Shape { expected: usize, found: usize },
    #[error("tree {tree} references missing node {node}")]
    MissingNode { tree: usize, node: usize },
    #[error("tree {tree} does not reach a leaf")]
    Unterminated { tree: usize },
    #[error("model produced a non-finite prediction")]
    NonFinite,
}

/// Internal inconsistency found when a model artifact is loaded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelDefect {
    #[error("{coefficients} coefficients but {names} feature names")]
    CoefficientCount { coefficients: usize, names: usize },
    #[error("n_features is {n_features} but {names} feature names were given")]
    FeatureCount { n_features: usize, names: usize },
    #[error("tree {tree} node {node} splits on feature {feature}, model has {n_features}")]
    SplitFeature {
        tree: usize,
        node: usize,
        feature: usize,
        n_features: usize,
    },
    #[error("tree {tree} has no nodes")]
    EmptyTree { tree: usize },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    TreeEnsemble(TreeEnsemble),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    pub n_features: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
    pub trees: Vec<RegressionTree>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeNode {
    Split(Split),
    Leaf { value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Split {
    pub feature: usize,
    pub threshold: f64,
    pub left: usize,
    pub right: usize,
    #[serde(default)]
    pub default_left: bool,
}

impl ModelArtifact {
    /// Human-readable label for terminal output.
    pub fn display_name(&self) -> &'static str {
        match self {
            ModelArtifact::Linear(_) => "linear regression",
            ModelArtifact::TreeEnsemble(_) => "gradient-boosted trees",
        }
    }

    /// Number of input features the model was fit on.
    pub fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear(m) => m.coefficients.len(),
            ModelArtifact::TreeEnsemble(m) => m.n_features,
        }
    }

    pub fn feature_names(&self) -> Option<&[String]> {
        match self {
            ModelArtifact::Linear(m) => m.feature_names.as_deref(),
            ModelArtifact::TreeEnsemble(m) => m.feature_names.as_deref(),
        }
    }

    /// Check the artifact is internally consistent (run once, at load time).
    pub fn validate(&self) -> Result<(), ModelDefect> {
        match self {
            ModelArtifact::Linear(m) => {
                if let Some(names) = &m.feature_names {
                    if names.len() != m.coefficients.len() {
                        return Err(ModelDefect::CoefficientCount {
                            coefficients: m.coefficients.len(),
                            names: names.len(),
                        });
                    }
                }
            }
            ModelArtifact::TreeEnsemble(m) => {
                if let Some(names) = &m.feature_names {
                    if names.len() != m.n_features {
                        return Err(ModelDefect::FeatureCount {
                            n_features: m.n_features,
                            names: names.len(),
                        });
                    }
                }
                for (tree, t) in m.trees.iter().enumerate() {
                    if t.nodes.is_empty() {
                        return Err(ModelDefect::EmptyTree { tree });
                    }
                    for (node, n) in t.nodes.iter().enumerate() {
                        if let TreeNode::Split(split) = n {
                            if split.feature >= m.n_features {
                                return Err(ModelDefect::SplitFeature {
                                    tree,
                                    node,
                                    feature: split.feature,
                                    n_features: m.n_features,
                                });
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Predict weekly sales for one aligned row.
    pub fn predict(&self, row: &AlignedRow) -> Result<f64, PredictError> {
        self.check_row(row)?;

        let y = match self {
            ModelArtifact::Linear(m) => m.predict_values(row.values()),
            ModelArtifact::TreeEnsemble(m) => m.predict_values(row.values())?,
        };

        if !y.is_finite() {
            return Err(PredictError::NonFinite);
        }
        Ok(y)
    }

    fn check_row(&self, row: &AlignedRow) -> Result<(), PredictError> {
        if let Some(names) = self.feature_names() {
            for (position, (expected, found)) in names.iter().zip(row.columns()).enumerate() {
                if expected != found {
                    return Err(PredictError::FeatureName {
                        position,
                        expected: expected.clone(),
                        found: found.clone(),
                    });
                }
            }
        }

        if row.len() != self.n_features() {
            return Err(PredictError::Shape {
                expected: self.n_features(),
                found: row.len(),
            });
        }
        Ok(())
    }
}

impl LinearModel {
    fn predict_values(&self, x: &[f64]) -> f64 {
        let beta = DVector::from_column_slice(&self.coefficients);
        let x = DVector::from_column_slice(x);
        self.intercept + beta.dot(&x)
    }
}

impl TreeEnsemble {
    fn predict_values(&self, x: &[f64]) -> Result<f64, PredictError> {
        let mut y = self.base_score;
        for (idx, tree) in self.trees.iter().enumerate() {
            y += tree.leaf_value(idx, x)?;
        }
        Ok(y)
    }
}

impl RegressionTree {
    fn leaf_value(&self, tree: usize, x: &[f64]) -> Result<f64, PredictError> {
        let mut node = 0;
        // A well-formed tree visits each node at most once on the way down; the
        // extra step lets a dangling child of the last visited node surface.
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(node) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split(split)) => {
                    let v = x.get(split.feature).copied().unwrap_or(f64::NAN);
                    let go_left = if v.is_nan() {
                        split.default_left
                    } else {
                        v < split.threshold
                    };
                    node = if go_left { split.left } else { split.right };
                }
                None => return Err(PredictError::MissingNode { tree, node }),
            }
        }
        Err(PredictError::Unterminated { tree })
    }
}
