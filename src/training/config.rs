//! Model selection and hyperparameter configuration

use crate::error::{BpSelectError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of regression model to fit for each trial
///
/// `Unsupported` is a real variant, not an error: a trial with an unsupported
/// kind produces no predictions and the search simply records no candidate
/// for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelKind {
    /// Single regression tree
    DecisionTree,
    /// Bootstrap ensemble of regression trees
    RandomForest,
    /// Anything else; yields no predictions
    Unsupported,
}

impl FromStr for ModelKind {
    type Err = std::convert::Infallible;

    /// Unknown names map to `Unsupported` instead of failing, matching the
    /// permissive skip behavior of the trial loop.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "decision_tree" | "tree" => ModelKind::DecisionTree,
            "random_forest" | "forest" => ModelKind::RandomForest,
            _ => ModelKind::Unsupported,
        })
    }
}

/// Hyperparameters forwarded to the chosen model variant
///
/// Fields that only apply to one variant (`n_estimators` for the forest) are
/// ignored by the other. Validation happens here, at construction time, not
/// inside the model constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    /// Maximum tree depth (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf
    pub min_samples_leaf: usize,
    /// Number of trees (forest only)
    pub n_estimators: usize,
    /// Seed for the forest's bootstrap sampling
    pub random_seed: Option<u64>,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            n_estimators: 100,
            random_seed: Some(42),
        }
    }
}

impl TreeParams {
    /// Builder method to set max depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Builder method to set minimum samples to split
    pub fn with_min_samples_split(mut self, n: usize) -> Self {
        self.min_samples_split = n;
        self
    }

    /// Builder method to set minimum samples per leaf
    pub fn with_min_samples_leaf(mut self, n: usize) -> Self {
        self.min_samples_leaf = n;
        self
    }

    /// Builder method to set the number of trees
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    /// Builder method to set the random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Check field ranges; call once after assembling the record.
    pub fn validated(self) -> Result<Self> {
        if self.min_samples_split < 2 {
            return Err(BpSelectError::InvalidParameter {
                name: "min_samples_split".to_string(),
                value: self.min_samples_split.to_string(),
                reason: "must be at least 2".to_string(),
            });
        }
        if self.min_samples_leaf < 1 {
            return Err(BpSelectError::InvalidParameter {
                name: "min_samples_leaf".to_string(),
                value: self.min_samples_leaf.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.n_estimators == 0 {
            return Err(BpSelectError::InvalidParameter {
                name: "n_estimators".to_string(),
                value: "0".to_string(),
                reason: "forest needs at least one tree".to_string(),
            });
        }
        if self.max_depth == Some(0) {
            return Err(BpSelectError::InvalidParameter {
                name: "max_depth".to_string(),
                value: "0".to_string(),
                reason: "a depth-0 tree cannot split".to_string(),
            });
        }
        Ok(self)
    }
}
