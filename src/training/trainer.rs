//! Fitting a model variant and producing train/test predictions

use crate::error::Result;
use super::config::{ModelKind, TreeParams};
use super::decision_tree::DecisionTree;
use super::random_forest::RandomForest;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// A fitted model of either supported variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum FittedModel {
    DecisionTree(DecisionTree),
    RandomForest(RandomForest),
}

impl FittedModel {
    /// Make predictions with whichever variant is held
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        match self {
            FittedModel::DecisionTree(m) => m.predict(x),
            FittedModel::RandomForest(m) => m.predict(x),
        }
    }

    /// Display label for result tables
    pub fn label(&self) -> &'static str {
        match self {
            FittedModel::DecisionTree(_) => "DecisionTreeRegressor",
            FittedModel::RandomForest(_) => "RandomForestRegressor",
        }
    }

    /// Save the fitted model as JSON
    pub fn save(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a fitted model from JSON
    pub fn load(path: &str) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let model: Self = serde_json::from_str(&json)?;
        Ok(model)
    }
}

/// Predictions of a freshly fitted model on both splits
#[derive(Debug, Clone)]
pub struct FitOutput {
    pub train_predictions: Array1<f64>,
    pub test_predictions: Array1<f64>,
    pub model: FittedModel,
}

/// Train a fresh model instance and predict on both splits.
///
/// `params` is forwarded verbatim to the chosen variant. An unsupported kind
/// returns `Ok(None)` rather than an error; the trial loop treats that as
/// "no candidate" and moves on, so a misspelled kind silently skips every
/// trial instead of aborting a long search.
pub fn fit_and_predict(
    train_x: &Array2<f64>,
    train_y: &Array1<f64>,
    test_x: &Array2<f64>,
    kind: ModelKind,
    params: &TreeParams,
) -> Result<Option<FitOutput>> {
    let model = match kind {
        ModelKind::DecisionTree => {
            let mut tree = DecisionTree::new()
                .with_min_samples_split(params.min_samples_split)
                .with_min_samples_leaf(params.min_samples_leaf);
            if let Some(depth) = params.max_depth {
                tree = tree.with_max_depth(depth);
            }
            tree.fit(train_x, train_y)?;
            FittedModel::DecisionTree(tree)
        }
        ModelKind::RandomForest => {
            let mut forest = RandomForest::new(params.n_estimators)
                .with_min_samples_split(params.min_samples_split)
                .with_min_samples_leaf(params.min_samples_leaf);
            if let Some(depth) = params.max_depth {
                forest = forest.with_max_depth(depth);
            }
            if let Some(seed) = params.random_seed {
                forest = forest.with_random_state(seed);
            }
            forest.fit(train_x, train_y)?;
            FittedModel::RandomForest(forest)
        }
        ModelKind::Unsupported => return Ok(None),
    };

    let train_predictions = model.predict(train_x)?;
    let test_predictions = model.predict(test_x)?;

    Ok(Some(FitOutput {
        train_predictions,
        test_predictions,
        model,
    }))
}
