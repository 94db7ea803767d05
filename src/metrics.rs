//! Goodness-of-fit metrics for regression models

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Regression metrics for one prediction/target pair
///
/// `r2` is computed with the *predictions* as the reference series, i.e.
/// `compute(p, t, k)` and `compute(t, p, k)` generally differ. The study has
/// always scored models this way, so the argument order is part of the
/// contract; callers must pass predictions first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Coefficient of determination
    pub r2: f64,
    /// R² penalized for feature count
    pub adjusted_r2: f64,
    /// Mean squared error
    pub mse: f64,
}

impl RegressionReport {
    /// Compute all metrics from one prediction vector and one target vector.
    ///
    /// `n_features` is the number of feature columns the model was fitted on;
    /// it only enters the adjusted-R² penalty. When `n - n_features - 1 == 0`
    /// the adjusted value is non-finite and is returned as-is — comparisons
    /// downstream rely on IEEE semantics, so nothing is clamped here.
    pub fn compute(predictions: &Array1<f64>, targets: &Array1<f64>, n_features: usize) -> Self {
        let n = predictions.len() as f64;

        let ss_res: f64 = predictions
            .iter()
            .zip(targets.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum();

        let pred_mean: f64 = predictions.iter().sum::<f64>() / n;
        let ss_tot: f64 = predictions.iter().map(|p| (p - pred_mean).powi(2)).sum();

        let r2 = 1.0 - ss_res / ss_tot;
        let mse = ss_res / n;
        let adjusted_r2 = adjusted_r2(r2, predictions.len(), n_features);

        Self { r2, adjusted_r2, mse }
    }
}

/// Adjusted R²: `1 - (1 - r2) * (n - 1) / (n - k - 1)`
///
/// The denominator is evaluated in floating point, so `n - k - 1 == 0`
/// yields ±inf (or NaN when `r2 == 1`) rather than a panic.
pub fn adjusted_r2(r2: f64, n: usize, k: usize) -> f64 {
    let n = n as f64;
    let k = k as f64;
    1.0 - (1.0 - r2) * (n - 1.0) / (n - k - 1.0)
}
