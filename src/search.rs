//! Windowed best-subset feature search
//!
//! Scans every contiguous window of the feature list (all sizes short of the
//! full set, at every offset), fits a fresh model per window, and keeps the
//! trial that strictly improves the selection criterion.

use crate::data::FeatureMatrix;
use crate::error::{BpSelectError, Result};
use crate::evaluate::{evaluate, Evaluation};
use crate::metrics::RegressionReport;
use crate::training::{FittedModel, ModelKind, TreeParams};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, info};

/// Selection criterion scored on the test split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Criterion {
    /// Mean squared error, minimized
    Mse,
    /// Coefficient of determination, maximized
    R2,
    /// Feature-count-penalized R², maximized
    AdjustedR2,
}

impl Criterion {
    /// Worst-possible starting score, so any finite trial beats it
    pub fn sentinel(&self) -> f64 {
        match self {
            Criterion::Mse => f64::INFINITY,
            Criterion::R2 | Criterion::AdjustedR2 => f64::NEG_INFINITY,
        }
    }

    /// Strict improvement over the incumbent; ties keep the incumbent
    pub fn better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Criterion::Mse => candidate < incumbent,
            Criterion::R2 | Criterion::AdjustedR2 => candidate > incumbent,
        }
    }

    /// Read this criterion's value out of a report
    pub fn extract(&self, report: &RegressionReport) -> f64 {
        match self {
            Criterion::Mse => report.mse,
            Criterion::R2 => report.r2,
            Criterion::AdjustedR2 => report.adjusted_r2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Mse => "mse",
            Criterion::R2 => "r2",
            Criterion::AdjustedR2 => "adjusted_r_2",
        }
    }
}

impl FromStr for Criterion {
    type Err = BpSelectError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mse" => Ok(Criterion::Mse),
            "r2" | "r_2" => Ok(Criterion::R2),
            "adjusted_r_2" | "adjusted_r2" => Ok(Criterion::AdjustedR2),
            other => Err(BpSelectError::InvalidParameter {
                name: "criterion".to_string(),
                value: other.to_string(),
                reason: "expected one of mse, r2, adjusted_r_2".to_string(),
            }),
        }
    }
}

/// Everything a search needs besides the data itself
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub criterion: Criterion,
    pub model: ModelKind,
    pub params: TreeParams,
    /// 0 = silent, 1 = final result, 2+ = every trial
    pub verbosity: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            criterion: Criterion::Mse,
            model: ModelKind::DecisionTree,
            params: TreeParams::default(),
            verbosity: 0,
        }
    }
}

/// The winning trial of a completed search
#[derive(Debug, Clone)]
pub struct BestTrial {
    /// Feature names of the winning window, in original order
    pub features: Vec<String>,
    pub model: FittedModel,
    pub train_report: RegressionReport,
    pub test_report: RegressionReport,
    /// The criterion value the trial won with (taken from the test report)
    pub criterion_value: f64,
}

/// Contiguous-window best-subset search over a fixed feature ordering
#[derive(Debug, Clone)]
pub struct SubsetSearch {
    config: SearchConfig,
}

impl SubsetSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the full window scan and return the best trial, if any.
    ///
    /// Window sizes run from 1 to one short of the full feature set; the
    /// full set itself is never tried. At each size every offset is tried
    /// until the window would run past the end of the list, so windows never
    /// wrap around. With a single feature there are no eligible windows and
    /// the search comes back empty; the same happens when the model kind is
    /// unsupported, since no trial ever produces a score.
    pub fn run(
        &self,
        features: &[String],
        train: &FeatureMatrix,
        train_y: &Array1<f64>,
        test: &FeatureMatrix,
        test_y: &Array1<f64>,
    ) -> Result<Option<BestTrial>> {
        let n_features = features.len();
        let criterion = self.config.criterion;

        let mut best_score = criterion.sentinel();
        let mut best: Option<BestTrial> = None;
        let mut n_trials = 0usize;

        for size in 1..n_features {
            for offset in 0..n_features {
                if offset + size > n_features {
                    break;
                }
                let window = &features[offset..offset + size];

                let train_x = train.select(window)?;
                let test_x = test.select(window)?;

                let Some(Evaluation {
                    train_report,
                    test_report,
                    model,
                }) = evaluate(
                    &train_x,
                    train_y,
                    &test_x,
                    test_y,
                    self.config.model,
                    &self.config.params,
                )?
                else {
                    continue;
                };

                n_trials += 1;
                let score = criterion.extract(&test_report);

                if self.config.verbosity >= 2 {
                    debug!(
                        size,
                        offset,
                        features = ?window,
                        criterion = criterion.as_str(),
                        score,
                        "trial scored"
                    );
                }

                if criterion.better(score, best_score) {
                    best_score = score;
                    best = Some(BestTrial {
                        features: window.to_vec(),
                        model,
                        train_report,
                        test_report,
                        criterion_value: score,
                    });
                }
            }
        }

        if self.config.verbosity >= 1 {
            match &best {
                Some(trial) => info!(
                    n_trials,
                    features = ?trial.features,
                    criterion = criterion.as_str(),
                    score = trial.criterion_value,
                    "search finished"
                ),
                None => info!(n_trials, "search finished with no candidate"),
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    fn constant_column(value: f64, n: usize) -> Vec<f64> {
        vec![value; n]
    }

    /// Train/test pair where only the middle feature carries signal.
    /// Column order: noise, signal, noise.
    fn signal_in_f2() -> (FeatureMatrix, Array1<f64>, FeatureMatrix, Array1<f64>) {
        let names = vec!["f1".to_string(), "f2".to_string(), "f3".to_string()];

        let signal_train = vec![1.0, 2.0, 3.0, 4.0, 10.0, 11.0, 12.0, 13.0];
        let y_train = array![0.0, 0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0];
        let n = signal_train.len();

        let mut train_vals = Array2::zeros((n, 3));
        for (i, &s) in signal_train.iter().enumerate() {
            train_vals[[i, 0]] = 0.5;
            train_vals[[i, 1]] = s;
            train_vals[[i, 2]] = 0.5;
        }
        let train = FeatureMatrix::new(names.clone(), train_vals).unwrap();

        let signal_test = vec![2.5, 11.5];
        let y_test = array![0.0, 5.0];
        let mut test_vals = Array2::zeros((2, 3));
        for (i, &s) in signal_test.iter().enumerate() {
            test_vals[[i, 0]] = 0.5;
            test_vals[[i, 1]] = s;
            test_vals[[i, 2]] = 0.5;
        }
        let test = FeatureMatrix::new(names, test_vals).unwrap();

        (train, y_train, test, y_test)
    }

    #[test]
    fn test_criterion_parsing() {
        assert_eq!("mse".parse::<Criterion>().unwrap(), Criterion::Mse);
        assert_eq!("R2".parse::<Criterion>().unwrap(), Criterion::R2);
        assert_eq!(
            "adjusted_r_2".parse::<Criterion>().unwrap(),
            Criterion::AdjustedR2
        );
        assert!("rmse".parse::<Criterion>().is_err());
    }

    #[test]
    fn test_sentinel_direction() {
        assert!(Criterion::Mse.better(1.0, Criterion::Mse.sentinel()));
        assert!(Criterion::R2.better(-5.0, Criterion::R2.sentinel()));
        // ties are not improvements
        assert!(!Criterion::Mse.better(1.0, 1.0));
        assert!(!Criterion::R2.better(0.5, 0.5));
    }

    #[test]
    fn test_search_finds_signal_feature() {
        let (train, y_train, test, y_test) = signal_in_f2();
        let search = SubsetSearch::new(SearchConfig::default());

        let best = search
            .run(train.names().to_vec().as_slice(), &train, &y_train, &test, &y_test)
            .unwrap()
            .expect("search must find a candidate");

        // Only windows containing f2 can predict anything; the smallest such
        // window wins by first-found strict improvement.
        assert!(best.features.contains(&"f2".to_string()));
        assert!(best.test_report.mse < 1e-9);
    }

    #[test]
    fn test_windows_are_contiguous() {
        // With the signal in the last column, windows pairing f1 with f3 do
        // not exist, so the winner must end at f3.
        let names = vec!["f1".to_string(), "f2".to_string(), "f3".to_string()];
        let y_train = array![0.0, 0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0];
        let signal = [1.0, 2.0, 3.0, 4.0, 10.0, 11.0, 12.0, 13.0];
        let mut train_vals = Array2::zeros((8, 3));
        for (i, &s) in signal.iter().enumerate() {
            train_vals[[i, 2]] = s;
        }
        let train = FeatureMatrix::new(names.clone(), train_vals).unwrap();

        let mut test_vals = Array2::zeros((2, 3));
        test_vals[[0, 2]] = 2.5;
        test_vals[[1, 2]] = 11.5;
        let test = FeatureMatrix::new(names.clone(), test_vals).unwrap();
        let y_test = array![0.0, 5.0];

        let search = SubsetSearch::new(SearchConfig::default());
        let best = search
            .run(&names, &train, &y_train, &test, &y_test)
            .unwrap()
            .unwrap();

        assert_eq!(*best.features.last().unwrap(), "f3".to_string());
        // Full set is excluded, so at most two features
        assert!(best.features.len() < 3);
    }

    #[test]
    fn test_single_feature_yields_no_candidate() {
        let names = vec!["only".to_string()];
        let train = FeatureMatrix::new(
            names.clone(),
            Array2::from_shape_vec((4, 1), constant_column(1.0, 4)).unwrap(),
        )
        .unwrap();
        let test = FeatureMatrix::new(
            names.clone(),
            Array2::from_shape_vec((2, 1), constant_column(1.0, 2)).unwrap(),
        )
        .unwrap();
        let y_train = array![1.0, 2.0, 3.0, 4.0];
        let y_test = array![1.0, 2.0];

        let search = SubsetSearch::new(SearchConfig::default());
        let best = search.run(&names, &train, &y_train, &test, &y_test).unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_unsupported_model_yields_no_candidate() {
        let (train, y_train, test, y_test) = signal_in_f2();
        let config = SearchConfig {
            model: ModelKind::Unsupported,
            ..SearchConfig::default()
        };
        let search = SubsetSearch::new(config);

        let best = search
            .run(train.names().to_vec().as_slice(), &train, &y_train, &test, &y_test)
            .unwrap();
        assert!(best.is_none());
    }

    #[test]
    fn test_tie_break_keeps_first_window() {
        // Two identical signal columns: every window containing either scores
        // the same, so the first-scanned window (size 1, offset 0) must win.
        let names = vec!["a".to_string(), "b".to_string(), "pad".to_string()];
        let signal = [1.0, 2.0, 3.0, 4.0, 10.0, 11.0, 12.0, 13.0];
        let y_train = array![0.0, 0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0];

        let mut train_vals = Array2::zeros((8, 3));
        for (i, &s) in signal.iter().enumerate() {
            train_vals[[i, 0]] = s;
            train_vals[[i, 1]] = s;
            train_vals[[i, 2]] = 0.5;
        }
        let train = FeatureMatrix::new(names.clone(), train_vals).unwrap();

        let mut test_vals = Array2::zeros((2, 3));
        test_vals[[0, 0]] = 2.5;
        test_vals[[0, 1]] = 2.5;
        test_vals[[0, 2]] = 0.5;
        test_vals[[1, 0]] = 11.5;
        test_vals[[1, 1]] = 11.5;
        test_vals[[1, 2]] = 0.5;
        let test = FeatureMatrix::new(names.clone(), test_vals).unwrap();
        let y_test = array![0.0, 5.0];

        let search = SubsetSearch::new(SearchConfig::default());
        let best = search
            .run(&names, &train, &y_train, &test, &y_test)
            .unwrap()
            .unwrap();

        assert_eq!(best.features, vec!["a".to_string()]);
    }
}
