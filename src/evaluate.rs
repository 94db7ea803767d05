//! Fit-and-score unit combining the trainer with the metrics engine

use crate::error::Result;
use crate::metrics::RegressionReport;
use crate::training::{fit_and_predict, FittedModel, ModelKind, TreeParams};
use ndarray::{Array1, Array2};

/// Outcome of one fit-and-score trial
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub train_report: RegressionReport,
    pub test_report: RegressionReport,
    pub model: FittedModel,
}

/// Fit a model on the train split and score it on both splits.
///
/// The feature count fed into the adjusted-R² penalty is the train matrix's
/// column count. Metrics are only computed when the trainer produced both
/// prediction vectors; an unsupported model kind therefore comes back as
/// `Ok(None)` with no metrics at all.
pub fn evaluate(
    train_x: &Array2<f64>,
    train_y: &Array1<f64>,
    test_x: &Array2<f64>,
    test_y: &Array1<f64>,
    kind: ModelKind,
    params: &TreeParams,
) -> Result<Option<Evaluation>> {
    let n_features = train_x.ncols();

    let Some(output) = fit_and_predict(train_x, train_y, test_x, kind, params)? else {
        return Ok(None);
    };

    let train_report = RegressionReport::compute(&output.train_predictions, train_y, n_features);
    let test_report = RegressionReport::compute(&output.test_predictions, test_y, n_features);

    Ok(Some(Evaluation {
        train_report,
        test_report,
        model: output.model,
    }))
}
