//! Side-by-side results table for fitted models

use crate::error::{BpSelectError, Result};
use crate::metrics::RegressionReport;
use polars::prelude::*;

/// Assemble per-model train/test metrics into a single DataFrame, one row per
/// model. Rows follow input order; columns pair each metric's train value
/// with its test value.
pub fn tabularize(
    model_names: &[String],
    train_reports: &[RegressionReport],
    test_reports: &[RegressionReport],
) -> Result<DataFrame> {
    if model_names.len() != train_reports.len() || model_names.len() != test_reports.len() {
        return Err(BpSelectError::ShapeError {
            expected: format!("{} train and test reports", model_names.len()),
            actual: format!(
                "{} train reports, {} test reports",
                train_reports.len(),
                test_reports.len()
            ),
        });
    }

    let df = df!(
        "Model" => model_names,
        "Train Mean Sq Error" => train_reports.iter().map(|r| r.mse).collect::<Vec<_>>(),
        "Test Mean Sq Error" => test_reports.iter().map(|r| r.mse).collect::<Vec<_>>(),
        "Train R2" => train_reports.iter().map(|r| r.r2).collect::<Vec<_>>(),
        "Test R2" => test_reports.iter().map(|r| r.r2).collect::<Vec<_>>(),
        "Train Adjusted R2" => train_reports.iter().map(|r| r.adjusted_r2).collect::<Vec<_>>(),
        "Test Adjusted R2" => test_reports.iter().map(|r| r.adjusted_r2).collect::<Vec<_>>(),
    )?;

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(mse: f64, r2: f64, adj: f64) -> RegressionReport {
        RegressionReport {
            r2,
            adjusted_r2: adj,
            mse,
        }
    }

    #[test]
    fn test_table_shape_and_columns() {
        let names = vec![
            "DecisionTreeRegressor".to_string(),
            "RandomForestRegressor".to_string(),
        ];
        let train = vec![report(1.0, 0.9, 0.88), report(0.5, 0.95, 0.94)];
        let test = vec![report(2.0, 0.8, 0.78), report(1.5, 0.85, 0.83)];

        let df = tabularize(&names, &train, &test).unwrap();
        assert_eq!(df.shape(), (2, 7));
        assert_eq!(
            df.get_column_names(),
            vec![
                "Model",
                "Train Mean Sq Error",
                "Test Mean Sq Error",
                "Train R2",
                "Test R2",
                "Train Adjusted R2",
                "Test Adjusted R2"
            ]
        );
    }

    #[test]
    fn test_row_order_follows_input() {
        let names = vec!["b".to_string(), "a".to_string()];
        let train = vec![report(1.0, 0.1, 0.1), report(2.0, 0.2, 0.2)];
        let test = vec![report(3.0, 0.3, 0.3), report(4.0, 0.4, 0.4)];

        let df = tabularize(&names, &train, &test).unwrap();
        let mse = df.column("Train Mean Sq Error").unwrap().f64().unwrap();
        assert_eq!(mse.get(0), Some(1.0));
        assert_eq!(mse.get(1), Some(2.0));
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let names = vec!["only".to_string()];
        let train = vec![report(1.0, 0.1, 0.1), report(2.0, 0.2, 0.2)];
        let test = vec![report(3.0, 0.3, 0.3)];
        assert!(tabularize(&names, &train, &test).is_err());
    }

    #[test]
    fn test_empty_table() {
        let df = tabularize(&[], &[], &[]).unwrap();
        assert_eq!(df.shape(), (0, 7));
    }
}
