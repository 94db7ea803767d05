//! One-hot encoding and target separation

use crate::data::matrix::FeatureMatrix;
use crate::error::{BpSelectError, Result};
use ndarray::Array1;
use polars::prelude::*;

/// One-hot encode the categorical columns and append the numeric ones.
///
/// Each categorical column expands to one indicator per level minus the
/// first (the dropped level is the implicit baseline). Numeric columns keep
/// their values and land after the indicators, in the given order.
pub fn one_hot_encode(
    df: &DataFrame,
    categorical: &[String],
    numeric: &[String],
) -> Result<DataFrame> {
    if categorical.is_empty() {
        return Ok(df.select(numeric.iter().map(|s| s.as_str()))?);
    }

    let cat_df = df.select(categorical.iter().map(|s| s.as_str()))?;
    let mut encoded = cat_df.to_dummies(None, true)?;

    for name in numeric {
        let column = df
            .column(name)
            .map_err(|_| BpSelectError::FeatureNotFound(name.clone()))?;
        encoded.with_column(column.clone())?;
    }

    Ok(encoded)
}

/// Split a frame into a feature matrix and a target vector.
///
/// The target column is removed from the features; everything left must be
/// numeric (run [`one_hot_encode`] first).
pub fn separate_target(df: &DataFrame, target: &str) -> Result<(FeatureMatrix, Array1<f64>)> {
    let y_series = df
        .column(target)
        .map_err(|_| BpSelectError::FeatureNotFound(target.to_string()))?
        .cast(&DataType::Float64)?;
    let y: Vec<f64> = y_series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(0.0))
        .collect();

    let x_df = df.drop(target)?;
    let x = FeatureMatrix::from_dataframe(&x_df)?;

    Ok((x, Array1::from_vec(y)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "geschlecht" => &["w", "m", "w", "unknown"],
            "raucher" => &["ja", "nein", "nein", "ja"],
            "age" => &[36i64, 46, 26, 50],
            "messwert_bp_sys" => &[120.0, 130.0, 140.0, 125.0],
        )
        .unwrap()
    }

    #[test]
    fn test_one_hot_drops_first_level() {
        let df = frame();
        let encoded = one_hot_encode(
            &df,
            &["geschlecht".to_string(), "raucher".to_string()],
            &["age".to_string(), "messwert_bp_sys".to_string()],
        )
        .unwrap();

        // 3 levels of geschlecht -> 2 indicators, 2 of raucher -> 1
        assert_eq!(encoded.width(), 5);
        assert!(encoded.column("age").is_ok());
        assert!(encoded.column("messwert_bp_sys").is_ok());
        // numeric columns come after the indicators
        let names = encoded.get_column_names();
        assert_eq!(names[names.len() - 2], "age");
    }

    #[test]
    fn test_no_categoricals() {
        let df = frame();
        let encoded = one_hot_encode(&df, &[], &["age".to_string()]).unwrap();
        assert_eq!(encoded.width(), 1);
        assert_eq!(encoded.height(), 4);
    }

    #[test]
    fn test_separate_target() {
        let df = frame();
        let encoded = one_hot_encode(
            &df,
            &["geschlecht".to_string()],
            &["age".to_string(), "messwert_bp_sys".to_string()],
        )
        .unwrap();

        let (x, y) = separate_target(&encoded, "messwert_bp_sys").unwrap();
        assert_eq!(y.len(), 4);
        assert_eq!(y[0], 120.0);
        assert_eq!(x.ncols(), encoded.width() - 1);
        assert!(!x.names().contains(&"messwert_bp_sys".to_string()));
    }

    #[test]
    fn test_separate_missing_target() {
        let df = frame();
        let r = separate_target(&df, "nope");
        assert!(matches!(r, Err(BpSelectError::FeatureNotFound(_))));
    }
}
