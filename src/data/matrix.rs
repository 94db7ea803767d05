//! Named numeric feature matrix handed to the models

use crate::error::{BpSelectError, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;

/// An ordered set of named numeric columns, rows aligned with one target
/// vector. Immutable for the duration of a search.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    names: Vec<String>,
    values: Array2<f64>,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if names.len() != values.ncols() {
            return Err(BpSelectError::ShapeError {
                expected: format!("{} column names", values.ncols()),
                actual: format!("{} column names", names.len()),
            });
        }
        Ok(Self { names, values })
    }

    /// Extract all columns of a (fully numeric) DataFrame into a row-major
    /// matrix. Column order is preserved.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let names: Vec<String> = df
            .get_column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();
        let values = columns_to_array2(df, &names)?;
        Self::new(names, values)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn nrows(&self) -> usize {
        self.values.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.values.ncols()
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Restrict to the given columns, in the given order.
    pub fn select(&self, names: &[String]) -> Result<Array2<f64>> {
        let indices: Vec<usize> = names
            .iter()
            .map(|name| {
                self.names
                    .iter()
                    .position(|n| n == name)
                    .ok_or_else(|| BpSelectError::FeatureNotFound(name.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Array2::from_shape_fn(
            (self.values.nrows(), indices.len()),
            |(r, c)| self.values[[r, indices[c]]],
        ))
    }
}

/// Extract named columns from a DataFrame into a row-major `Array2<f64>`.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let series = df
                .column(col_name)
                .map_err(|_| BpSelectError::FeatureNotFound(col_name.clone()))?;
            let series_f64 = series.cast(&DataType::Float64)?;
            let values: Vec<f64> = series_f64
                .f64()
                .map_err(|e| BpSelectError::DataError(e.to_string()))?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| col_refs[c][r]))
}

/// Split a feature matrix and its target by row, first block for training.
///
/// Rows are assumed to be pre-shuffled; this is a plain slice, not a
/// re-randomization.
pub fn train_test_split(
    x: &FeatureMatrix,
    y: &Array1<f64>,
    test_split: f64,
) -> Result<(FeatureMatrix, FeatureMatrix, Array1<f64>, Array1<f64>)> {
    if !(0.0..1.0).contains(&test_split) {
        return Err(BpSelectError::InvalidParameter {
            name: "test_split".to_string(),
            value: test_split.to_string(),
            reason: "must be in [0, 1)".to_string(),
        });
    }
    if x.nrows() != y.len() {
        return Err(BpSelectError::ShapeError {
            expected: format!("y length = {}", x.nrows()),
            actual: format!("y length = {}", y.len()),
        });
    }

    let n = x.nrows();
    let test_size = (n as f64 * test_split) as usize;
    let train_size = n - test_size;

    let x_train = x.values.slice(ndarray::s![..train_size, ..]).to_owned();
    let x_test = x.values.slice(ndarray::s![train_size.., ..]).to_owned();
    let y_train = y.slice(ndarray::s![..train_size]).to_owned();
    let y_test = y.slice(ndarray::s![train_size..]).to_owned();

    Ok((
        FeatureMatrix::new(x.names.clone(), x_train)?,
        FeatureMatrix::new(x.names.clone(), x_test)?,
        y_train,
        y_test,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn matrix() -> FeatureMatrix {
        FeatureMatrix::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0], [10.0, 11.0, 12.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_select_preserves_order() {
        let m = matrix();
        let sub = m.select(&["b".to_string(), "c".to_string()]).unwrap();
        assert_eq!(sub.ncols(), 2);
        assert_eq!(sub[[0, 0]], 2.0);
        assert_eq!(sub[[0, 1]], 3.0);
    }

    #[test]
    fn test_select_unknown_column() {
        let m = matrix();
        let err = m.select(&["nope".to_string()]).unwrap_err();
        assert!(matches!(err, BpSelectError::FeatureNotFound(name) if name == "nope"));
    }

    #[test]
    fn test_name_count_must_match() {
        let r = FeatureMatrix::new(vec!["a".to_string()], array![[1.0, 2.0]]);
        assert!(matches!(r, Err(BpSelectError::ShapeError { .. })));
    }

    #[test]
    fn test_from_dataframe() {
        let df = polars::df!(
            "x1" => &[1.0, 2.0],
            "x2" => &[3.0, 4.0]
        )
        .unwrap();
        let m = FeatureMatrix::from_dataframe(&df).unwrap();
        assert_eq!(m.names(), &["x1".to_string(), "x2".to_string()]);
        assert_eq!(m.values()[[1, 0]], 2.0);
    }

    #[test]
    fn test_train_test_split_sizes() {
        let m = matrix();
        let y = array![1.0, 2.0, 3.0, 4.0];
        let (x_train, x_test, y_train, y_test) = train_test_split(&m, &y, 0.25).unwrap();
        assert_eq!(x_train.nrows(), 3);
        assert_eq!(x_test.nrows(), 1);
        assert_eq!(y_train.len(), 3);
        assert_eq!(y_test.len(), 1);
        // last row lands in the test split
        assert_eq!(x_test.values()[[0, 0]], 10.0);
        assert_eq!(y_test[0], 4.0);
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        let m = matrix();
        let y = array![1.0, 2.0, 3.0, 4.0];
        assert!(train_test_split(&m, &y, 1.0).is_err());
    }
}
