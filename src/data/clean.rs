//! Cleaning rules for the Styrian blood-pressure survey
//!
//! The raw export mixes typed and untyped columns and leaves several kinds of
//! missingness that mean different things: respondents outside the region have
//! no municipality at all, while respondents who skipped the personal block
//! have no sex recorded. Both get explicit category labels before rows with
//! genuinely missing measurements are dropped.

use crate::error::{BpSelectError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Columns cast to Float64 before any filtering
const MEASUREMENT_COLUMNS: [&str; 4] = [
    "messwert_bp_sys",
    "messwert_bp_dia",
    "schaetzwert_bp_sys",
    "schaetzwert_by_dia",
];

/// Answers filled with "unknown" when the respondent's sex is missing, since
/// those rows come from questionnaires with the whole personal block skipped
const UNKNOWN_FILL_COLUMNS: [&str; 6] = [
    "raucher",
    "blutzucker_bekannt",
    "cholesterin_bekannt",
    "in_behandlung",
    "befinden",
    "geschlecht",
];

/// Location columns filled with "not applicable" for out-of-region respondents
const REGION_COLUMNS: [&str; 4] = ["gemeinde", "bezirk", "bundesland", "postleitzahl"];

/// Cleaned survey frame plus its columns split by kind
#[derive(Debug, Clone)]
pub struct CleanedSurvey {
    pub df: DataFrame,
    /// String-typed columns, in frame order
    pub categorical: Vec<String>,
    /// Everything else, in frame order
    pub numeric: Vec<String>,
}

/// Typing, missing-value handling, age derivation, and seeded shuffling for
/// the raw survey frame
#[derive(Debug, Clone)]
pub struct SurveyCleaner {
    filter_columns: Vec<String>,
    drop_values: bool,
    shuffle_seed: u64,
}

impl Default for SurveyCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl SurveyCleaner {
    pub fn new() -> Self {
        Self {
            filter_columns: Vec::new(),
            drop_values: true,
            shuffle_seed: 1,
        }
    }

    /// Columns to drop after cleaning (e.g. the raw timestamp once age is
    /// derived)
    pub fn with_filter_columns(mut self, columns: Vec<String>) -> Self {
        self.filter_columns = columns;
        self
    }

    /// Disable row dropping and column filtering; useful for inspecting the
    /// labeled frame before anything is removed
    pub fn with_drop_values(mut self, drop_values: bool) -> Self {
        self.drop_values = drop_values;
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = seed;
        self
    }

    /// Run the full cleaning pass.
    ///
    /// Steps, in order: column typing, age derivation from `zeit` and
    /// `geburtsjahr`, "unknown"/"not applicable" labeling, the 15-100 age
    /// filter plus null-row dropping (when enabled), filter-column removal,
    /// and a seeded shuffle. The shuffle is the only randomized step and is
    /// fully determined by the seed.
    pub fn clean(&self, data: &DataFrame) -> Result<CleanedSurvey> {
        let mut df = data.clone();

        cast_in_place(&mut df, "postleitzahl", &DataType::String)?;
        cast_in_place(&mut df, "geburtsjahr", &DataType::Int64)?;
        cast_in_place(&mut df, "befinden", &DataType::String)?;
        for name in MEASUREMENT_COLUMNS {
            cast_in_place(&mut df, name, &DataType::Float64)?;
        }

        // Masks are computed before any fills so the labeling below cannot
        // shadow them
        let non_local = df.column("gemeinde")?.is_null()
            & df.column("bezirk")?.is_null()
            & df.column("bundesland")?.is_null();
        let unknown_sex = df.column("geschlecht")?.is_null();

        let age = derive_age(&df)?;
        df.with_column(age)?;

        for name in UNKNOWN_FILL_COLUMNS {
            fill_where(&mut df, name, &unknown_sex, "unknown")?;
        }
        for name in REGION_COLUMNS {
            fill_where(&mut df, name, &non_local, "not applicable")?;
        }
        // Local respondents without a usable postcode
        let missing_postcode = df.column("postleitzahl")?.is_null();
        fill_where(&mut df, "postleitzahl", &missing_postcode, "unknown")?;

        if self.drop_values {
            let before = df.height();
            let age_ok: BooleanChunked = df
                .column("age")?
                .i64()?
                .into_iter()
                .map(|v| match v {
                    Some(a) => Some(a >= 15 && a <= 100),
                    // Missing ages fall through to the null-row drop
                    None => Some(true),
                })
                .collect();
            df = df.filter(&age_ok)?;
            df = df.drop_nulls(Option::<&[String]>::None)?;

            for name in &self.filter_columns {
                df = df.drop(name)?;
            }
            debug!(before, after = df.height(), "dropped incomplete rows");
        }

        df = self.shuffle(df)?;

        let mut categorical = Vec::new();
        let mut numeric = Vec::new();
        for series in df.get_columns() {
            let name = series.name().to_string();
            if series.dtype() == &DataType::String {
                categorical.push(name);
            } else {
                numeric.push(name);
            }
        }

        Ok(CleanedSurvey {
            df,
            categorical,
            numeric,
        })
    }

    /// Row shuffle driven by a ChaCha8 stream, so the train/test boundary
    /// drawn later is reproducible
    fn shuffle(&self, df: DataFrame) -> Result<DataFrame> {
        let mut indices: Vec<IdxSize> = (0..df.height() as IdxSize).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.shuffle_seed);
        indices.shuffle(&mut rng);

        let idx = IdxCa::from_vec("idx", indices);
        Ok(df.take(&idx)?)
    }
}

fn cast_in_place(df: &mut DataFrame, name: &str, dtype: &DataType) -> Result<()> {
    let casted = df
        .column(name)
        .map_err(|_| BpSelectError::CleaningError(format!("missing column '{}'", name)))?
        .cast(dtype)?;
    df.replace(name, casted)?;
    Ok(())
}

/// Age at survey time: calendar year of `zeit` minus `geburtsjahr`
fn derive_age(df: &DataFrame) -> Result<Series> {
    let years = df
        .column("zeit")
        .map_err(|_| BpSelectError::CleaningError("missing column 'zeit'".to_string()))?
        .year()?;
    let birth = df.column("geburtsjahr")?.i64()?;

    let age: Int64Chunked = years
        .into_iter()
        .zip(birth)
        .map(|(year, birth_year)| match (year, birth_year) {
            (Some(y), Some(b)) => Some(y as i64 - b),
            _ => None,
        })
        .collect();

    let mut series = age.into_series();
    series.rename("age");
    Ok(series)
}

fn fill_where(df: &mut DataFrame, name: &str, mask: &BooleanChunked, value: &str) -> Result<()> {
    let column = df
        .column(name)
        .map_err(|_| BpSelectError::CleaningError(format!("missing column '{}'", name)))?;
    let mut filled = column.str()?.set(mask, Some(value))?.into_series();
    filled.rename(name);
    df.replace(name, filled)?;
    Ok(())
}
