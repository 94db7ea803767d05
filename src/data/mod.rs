//! Survey data pipeline
//!
//! Loading the CSV export, cleaning it into a typed frame, one-hot encoding,
//! and the numeric feature matrix the models consume.

pub mod clean;
pub mod encode;
pub mod loader;
pub mod matrix;

pub use clean::{CleanedSurvey, SurveyCleaner};
pub use encode::{one_hot_encode, separate_target};
pub use loader::DataLoader;
pub use matrix::{train_test_split, FeatureMatrix};
