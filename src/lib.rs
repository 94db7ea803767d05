//! bpselect - Survey preparation and best-subset model selection
//!
//! This crate prepares the Styrian blood-pressure survey for regression
//! modeling and searches for the best contiguous feature subset:
//! - Loading and cleaning the raw survey export
//! - One-hot encoding and train/test splitting
//! - Regression trees and random forests
//! - Windowed best-subset search over the feature list
//! - Side-by-side result tables
//!
//! # Modules
//!
//! - [`data`] - Loading, cleaning, encoding, feature matrices
//! - [`training`] - Regression tree and random forest models
//! - [`metrics`] - R², adjusted R², and mean squared error
//! - [`evaluate`] - Fit-and-score trials
//! - [`search`] - The windowed best-subset search
//! - [`report`] - Result tables
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Data pipeline
pub mod data;

// Models and evaluation
pub mod training;
pub mod metrics;
pub mod evaluate;

// Selection
pub mod search;
pub mod report;

// Services
pub mod cli;

pub use error::{BpSelectError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{BpSelectError, Result};

    // Data pipeline
    pub use crate::data::{
        one_hot_encode, separate_target, train_test_split, CleanedSurvey, DataLoader,
        FeatureMatrix, SurveyCleaner,
    };

    // Training
    pub use crate::training::{
        fit_and_predict, DecisionTree, FitOutput, FittedModel, ModelKind, RandomForest, TreeParams,
    };

    // Metrics and evaluation
    pub use crate::evaluate::{evaluate, Evaluation};
    pub use crate::metrics::{adjusted_r2, RegressionReport};

    // Search and reporting
    pub use crate::report::tabularize;
    pub use crate::search::{BestTrial, Criterion, SearchConfig, SubsetSearch};
}
