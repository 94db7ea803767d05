//! Model training module
//!
//! Regression-tree model variants for the study plus the trial-level
//! fit-and-predict entry point:
//! - Single regression tree (CART, variance-reduction splits)
//! - Random forest (bootstrap ensemble, seeded)

mod config;
pub mod decision_tree;
pub mod random_forest;
mod trainer;

pub use config::{ModelKind, TreeParams};
pub use decision_tree::{DecisionTree, TreeNode};
pub use random_forest::RandomForest;
pub use trainer::{fit_and_predict, FitOutput, FittedModel};
