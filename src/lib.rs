//! manifest-prep: Feature Preparation Library
//!
//! Prepares a training and a held-out passenger manifest for modelling:
//! missing value imputation fitted on the training set, derived family and
//! title features, and one-hot encoding with identical columns in both sets.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
