//! Error taxonomy for the analysis pipeline.
//!
//! Every failure here is fatal: the tool is a single-shot batch job and
//! aborts on the first error. Malformed numeric cells are not errors at
//! all; they are coerced to missing values and imputed downstream.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("source file not found: {0}")]
    NotFound(PathBuf),

    #[error("dataset is missing required columns: {}", .0.join(", "))]
    Schema(Vec<String>),

    #[error("dataset is empty: {0}")]
    EmptyDataset(&'static str),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
