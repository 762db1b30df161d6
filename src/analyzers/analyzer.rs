//! End-to-end orchestration: load, clean, aggregate, persist.

use std::fs;
use std::path::Path;

use chrono::Utc;
use tracing::{debug, info};

use crate::analyzers::aggregate::{
    average_macros, cuisine_modes, highest_protein_diet, top_protein_recipes,
};
use crate::analyzers::types::{CuisineMode, DietAverages, Summary, TopRecipe};
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use crate::output::{write_csv, write_highest_protein};
use crate::parser::parse_dataset;

pub const TOP_RECIPES_PER_DIET: usize = 5;

/// Everything one run produced. The views are persisted before this is
/// returned and never mutated afterwards; chart rendering reads them from
/// here instead of re-deriving anything.
#[derive(Debug)]
pub struct Analysis {
    pub summary: Summary,
    pub averages: Vec<DietAverages>,
    pub top_recipes: Vec<TopRecipe>,
    pub cuisine_modes: Vec<CuisineMode>,
}

/// Runs the full pipeline over the dataset at `source_path`, writing the
/// four result files under `results_dir`.
///
/// # Errors
///
/// [`AnalysisError::NotFound`] if the source is absent,
/// [`AnalysisError::Schema`] if required columns are missing, and
/// [`AnalysisError::EmptyDataset`] for a row-less dataset. All of these
/// abort before any output file is written.
pub fn run(source_path: &Path, results_dir: &Path) -> Result<Analysis> {
    if !source_path.exists() {
        return Err(AnalysisError::NotFound(source_path.to_path_buf()));
    }

    let bytes = fs::read(source_path)?;
    run_from_bytes(&bytes, results_dir)
}

/// Same pipeline for an already-loaded dataset, e.g. one fetched over HTTP.
pub fn run_from_bytes(bytes: &[u8], results_dir: &Path) -> Result<Analysis> {
    let raw = parse_dataset(bytes)?;
    let mut dataset = Dataset::from_raw(raw);
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset("no data rows after load"));
    }
    info!(rows = dataset.len(), "Dataset loaded");

    dataset.impute_missing();

    // Ratio columns are derived on demand; a zero or still-missing
    // denominator leaves a row's ratio undefined rather than failing.
    let defined_ratios = dataset
        .records()
        .iter()
        .filter(|r| r.protein_to_carbs_ratio().is_some() && r.carbs_to_fat_ratio().is_some())
        .count();
    debug!(
        defined_ratios,
        rows = dataset.len(),
        "Derived ratio columns"
    );

    let averages = average_macros(&dataset);
    let top_recipes = top_protein_recipes(&dataset, TOP_RECIPES_PER_DIET);
    let (top_diet, top_value) = highest_protein_diet(&averages)?;
    let modes = cuisine_modes(&dataset);

    fs::create_dir_all(results_dir)?;
    write_csv(&results_dir.join("avg_macros_by_diet.csv"), &averages)?;
    write_csv(
        &results_dir.join("top5_protein_recipes_by_diet.csv"),
        &top_recipes,
    )?;
    write_highest_protein(
        &results_dir.join("highest_protein_diet.txt"),
        &top_diet,
        top_value,
    )?;
    write_csv(&results_dir.join("most_common_cuisine_by_diet.csv"), &modes)?;

    let summary = Summary {
        generated_at: Utc::now(),
        row_count: dataset.len(),
        highest_protein_diet: top_diet,
        highest_protein_value: top_value,
    };
    info!(
        rows = summary.row_count,
        diet = %summary.highest_protein_diet,
        "Analysis complete"
    );

    Ok(Analysis {
        summary,
        averages,
        top_recipes,
        cuisine_modes: modes,
    })
}
